// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::forms::DreamForm;
use crate::models::{Dream, DreamIcon};
use crate::progress::{ProgressStatus, bar, dream_summary, percent};
use crate::session::Session;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &mut Connection, name: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, name, sub)?,
        Some(("edit", sub)) => edit(conn, name, sub)?,
        Some(("list", sub)) => list(conn, name, sub)?,
        _ => {}
    }
    Ok(())
}

fn text(sub: &clap::ArgMatches, key: &str) -> Option<String> {
    sub.get_one::<String>(key).map(|s| s.trim().to_string())
}

fn add(conn: &mut Connection, name: &str, sub: &clap::ArgMatches) -> Result<()> {
    let session = store::load(conn, name)?;
    let mut form = DreamForm::blank();
    form.name = text(sub, "name").unwrap_or_default();
    form.target = text(sub, "target").unwrap_or_default();
    form.completed = text(sub, "completed").unwrap_or_default();
    if let Some(icon) = text(sub, "icon") {
        form.icon = DreamIcon::parse(&icon)?;
    }
    let next = session.save_dream(None, &form)?;
    store::save(conn, name, &next)?;
    let d = &next.dreams()[0];
    println!(
        "Added dream #{} {} {} (target {})",
        d.id,
        d.icon.glyph(),
        d.name,
        fmt_money(&d.target)
    );
    Ok(())
}

/// Start from the stored dream and overwrite only the fields given.
pub fn edit_form(session: &Session, id: i64, sub: &clap::ArgMatches) -> Result<DreamForm> {
    let dream = session
        .dream(id)
        .with_context(|| format!("Dream {} not found", id))?;
    let mut form = DreamForm::from_dream(dream);
    if let Some(v) = text(sub, "name") {
        form.name = v;
    }
    if let Some(v) = text(sub, "target") {
        form.target = v;
    }
    if let Some(v) = text(sub, "completed") {
        form.completed = v;
    }
    if let Some(v) = text(sub, "icon") {
        form.icon = DreamIcon::parse(&v)?;
    }
    Ok(form)
}

fn edit(conn: &mut Connection, name: &str, sub: &clap::ArgMatches) -> Result<()> {
    let session = store::load(conn, name)?;
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let form = edit_form(&session, id, sub)?;
    let next = session.save_dream(Some(id), &form)?;
    store::save(conn, name, &next)?;
    println!("Saved dream #{}", id);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct DreamRow {
    pub id: i64,
    pub name: String,
    pub icon: DreamIcon,
    pub target: Decimal,
    pub completed: Decimal,
    pub remaining: Decimal,
    pub percent: i64,
    pub status: ProgressStatus,
}

impl From<&Dream> for DreamRow {
    fn from(d: &Dream) -> Self {
        let pct = percent(d.completed, d.target);
        Self {
            id: d.id,
            name: d.name.clone(),
            icon: d.icon,
            target: d.target,
            completed: d.completed,
            remaining: d.remaining(),
            percent: pct,
            status: ProgressStatus::classify(pct),
        }
    }
}

fn list(conn: &Connection, name: &str, sub: &clap::ArgMatches) -> Result<()> {
    let session = store::load(conn, name)?;
    let data: Vec<DreamRow> = session.dreams().iter().map(DreamRow::from).collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|d| {
                vec![
                    d.id.to_string(),
                    format!("{} {}", d.icon.glyph(), d.name),
                    format!("{} {}%", bar(d.percent, 10), d.percent),
                    fmt_money(&d.completed),
                    fmt_money(&d.remaining),
                    fmt_money(&d.target),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Dream", "Progress", "Completed", "Remaining", "Target"],
                rows
            )
        );
        let s = dream_summary(session.dreams());
        println!(
            "夢想總完成度 {}% ({}) · 共{}個目標",
            s.percent,
            s.status.label(),
            s.count
        );
    }
    Ok(())
}
