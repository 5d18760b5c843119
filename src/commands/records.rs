// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calendar::{DEFAULT_REVIEW_TIME, MonthCalendar, reminder_message, validate_review_time};
use crate::db::{get_setting, set_setting};
use crate::forms::RecordForm;
use crate::models::{DailySummary, RecordEntry, RecordKind};
use crate::session::Session;
use crate::store;
use crate::taxonomy;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_month, pretty_table, today};
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub const REVIEW_TIME_KEY: &str = "review_time";

pub fn handle(conn: &mut Connection, name: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, name, sub)?,
        Some(("list", sub)) => list(conn, name, sub)?,
        Some(("summary", sub)) => summary(conn, name, sub)?,
        Some(("calendar", sub)) => calendar(conn, name, sub)?,
        Some(("review-time", sub)) => review_time(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn date_or_today(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.get_one::<String>("date") {
        Some(d) => parse_date(d),
        None => Ok(today()),
    }
}

/// Fill the entry form from CLI arguments. An item given without a category
/// is located in the taxonomy; anything omitted keeps the form's default.
pub fn build_form(sub: &clap::ArgMatches, today: NaiveDate) -> Result<RecordForm> {
    let kind = match sub.get_one::<String>("type") {
        Some(t) => RecordKind::parse(t)?,
        None => RecordKind::Expense,
    };
    let mut form = RecordForm::open(kind, today);
    let category = sub.get_one::<String>("category").map(|s| s.trim());
    let group = sub.get_one::<String>("group").map(|s| s.trim());
    let item = sub.get_one::<String>("item").map(|s| s.trim());

    match (category, item) {
        (Some(c), _) => {
            if !form.set_category(c) {
                return Err(anyhow!("Category '{}' is not a {} category", c, kind));
            }
        }
        (None, Some(it)) => {
            // A group narrows the search to the category that owns it.
            let path = match group {
                Some(g) => taxonomy::categories(kind)
                    .iter()
                    .find_map(|cat| taxonomy::resolve(kind, cat.label, g, it)),
                None => taxonomy::find_item(kind, it),
            }
            .ok_or_else(|| match group {
                Some(g) => anyhow!("Item '{}' is not in {} group '{}'", it, kind, g),
                None => anyhow!("Item '{}' is not a {} item", it, kind),
            })?;
            form.set_category(path.category);
            form.set_group(path.group);
        }
        (None, None) => {}
    }
    match (group, item) {
        (Some(g), _) => {
            if !form.set_group(g) {
                return Err(anyhow!("Group '{}' is not in category '{}'", g, form.category()));
            }
        }
        (None, Some(it)) => {
            let owner = form
                .group_options()
                .iter()
                .find(|grp| grp.items.iter().any(|i| *i == it))
                .map(|grp| grp.label);
            if let Some(label) = owner {
                form.set_group(label);
            }
        }
        (None, None) => {}
    }
    if let Some(it) = item {
        if !form.set_item(it) {
            return Err(anyhow!("Item '{}' is not in group '{}'", it, form.group()));
        }
    }

    form.amount = sub.get_one::<String>("amount").cloned().unwrap_or_default();
    if let Some(d) = sub.get_one::<String>("date") {
        form.date = d.trim().to_string();
    }
    form.note = sub.get_one::<String>("note").cloned().unwrap_or_default();
    Ok(form)
}

fn add(conn: &mut Connection, name: &str, sub: &clap::ArgMatches) -> Result<()> {
    let session = store::load(conn, name)?;
    let form = build_form(sub, today())?;
    let next = form.submit(&session)?;
    store::save(conn, name, &next)?;
    let rec = &next.records()[0];
    println!(
        "Recorded {} {} on {} ({} / {})",
        rec.kind.label(),
        fmt_money(&rec.amount),
        rec.date,
        rec.category,
        rec.title
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct RecordRow {
    pub id: i64,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub title: String,
    pub category: String,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<&RecordEntry> for RecordRow {
    fn from(r: &RecordEntry) -> Self {
        Self {
            id: r.id,
            date: r.date.to_string(),
            kind: r.kind,
            title: r.title.clone(),
            category: r.category.clone(),
            amount: r.amount,
            note: r.note.clone(),
        }
    }
}

pub fn query_rows(session: &Session, sub: &clap::ArgMatches) -> Result<Vec<RecordRow>> {
    let date = sub
        .get_one::<String>("date")
        .map(|d| parse_date(d))
        .transpose()?;
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    Ok(session
        .records()
        .iter()
        .filter(|r| date.is_none_or(|d| r.date == d))
        .take(limit)
        .map(RecordRow::from)
        .collect())
}

fn signed_amount(kind: RecordKind, amount: &Decimal) -> String {
    match kind {
        RecordKind::Income => format!("+{}", fmt_money(amount)),
        RecordKind::Expense => format!("-{}", fmt_money(amount)),
    }
}

fn list(conn: &Connection, name: &str, sub: &clap::ArgMatches) -> Result<()> {
    let session = store::load(conn, name)?;
    let data = query_rows(&session, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.title.clone(),
                    r.category.clone(),
                    signed_amount(r.kind, &r.amount),
                    r.note.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Item", "Category", "Amount", "Note"], rows)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct DayReport {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub summary: DailySummary,
    pub reminder: String,
    pub records: Vec<RecordRow>,
}

pub fn day_report(session: &Session, date: NaiveDate, today: NaiveDate) -> DayReport {
    let records: Vec<RecordRow> = session
        .records_on(date)
        .map(RecordRow::from)
        .collect();
    DayReport {
        date,
        summary: session.summarize(date),
        reminder: reminder_message(date, today, !records.is_empty()),
        records,
    }
}

fn summary(conn: &Connection, name: &str, sub: &clap::ArgMatches) -> Result<()> {
    let session = store::load(conn, name)?;
    let report = day_report(&session, date_or_today(sub)?, today());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        println!("{}", report.reminder);
        println!(
            "{}",
            pretty_table(
                &["Income", "Expense", "Net"],
                vec![vec![
                    fmt_money(&report.summary.income),
                    fmt_money(&report.summary.expense),
                    fmt_money(&report.summary.net),
                ]],
            )
        );
        if report.records.is_empty() {
            println!("尚未有記帳紀錄，完成記帳後會顯示在這裡");
        } else {
            for r in &report.records {
                let note = r
                    .note
                    .as_deref()
                    .map(|n| format!(" · {}", n))
                    .unwrap_or_default();
                println!(
                    "  {}  {}{}  {}",
                    r.title,
                    r.category,
                    note,
                    signed_amount(r.kind, &r.amount)
                );
            }
        }
    }
    Ok(())
}

pub fn review_time_setting(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, REVIEW_TIME_KEY)?.unwrap_or_else(|| DEFAULT_REVIEW_TIME.to_string()))
}

fn calendar(conn: &Connection, name: &str, sub: &clap::ArgMatches) -> Result<()> {
    let session = store::load(conn, name)?;
    let now = today();
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => now,
    };
    let cal = MonthCalendar::build(month, &session.logged_dates(), now)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cal)? {
        print!("{}", cal.render());
        println!("● 已完成記帳   ! 今日待記帳提醒");
        println!("回顧提醒時間 {}", review_time_setting(conn)?);
    }
    Ok(())
}

fn review_time(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(raw) = sub.get_one::<String>("set") {
        let t = validate_review_time(raw)?;
        set_setting(conn, REVIEW_TIME_KEY, &t)?;
        println!("Review reminder set to {}", t);
    } else {
        println!("{}", review_time_setting(conn)?);
    }
    Ok(())
}
