// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::records::RecordRow;
use crate::store;
use anyhow::{Context, Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, name: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("session", sub)) => export_session(conn, name, sub),
        Some(("records", sub)) => export_records(conn, name, sub),
        _ => Ok(()),
    }
}

fn out_path(sub: &clap::ArgMatches) -> Result<&String> {
    sub.get_one::<String>("out").context("--out is required")
}

fn export_session(conn: &Connection, name: &str, sub: &clap::ArgMatches) -> Result<()> {
    let out = out_path(sub)?;
    let session = store::load(conn, name)?;
    std::fs::write(out, serde_json::to_string_pretty(&session.snapshot())?)?;
    println!("Exported session '{}' to {}", name, out);
    Ok(())
}

fn export_records(conn: &Connection, name: &str, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let out = out_path(sub)?;
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let session = store::load(conn, name)?;
    let rows: Vec<RecordRow> = session.records().iter().map(RecordRow::from).collect();

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record(["id", "date", "type", "title", "category", "amount", "note"])?;
        for r in &rows {
            wtr.write_record([
                r.id.to_string(),
                r.date.clone(),
                r.kind.as_str().to_string(),
                r.title.clone(),
                r.category.clone(),
                r.amount.to_string(),
                r.note.clone().unwrap_or_default(),
            ])?;
        }
        wtr.flush()?;
    } else {
        std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
    }
    println!("Exported {} records to {}", rows.len(), out);
    Ok(())
}
