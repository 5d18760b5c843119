// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::forms::FundForm;
use crate::progress::{bar, fund_summary};
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, name: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, name, sub)?,
        Some(("set", sub)) => set(conn, name, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection, name: &str, sub: &clap::ArgMatches) -> Result<()> {
    let session = store::load(conn, name)?;
    let s = fund_summary(session.emergency_fund());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        println!(
            "{}",
            pretty_table(
                &["Target", "Current", "Remaining", "Progress", "Status"],
                vec![vec![
                    fmt_money(&s.target),
                    fmt_money(&s.current),
                    fmt_money(&s.remaining),
                    format!("{} {}%", bar(s.percent, 10), s.percent),
                    s.status.label().to_string(),
                ]],
            )
        );
        println!("還需要 {} 才能達成目標 🎯", fmt_money(&s.remaining));
    }
    Ok(())
}

/// Fields not given keep their stored value.
fn set(conn: &mut Connection, name: &str, sub: &clap::ArgMatches) -> Result<()> {
    let session = store::load(conn, name)?;
    let mut form = FundForm::from_fund(session.emergency_fund());
    if let Some(t) = sub.get_one::<String>("target") {
        form.target = t.trim().to_string();
    }
    if let Some(c) = sub.get_one::<String>("current") {
        form.current = c.trim().to_string();
    }
    let next = session.save_fund(&form)?;
    store::save(conn, name, &next)?;
    let fund = next.emergency_fund();
    println!(
        "Emergency fund: {} of {}",
        fmt_money(&fund.current),
        fmt_money(&fund.target)
    );
    Ok(())
}
