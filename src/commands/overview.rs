// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::records::{DayReport, day_report, review_time_setting};
use crate::db::{delete_setting, get_setting, set_setting};
use crate::indicators::{INDICATORS, Indicator};
use crate::progress::{DreamSummary, FundSummary, bar, dream_summary, fund_summary};
use crate::session::Session;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, parse_date, today};
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const SELECTION_KEY: &str = "overview_selection";

pub const BLOCKS: [(&str, &str); 5] = [
    ("recordKeeping", "記帳專區"),
    ("financialIndicators", "財務健康與財務安全"),
    ("dreamGoals", "夢想完成狀況"),
    ("emergencyFund", "緊急預備金狀況"),
    ("consultShare", "預約諮詢與分享給家人"),
];

/// Which overview blocks are visible. Missing keys default to visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverviewSelection {
    pub record_keeping: bool,
    pub financial_indicators: bool,
    pub dream_goals: bool,
    pub emergency_fund: bool,
    pub consult_share: bool,
}

impl Default for OverviewSelection {
    fn default() -> Self {
        Self {
            record_keeping: true,
            financial_indicators: true,
            dream_goals: true,
            emergency_fund: true,
            consult_share: true,
        }
    }
}

impl OverviewSelection {
    fn slot(&mut self, block: &str) -> Option<&mut bool> {
        match block {
            "recordKeeping" => Some(&mut self.record_keeping),
            "financialIndicators" => Some(&mut self.financial_indicators),
            "dreamGoals" => Some(&mut self.dream_goals),
            "emergencyFund" => Some(&mut self.emergency_fund),
            "consultShare" => Some(&mut self.consult_share),
            _ => None,
        }
    }

    pub fn with(mut self, block: &str, visible: bool) -> Result<Self> {
        let known: Vec<&str> = BLOCKS.iter().map(|(id, _)| *id).collect();
        let slot = self.slot(block).ok_or_else(|| {
            anyhow!("Unknown block '{}', expected one of {}", block, known.join("|"))
        })?;
        *slot = visible;
        Ok(self)
    }
}

pub fn load_selection(conn: &Connection) -> Result<OverviewSelection> {
    let Some(raw) = get_setting(conn, SELECTION_KEY)? else {
        return Ok(OverviewSelection::default());
    };
    match serde_json::from_str(&raw) {
        Ok(sel) => Ok(sel),
        Err(err) => {
            warn!(%err, "ignoring unreadable overview selection");
            Ok(OverviewSelection::default())
        }
    }
}

pub fn save_selection(conn: &Connection, sel: &OverviewSelection) -> Result<()> {
    set_setting(conn, SELECTION_KEY, &serde_json::to_string(sel)?)
}

pub fn handle(conn: &mut Connection, name: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, name, sub)?,
        Some(("enable", sub)) => toggle(conn, sub, true)?,
        Some(("disable", sub)) => toggle(conn, sub, false)?,
        Some(("reset", _)) => {
            delete_setting(conn, SELECTION_KEY)?;
            println!("Overview restored to show every block");
        }
        _ => {}
    }
    Ok(())
}

fn toggle(conn: &Connection, sub: &clap::ArgMatches, visible: bool) -> Result<()> {
    let block = sub
        .get_one::<String>("block")
        .map(|s| s.trim())
        .unwrap_or_default();
    let sel = load_selection(conn)?.with(block, visible)?;
    save_selection(conn, &sel)?;
    println!(
        "{} {}",
        if visible { "Showing" } else { "Hiding" },
        block
    );
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_keeping: Option<DayReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_indicators: Option<&'static [Indicator]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dream_goals: Option<DreamSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_fund: Option<FundSummary>,
    pub selection: OverviewSelection,
}

pub fn build(session: &Session, sel: OverviewSelection, date: NaiveDate, today: NaiveDate) -> Overview {
    Overview {
        date,
        record_keeping: sel
            .record_keeping
            .then(|| day_report(session, date, today)),
        financial_indicators: sel.financial_indicators.then_some(INDICATORS),
        dream_goals: sel.dream_goals.then(|| dream_summary(session.dreams())),
        emergency_fund: sel
            .emergency_fund
            .then(|| fund_summary(session.emergency_fund())),
        selection: sel,
    }
}

fn show(conn: &Connection, name: &str, sub: &clap::ArgMatches) -> Result<()> {
    let session = store::load(conn, name)?;
    let now = today();
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => now,
    };
    let sel = load_selection(conn)?;
    let ov = build(&session, sel, date, now);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &ov)? {
        return Ok(());
    }

    if let Some(r) = &ov.record_keeping {
        println!("■ {}", BLOCKS[0].1);
        println!("  {}", r.reminder);
        println!(
            "  收入 {}  支出 {}  淨額 {}",
            fmt_money(&r.summary.income),
            fmt_money(&r.summary.expense),
            fmt_money(&r.summary.net)
        );
        println!("  回顧提醒時間 {}", review_time_setting(conn)?);
    }
    if let Some(indicators) = ov.financial_indicators {
        println!("■ {}", BLOCKS[1].1);
        for ind in indicators {
            println!(
                "  {} {} {}分 [{}] · {}/{} 項達成",
                ind.title,
                bar(ind.score, 20),
                ind.score,
                ind.badge,
                ind.passed(),
                ind.items.len()
            );
            for c in ind.items {
                println!("    {} {}", c.status.glyph(), c.label);
            }
        }
    }
    if let Some(d) = &ov.dream_goals {
        println!("■ {}", BLOCKS[2].1);
        println!(
            "  {} {}% {} · 已完成 {} / {} · 共{}個目標",
            bar(d.percent, 20),
            d.percent,
            d.status.label(),
            fmt_money(&d.total_completed),
            fmt_money(&d.total_target),
            d.count
        );
    }
    if let Some(f) = &ov.emergency_fund {
        println!("■ {}", BLOCKS[3].1);
        println!(
            "  {} {}% {} · 目前 {} · 還需要 {}",
            bar(f.percent, 20),
            f.percent,
            f.status.label(),
            fmt_money(&f.current),
            fmt_money(&f.remaining)
        );
    }
    if sel.consult_share {
        println!("■ {}", BLOCKS[4].1);
        println!("  需要進一步的專業建議？預約免費線上財務諮詢，或將這份總覽分享給家人。");
    }
    Ok(())
}
