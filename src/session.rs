// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The whole in-memory state of one user: records, dreams and the
//! emergency fund.
//!
//! Mutations never edit in place. Each one borrows the current session and
//! returns a replacement, so a rejected save leaves the caller's value as it
//! was.

use crate::error::{DreamRejected, FundRejected, RecordRejected};
use crate::forms::{DreamForm, FundForm, RecordDraft};
use crate::models::{DailySummary, Dream, DreamIcon, EmergencyFund, RecordEntry, RecordKind};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    records: Vec<RecordEntry>, // most recent first
    dreams: Vec<Dream>,
    emergency_fund: EmergencyFund,
    next_record_id: i64,
    next_dream_id: i64,
}

/// The persisted shape of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub records: Vec<RecordEntry>,
    pub dreams: Vec<Dream>,
    pub emergency_fund: EmergencyFund,
}

fn next_id<'a>(ids: impl Iterator<Item = &'a i64>) -> i64 {
    ids.max().map_or(1, |m| m + 1)
}

impl Session {
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            next_record_id: next_id(snapshot.records.iter().map(|r| &r.id)),
            next_dream_id: next_id(snapshot.dreams.iter().map(|d| &d.id)),
            records: snapshot.records,
            dreams: snapshot.dreams,
            emergency_fund: snapshot.emergency_fund,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            records: self.records.clone(),
            dreams: self.dreams.clone(),
            emergency_fund: self.emergency_fund,
        }
    }

    /// Sample state: two dreams, the default fund, and five records over the
    /// three days ending at `today`.
    pub fn seeded(today: NaiveDate) -> Self {
        let days_ago = |n: u64| today.checked_sub_days(Days::new(n)).unwrap_or(today);
        let rec = |id: i64, date: NaiveDate, title: &str, category: &str, amount: i64, kind| {
            RecordEntry {
                id,
                date,
                title: title.to_string(),
                category: category.to_string(),
                amount: Decimal::from(amount),
                kind,
                note: None,
            }
        };
        let life_variable = "生活支出 / 生活變動支出";
        Self::from_snapshot(Snapshot {
            records: vec![
                rec(1, today, "早餐", life_variable, 85, RecordKind::Expense),
                rec(2, today, "交通卡加值", life_variable, 200, RecordKind::Expense),
                rec(3, today, "兼職收入", "月收入 / 生活收入 / 變動收入", 1200, RecordKind::Income),
                rec(4, days_ago(1), "晚餐", life_variable, 260, RecordKind::Expense),
                rec(5, days_ago(2), "書籍", life_variable, 520, RecordKind::Expense),
            ],
            dreams: vec![
                Dream {
                    id: 1,
                    name: "日本家庭旅遊".into(),
                    target: Decimal::from(150_000),
                    completed: Decimal::from(10_000),
                    icon: DreamIcon::Heart,
                },
                Dream {
                    id: 2,
                    name: "孩子才藝課程".into(),
                    target: Decimal::from(30_000),
                    completed: Decimal::from(15_000),
                    icon: DreamIcon::Star,
                },
            ],
            emergency_fund: EmergencyFund::default(),
        })
    }

    pub fn records(&self) -> &[RecordEntry] {
        &self.records
    }

    pub fn dreams(&self) -> &[Dream] {
        &self.dreams
    }

    pub fn emergency_fund(&self) -> &EmergencyFund {
        &self.emergency_fund
    }

    pub fn dream(&self, id: i64) -> Option<&Dream> {
        self.dreams.iter().find(|d| d.id == id)
    }

    pub fn add_record(&self, draft: &RecordDraft) -> Result<Session, RecordRejected> {
        let valid = draft.validate()?;
        let entry = RecordEntry {
            id: self.next_record_id.max(1),
            date: valid.date,
            title: valid.path.item.to_string(),
            category: valid.path.display(),
            amount: valid.amount,
            kind: valid.path.kind,
            note: valid.note,
        };
        info!(id = entry.id, date = %entry.date, kind = %entry.kind, "record added");
        let mut next = self.clone();
        next.next_record_id = entry.id + 1;
        next.records.insert(0, entry);
        Ok(next)
    }

    pub fn records_on(&self, date: NaiveDate) -> impl Iterator<Item = &RecordEntry> {
        self.records.iter().filter(move |r| r.date == date)
    }

    pub fn summarize(&self, date: NaiveDate) -> DailySummary {
        let (income, expense) = self.records_on(date).fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(inc, exp), r| match r.kind {
                RecordKind::Income => (inc + r.amount, exp),
                RecordKind::Expense => (inc, exp + r.amount),
            },
        );
        DailySummary {
            income,
            expense,
            net: income - expense,
        }
    }

    pub fn logged_dates(&self) -> BTreeSet<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    pub fn is_logged(&self, date: NaiveDate) -> bool {
        self.records.iter().any(|r| r.date == date)
    }

    /// Today is flagged for a reminder until something is logged on it.
    pub fn needs_reminder(&self, today: NaiveDate) -> bool {
        !self.is_logged(today)
    }

    /// Insert a new dream at the front, or replace the one with `editing` id.
    pub fn save_dream(
        &self,
        editing: Option<i64>,
        form: &DreamForm,
    ) -> Result<Session, DreamRejected> {
        let values = form.parse()?;
        let mut next = self.clone();
        match editing {
            Some(id) => {
                let slot = next
                    .dreams
                    .iter_mut()
                    .find(|d| d.id == id)
                    .ok_or(DreamRejected::UnknownDream(id))?;
                *slot = Dream {
                    id,
                    name: values.name,
                    target: values.target,
                    completed: values.completed,
                    icon: values.icon,
                };
                debug!(id, "dream updated");
            }
            None => {
                let id = self.next_dream_id.max(1);
                next.next_dream_id = id + 1;
                next.dreams.insert(
                    0,
                    Dream {
                        id,
                        name: values.name,
                        target: values.target,
                        completed: values.completed,
                        icon: values.icon,
                    },
                );
                debug!(id, "dream created");
            }
        }
        Ok(next)
    }

    pub fn save_fund(&self, form: &FundForm) -> Result<Session, FundRejected> {
        let fund = form.parse()?;
        debug!(fund_target = %fund.target, fund_current = %fund.current, "emergency fund updated");
        Ok(Session {
            emergency_fund: fund,
            ..self.clone()
        })
    }
}
