// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(RecordKind::Income),
            "expense" => Ok(RecordKind::Expense),
            other => Err(anyhow!("Invalid record type '{}', expected income|expense", other)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Income => "收入",
            RecordKind::Expense => "支出",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logged income or expense transaction. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub title: String,
    pub category: String, // "<category> / <group>"
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DreamIcon {
    Heart,
    Star,
    Home,
    Book,
}

impl DreamIcon {
    pub const ALL: [DreamIcon; 4] = [
        DreamIcon::Heart,
        DreamIcon::Star,
        DreamIcon::Home,
        DreamIcon::Book,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DreamIcon::Heart => "heart",
            DreamIcon::Star => "star",
            DreamIcon::Home => "home",
            DreamIcon::Book => "book",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|icon| icon.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| anyhow!("Invalid icon '{}', expected heart|star|home|book", s))
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            DreamIcon::Heart => "❤️",
            DreamIcon::Star => "⭐",
            DreamIcon::Home => "🏠",
            DreamIcon::Book => "📚",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DreamIcon::Heart => "愛心",
            DreamIcon::Star => "星星",
            DreamIcon::Home => "房子",
            DreamIcon::Book => "書本",
        }
    }
}

/// A named savings goal. `completed` never exceeds `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dream {
    pub id: i64,
    pub name: String,
    pub target: Decimal,
    pub completed: Decimal,
    pub icon: DreamIcon,
}

impl Dream {
    pub fn remaining(&self) -> Decimal {
        (self.target - self.completed).max(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmergencyFund {
    pub target: Decimal,
    pub current: Decimal,
}

impl EmergencyFund {
    pub fn remaining(&self) -> Decimal {
        (self.target - self.current).max(Decimal::ZERO)
    }
}

impl Default for EmergencyFund {
    fn default() -> Self {
        Self {
            target: Decimal::from(300_000),
            current: Decimal::from(100_000),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}
