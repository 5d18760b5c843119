// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Dream, EmergencyFund};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Whole-number completion percentage, rounding halves up. A zero target is 0%.
pub fn percent(completed: Decimal, target: Decimal) -> i64 {
    if target.is_zero() {
        return 0;
    }
    (completed / target * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Good,
    Warning,
    Bad,
}

impl ProgressStatus {
    pub fn classify(percent: i64) -> Self {
        if percent >= 70 {
            ProgressStatus::Good
        } else if percent >= 40 {
            ProgressStatus::Warning
        } else {
            ProgressStatus::Bad
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::Good => "good",
            ProgressStatus::Warning => "warning",
            ProgressStatus::Bad => "bad",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProgressStatus::Good => "進度良好",
            ProgressStatus::Warning => "追蹤中",
            ProgressStatus::Bad => "需加強",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DreamSummary {
    pub count: usize,
    pub total_target: Decimal,
    pub total_completed: Decimal,
    pub percent: i64,
    pub status: ProgressStatus,
}

pub fn dream_summary(dreams: &[Dream]) -> DreamSummary {
    let total_target: Decimal = dreams.iter().map(|d| d.target).sum();
    let total_completed: Decimal = dreams.iter().map(|d| d.completed).sum();
    let pct = percent(total_completed, total_target);
    DreamSummary {
        count: dreams.len(),
        total_target,
        total_completed,
        percent: pct,
        status: ProgressStatus::classify(pct),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundSummary {
    pub target: Decimal,
    pub current: Decimal,
    pub remaining: Decimal,
    pub percent: i64,
    pub status: ProgressStatus,
}

pub fn fund_summary(fund: &EmergencyFund) -> FundSummary {
    let pct = percent(fund.current, fund.target);
    FundSummary {
        target: fund.target,
        current: fund.current,
        remaining: fund.remaining(),
        percent: pct,
        status: ProgressStatus::classify(pct),
    }
}

/// Text bar used in place of the page's progress strip.
pub fn bar(percent: i64, width: usize) -> String {
    let filled = (percent.clamp(0, 100) as usize * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
