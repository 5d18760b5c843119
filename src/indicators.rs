// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Financial health and safety indicators shown on the overview.
//!
//! Scores and checklist results are a fixed assessment, not derived from the
//! session.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Good,
    Bad,
}

impl CheckStatus {
    pub fn glyph(&self) -> char {
        match self {
            CheckStatus::Good => '✓',
            CheckStatus::Bad => '✗',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndicatorCheck {
    pub label: &'static str,
    pub status: CheckStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub key: &'static str,
    pub title: &'static str,
    pub score: i64,
    pub badge: &'static str,
    pub items: &'static [IndicatorCheck],
}

impl Indicator {
    pub fn passed(&self) -> usize {
        self.items
            .iter()
            .filter(|c| c.status == CheckStatus::Good)
            .count()
    }
}

const fn check(label: &'static str, status: CheckStatus) -> IndicatorCheck {
    IndicatorCheck { label, status }
}

pub static INDICATORS: &[Indicator] = &[
    Indicator {
        key: "health",
        title: "財務健康",
        score: 75,
        badge: "優秀",
        items: &[
            check("月收支平衡", CheckStatus::Good),
            check("年收支平衡", CheckStatus::Bad),
            check("資產 > 負債", CheckStatus::Good),
            check("有增加持續性累積非工資收入的能力", CheckStatus::Good),
        ],
    },
    Indicator {
        key: "safety",
        title: "財務安全",
        score: 25,
        badge: "風險",
        items: &[
            check("準備3-6個月支出總金額做為緊急預備金", CheckStatus::Bad),
            check("有基本避險工具", CheckStatus::Good),
            check("有因應未來財務風險的準備", CheckStatus::Bad),
            check("有家庭支持系統 + 信用與社會資源", CheckStatus::Bad),
        ],
    },
];

pub fn indicator(key: &str) -> Option<&'static Indicator> {
    INDICATORS.iter().find(|i| i.key == key)
}
