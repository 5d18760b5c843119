// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Editable form state for records, dreams and the emergency fund.
//!
//! Forms hold raw text exactly as typed. Parsing happens on save, and a form
//! that fails to parse is rejected without touching the session.

use crate::error::{DreamRejected, FundRejected, RecordRejected};
use crate::models::{Dream, DreamIcon, EmergencyFund, RecordKind};
use crate::session::Session;
use crate::taxonomy::{self, CategoryDefinition, CategoryGroup, CategoryPath};
use crate::utils::parse_amount;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A candidate record as submitted by the entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub kind: RecordKind,
    pub category: String,
    pub group: String,
    pub item: String,
    pub amount: String,
    pub date: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidRecord {
    pub path: CategoryPath,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub note: Option<String>,
}

impl RecordDraft {
    pub fn validate(&self) -> Result<ValidRecord, RecordRejected> {
        let amount = parse_amount(&self.amount)
            .filter(|a| *a > Decimal::ZERO)
            .ok_or_else(|| RecordRejected::InvalidAmount(self.amount.trim().to_string()))?;

        let date_raw = self.date.trim();
        if date_raw.is_empty() {
            return Err(RecordRejected::MissingDate);
        }
        let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
            .map_err(|_| RecordRejected::InvalidDate(date_raw.to_string()))?;

        let (category, group, item) = (self.category.trim(), self.group.trim(), self.item.trim());
        if category.is_empty() || group.is_empty() || item.is_empty() {
            return Err(RecordRejected::IncompletePath);
        }
        let path = taxonomy::resolve(self.kind, category, group, item).ok_or_else(|| {
            RecordRejected::UnknownPath {
                kind: self.kind.to_string(),
                category: category.to_string(),
                group: group.to_string(),
                item: item.to_string(),
            }
        })?;

        let note = Some(self.note.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        Ok(ValidRecord {
            path,
            amount,
            date,
            note,
        })
    }
}

/// The manual-entry dialog: record type plus a cascading
/// category → group → item selection that always stays inside the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordForm {
    kind: RecordKind,
    category: String,
    group: String,
    item: String,
    pub amount: String,
    pub date: String,
    pub note: String,
}

impl RecordForm {
    pub fn open(kind: RecordKind, today: NaiveDate) -> Self {
        let mut form = Self {
            kind,
            category: String::new(),
            group: String::new(),
            item: String::new(),
            amount: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
            note: String::new(),
        };
        form.apply_default(taxonomy::default_path(kind));
        form
    }

    fn apply_default(&mut self, path: Option<CategoryPath>) {
        match path {
            Some(p) => {
                self.category = p.category.to_string();
                self.group = p.group.to_string();
                self.item = p.item.to_string();
            }
            None => {
                self.category.clear();
                self.group.clear();
                self.item.clear();
            }
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    /// Switching type always lands on that type's default path.
    pub fn set_kind(&mut self, kind: RecordKind) {
        self.kind = kind;
        self.apply_default(taxonomy::default_path(kind));
    }

    /// Returns false and leaves the selection alone for an unknown label.
    pub fn set_category(&mut self, label: &str) -> bool {
        match taxonomy::default_path_in(self.kind, label) {
            Some(p) => {
                self.apply_default(Some(p));
                true
            }
            None => false,
        }
    }

    pub fn set_group(&mut self, label: &str) -> bool {
        let Some(grp) = taxonomy::group_of(self.kind, &self.category, label) else {
            return false;
        };
        self.group = grp.label.to_string();
        self.item = grp.default_item().unwrap_or_default().to_string();
        true
    }

    pub fn set_item(&mut self, label: &str) -> bool {
        if !self.item_options().iter().any(|i| *i == label) {
            return false;
        }
        self.item = label.to_string();
        true
    }

    pub fn category_options(&self) -> &'static [CategoryDefinition] {
        taxonomy::categories(self.kind)
    }

    pub fn group_options(&self) -> &'static [CategoryGroup] {
        taxonomy::category(self.kind, &self.category)
            .map(|c| c.groups)
            .unwrap_or(&[])
    }

    pub fn item_options(&self) -> &'static [&'static str] {
        taxonomy::items(self.kind, &self.category, &self.group)
    }

    pub fn draft(&self) -> RecordDraft {
        RecordDraft {
            kind: self.kind,
            category: self.category.clone(),
            group: self.group.clone(),
            item: self.item.clone(),
            amount: self.amount.clone(),
            date: self.date.clone(),
            note: self.note.clone(),
        }
    }

    pub fn can_save(&self) -> bool {
        self.draft().validate().is_ok()
    }

    pub fn submit(&self, session: &Session) -> Result<Session, RecordRejected> {
        session.add_record(&self.draft())
    }
}

fn clamp_to_target(value: Decimal, target: Decimal) -> Decimal {
    value.max(Decimal::ZERO).min(target)
}

/// Empty text counts as zero; anything else must parse.
fn parse_optional_amount(raw: &str) -> Option<Decimal> {
    if raw.trim().is_empty() {
        Some(Decimal::ZERO)
    } else {
        parse_amount(raw)
    }
}

fn parse_target(raw: &str) -> Option<Decimal> {
    parse_amount(raw).filter(|t| *t > Decimal::ZERO)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DreamForm {
    pub name: String,
    pub target: String,
    pub completed: String,
    pub icon: DreamIcon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DreamValues {
    pub name: String,
    pub target: Decimal,
    pub completed: Decimal,
    pub icon: DreamIcon,
}

impl DreamForm {
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            target: String::new(),
            completed: String::new(),
            icon: DreamIcon::Heart,
        }
    }

    pub fn from_dream(dream: &Dream) -> Self {
        Self {
            name: dream.name.clone(),
            target: dream.target.to_string(),
            completed: dream.completed.to_string(),
            icon: dream.icon,
        }
    }

    pub fn parse(&self) -> Result<DreamValues, DreamRejected> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DreamRejected::BlankName);
        }
        let target = parse_target(&self.target)
            .ok_or_else(|| DreamRejected::InvalidTarget(self.target.trim().to_string()))?;
        let completed = parse_optional_amount(&self.completed)
            .ok_or_else(|| DreamRejected::InvalidCompleted(self.completed.trim().to_string()))?;
        Ok(DreamValues {
            name: name.to_string(),
            target,
            completed: clamp_to_target(completed, target),
            icon: self.icon,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundForm {
    pub target: String,
    pub current: String,
}

impl FundForm {
    pub fn from_fund(fund: &EmergencyFund) -> Self {
        Self {
            target: fund.target.to_string(),
            current: fund.current.to_string(),
        }
    }

    pub fn parse(&self) -> Result<EmergencyFund, FundRejected> {
        let target = parse_target(&self.target)
            .ok_or_else(|| FundRejected::InvalidTarget(self.target.trim().to_string()))?;
        let current = parse_optional_amount(&self.current)
            .ok_or_else(|| FundRejected::InvalidCurrent(self.current.trim().to_string()))?;
        Ok(EmergencyFund {
            target,
            current: clamp_to_target(current, target),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn form_opens_on_default_path() {
        let form = RecordForm::open(RecordKind::Expense, today());
        assert_eq!(form.category(), "生活支出");
        assert_eq!(form.group(), "生活固定支出");
        assert_eq!(form.item(), "住");
        assert_eq!(form.date, "2025-06-01");
        assert!(!form.can_save());
    }

    #[test]
    fn switching_type_resets_to_valid_income_path() {
        let mut form = RecordForm::open(RecordKind::Expense, today());
        assert!(form.set_category("年支出"));
        form.set_kind(RecordKind::Income);
        assert_eq!(form.kind(), RecordKind::Income);
        assert!(taxonomy::resolve(RecordKind::Income, form.category(), form.group(), form.item()).is_some());
        assert_eq!(form.item(), "薪資收入");
    }

    #[test]
    fn cascading_selection_stays_valid() {
        let mut form = RecordForm::open(RecordKind::Expense, today());
        assert!(form.set_category("生意支出"));
        assert_eq!(form.group(), "變動支出");
        assert_eq!(form.item(), "原料");
        assert!(form.set_group("固定支出"));
        assert_eq!(form.item(), "租金");
        assert!(form.set_item("水電"));
        assert!(!form.set_item("食"));
        assert_eq!(form.item(), "水電");
        assert!(!form.set_group("生活變動支出"));
        assert!(!form.set_category("月收入"));
        assert_eq!(form.category(), "生意支出");
        assert_eq!(form.group_options().len(), 3);
    }

    #[test]
    fn draft_validation_order() {
        let mut form = RecordForm::open(RecordKind::Expense, today());
        form.amount = "0".into();
        assert_eq!(
            form.draft().validate(),
            Err(RecordRejected::InvalidAmount("0".into()))
        );
        form.amount = "-3".into();
        assert!(matches!(form.draft().validate(), Err(RecordRejected::InvalidAmount(_))));
        form.amount = "85".into();
        form.date = "  ".into();
        assert_eq!(form.draft().validate(), Err(RecordRejected::MissingDate));
        form.date = "2025-13-01".into();
        assert!(matches!(form.draft().validate(), Err(RecordRejected::InvalidDate(_))));
        form.date = "2025-06-01".into();
        form.note = "  早餐 ".into();
        let ok = form.draft().validate().unwrap();
        assert_eq!(ok.amount, Decimal::from(85));
        assert_eq!(ok.note.as_deref(), Some("早餐"));
        assert_eq!(ok.path.display(), "生活支出 / 生活固定支出");
    }

    #[test]
    fn incomplete_and_foreign_paths_rejected() {
        let mut draft = RecordForm::open(RecordKind::Income, today()).draft();
        draft.amount = "10".into();
        draft.item = String::new();
        assert_eq!(draft.validate(), Err(RecordRejected::IncompletePath));
        draft.category = "生活支出".into();
        draft.group = "生活變動支出".into();
        draft.item = "食".into();
        assert!(matches!(draft.validate(), Err(RecordRejected::UnknownPath { .. })));
    }

    #[test]
    fn dream_form_clamps_and_rejects() {
        let mut form = DreamForm::blank();
        assert_eq!(form.parse(), Err(DreamRejected::BlankName));
        form.name = "  新車 ".into();
        form.target = "0".into();
        assert_eq!(form.parse(), Err(DreamRejected::InvalidTarget("0".into())));
        form.target = "1000".into();
        let v = form.parse().unwrap();
        assert_eq!(v.name, "新車");
        assert_eq!(v.completed, Decimal::ZERO);
        form.completed = "5000".into();
        assert_eq!(form.parse().unwrap().completed, Decimal::from(1000));
        form.completed = "-20".into();
        assert_eq!(form.parse().unwrap().completed, Decimal::ZERO);
        form.completed = "lots".into();
        assert_eq!(form.parse(), Err(DreamRejected::InvalidCompleted("lots".into())));
    }

    #[test]
    fn fund_form_clamps_current_to_target() {
        let form = FundForm {
            target: "300000".into(),
            current: "500000".into(),
        };
        let fund = form.parse().unwrap();
        assert_eq!(fund.target, Decimal::from(300_000));
        assert_eq!(fund.current, Decimal::from(300_000));

        let form = FundForm {
            target: "abc".into(),
            current: "1".into(),
        };
        assert_eq!(form.parse(), Err(FundRejected::InvalidTarget("abc".into())));

        let round_trip = FundForm::from_fund(&EmergencyFund::default()).parse().unwrap();
        assert_eq!(round_trip, EmergencyFund::default());
    }
}
