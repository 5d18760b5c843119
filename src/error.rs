// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reasons a form save is refused. A rejected save never changes state.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordRejected {
    #[error("Amount '{0}' must be a positive number up to 10^15")]
    InvalidAmount(String),
    #[error("Date is required")]
    MissingDate,
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Category, group and item must all be selected")]
    IncompletePath,
    #[error("'{category} / {group} / {item}' is not a {kind} category")]
    UnknownPath {
        kind: String,
        category: String,
        group: String,
        item: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DreamRejected {
    #[error("Dream name cannot be empty")]
    BlankName,
    #[error("Target '{0}' must be a positive number up to 10^15")]
    InvalidTarget(String),
    #[error("Completed amount '{0}' is not a number up to 10^15")]
    InvalidCompleted(String),
    #[error("Dream {0} not found")]
    UnknownDream(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FundRejected {
    #[error("Target '{0}' must be a positive number up to 10^15")]
    InvalidTarget(String),
    #[error("Current amount '{0}' is not a number up to 10^15")]
    InvalidCurrent(String),
}
