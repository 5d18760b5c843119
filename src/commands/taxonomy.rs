// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::RecordKind;
use crate::taxonomy::{self, CategoryPath};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(sub)?,
        Some(("defaults", sub)) => defaults(sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TaxonomyRow {
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub category: &'static str,
    pub group: &'static str,
    pub items: Vec<&'static str>,
    pub is_default: bool,
}

pub fn rows(kinds: &[RecordKind]) -> Vec<TaxonomyRow> {
    let mut out = Vec::new();
    for &kind in kinds {
        let default = taxonomy::default_path(kind);
        for cat in taxonomy::categories(kind) {
            for grp in cat.groups {
                out.push(TaxonomyRow {
                    kind,
                    category: cat.label,
                    group: grp.label,
                    items: grp.items.to_vec(),
                    is_default: default
                        .as_ref()
                        .is_some_and(|p| p.category == cat.label && p.group == grp.label),
                });
            }
        }
    }
    out
}

fn list(sub: &clap::ArgMatches) -> Result<()> {
    let kinds = match sub.get_one::<String>("type") {
        Some(t) => vec![RecordKind::parse(t)?],
        None => vec![RecordKind::Income, RecordKind::Expense],
    };
    let data = rows(&kinds);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let table: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.kind.label().to_string(),
                    r.category.to_string(),
                    if r.is_default {
                        format!("{} *", r.group)
                    } else {
                        r.group.to_string()
                    },
                    r.items.join("、"),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Type", "Category", "Group", "Items"], table)
        );
    }
    Ok(())
}

fn defaults(sub: &clap::ArgMatches) -> Result<()> {
    let mut data: Vec<CategoryPath> = Vec::new();
    for kind in [RecordKind::Income, RecordKind::Expense] {
        data.push(
            taxonomy::default_path(kind)
                .with_context(|| format!("No categories defined for {}", kind))?,
        );
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let table = data
            .iter()
            .map(|p| {
                vec![
                    p.kind.label().to_string(),
                    p.category.to_string(),
                    p.group.to_string(),
                    p.item.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Type", "Category", "Group", "Item"], table)
        );
    }
    Ok(())
}
