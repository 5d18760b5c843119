// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use nestledger::commands::taxonomy;
use nestledger::models::RecordKind;

#[test]
fn rows_flag_exactly_one_default_group_per_type() {
    for kind in [RecordKind::Income, RecordKind::Expense] {
        let rows = taxonomy::rows(&[kind]);
        assert!(rows.iter().all(|r| r.kind == kind && !r.items.is_empty()));
        assert_eq!(rows.iter().filter(|r| r.is_default).count(), 1);
    }
    let expense_default = taxonomy::rows(&[RecordKind::Expense])
        .into_iter()
        .find(|r| r.is_default)
        .unwrap();
    assert_eq!(expense_default.category, "生活支出");
    assert_eq!(expense_default.group, "生活固定支出");
}

#[test]
fn rows_serialize_type_field() {
    let rows = taxonomy::rows(&[RecordKind::Income]);
    let v = serde_json::to_value(&rows[0]).unwrap();
    assert_eq!(v["type"], "income");
    assert_eq!(v["category"], "月收入");
}
