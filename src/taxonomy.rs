// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The fixed income/expense classification tree.
//!
//! Three levels: a record type owns categories, a category owns groups, a
//! group owns leaf items. Default selection is driven by `is_default` flags on
//! categories and groups; when none is flagged the first entry wins.

use crate::models::RecordKind;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub label: &'static str,
    pub is_default: bool,
    pub items: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryDefinition {
    pub label: &'static str,
    pub is_default: bool,
    pub groups: &'static [CategoryGroup],
}

/// A complete type/category/group/item choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPath {
    pub kind: RecordKind,
    pub category: &'static str,
    pub group: &'static str,
    pub item: &'static str,
}

impl CategoryPath {
    /// Display string stored on a record.
    pub fn display(&self) -> String {
        format!("{} / {}", self.category, self.group)
    }
}

const fn group(
    label: &'static str,
    is_default: bool,
    items: &'static [&'static str],
) -> CategoryGroup {
    CategoryGroup {
        label,
        is_default,
        items,
    }
}

static INCOME: &[CategoryDefinition] = &[
    CategoryDefinition {
        label: "月收入",
        is_default: false,
        groups: &[
            group("生意收入 / 主要營業收入", false, &["商品銷售收入", "服務提供收入"]),
            group(
                "生意收入 / 其他營業收入",
                false,
                &["二手設備出售", "場地出租", "合作分潤", "其他創業相關收入"],
            ),
            group(
                "生活收入 / 固定收入",
                true,
                &["薪資收入", "租金收入", "定期投資收益", "退休金/年金", "政府定期補助"],
            ),
            group(
                "生活收入 / 變動收入",
                true,
                &["副業收入", "臨時性工作", "利息收入", "親友贈與", "其他生活收入"],
            ),
        ],
    },
    CategoryDefinition {
        label: "年度收入",
        is_default: false,
        groups: &[
            group("生意年度收入 / 年度業績", false, &["年度銷售總額", "特殊季節營收"]),
            group("生意年度收入 / 年度專案收入", false, &["大型專案", "長期合約"]),
            group(
                "生意年度收入 / 其他年度收入",
                false,
                &["政府補助", "投資收益", "其他"],
            ),
            group("生活年度收入 / 固定年收入", true, &["年度薪酬"]),
            group(
                "生活年度收入 / 投資收益",
                true,
                &["股票收益", "基金收益", "其他投資收益"],
            ),
            group("生活年度收入 / 政府補助/津貼", true, &["年度政府補助總額"]),
            group(
                "生活年度收入 / 非經常性收入",
                true,
                &["遺產繼承", "資產出售", "獎金或獎項", "其他偶發性收入"],
            ),
            group(
                "生活年度收入 / 其他",
                true,
                &["年度親友贈與總額", "其他無法歸類的年度收入來源"],
            ),
        ],
    },
];

static EXPENSE: &[CategoryDefinition] = &[
    CategoryDefinition {
        label: "生意支出",
        is_default: false,
        groups: &[
            group("變動支出", false, &["原料", "包材", "耗材", "運費", "變動其他"]),
            group(
                "固定支出",
                false,
                &["租金", "人事", "水電", "瓦斯", "通訊", "還款", "固定其他"],
            ),
            group(
                "額外支出",
                false,
                &["設備添購", "器材修繕", "行銷廣告", "額外其他"],
            ),
        ],
    },
    CategoryDefinition {
        label: "生活支出",
        is_default: true,
        groups: &[
            group(
                "生活固定支出",
                true,
                &["住", "電信", "還款", "保險(月繳)", "儲蓄"],
            ),
            group(
                "生活變動支出",
                true,
                &["食", "衣", "行", "育", "樂", "醫療", "其他"],
            ),
        ],
    },
    CategoryDefinition {
        label: "年支出",
        is_default: false,
        groups: &[
            group("生意年度支出 / 稅金", false, &["營業稅", "營所稅"]),
            group(
                "生意年度支出 / 保險費(年繳)",
                false,
                &["商業火災保險", "公共意外責任險", "產品責任險", "員工團體保險"],
            ),
            group("生意年度支出 / 年度設備汰換", false, &["設備升級"]),
            group("生意年度支出 / 員工福利", false, &["年終獎金", "員工旅遊"]),
            group("生意年度支出 / 教育訓練", false, &["教育訓練"]),
            group(
                "生意年度支出 / 其他",
                false,
                &["年度盤點損耗", "特殊專案支出"],
            ),
            group(
                "生活年度支出 / 稅金",
                true,
                &["綜合所得稅", "房屋稅", "地價稅"],
            ),
            group("生活年度支出 / 保險費(年繳)", true, &["年度保險總額"]),
            group(
                "生活年度支出 / 教育費用",
                true,
                &["學雜費", "補習費", "教材費"],
            ),
            group(
                "生活年度支出 / 年度計劃性支出",
                true,
                &["家庭旅遊", "節慶開支", "家電更新", "裝修費用"],
            ),
            group(
                "生活年度支出 / 投資與理財",
                true,
                &["定期投資", "子女教育基金", "退休金準備"],
            ),
            group(
                "生活年度支出 / 其他",
                true,
                &["計劃外重大支出", "特殊紀念活動", "捐贈與公益"],
            ),
        ],
    },
];

pub fn categories(kind: RecordKind) -> &'static [CategoryDefinition] {
    match kind {
        RecordKind::Income => INCOME,
        RecordKind::Expense => EXPENSE,
    }
}

pub fn category(kind: RecordKind, label: &str) -> Option<&'static CategoryDefinition> {
    categories(kind).iter().find(|c| c.label == label)
}

pub fn group_of(
    kind: RecordKind,
    category_label: &str,
    group_label: &str,
) -> Option<&'static CategoryGroup> {
    category(kind, category_label)?
        .groups
        .iter()
        .find(|g| g.label == group_label)
}

pub fn items(kind: RecordKind, category_label: &str, group_label: &str) -> &'static [&'static str] {
    group_of(kind, category_label, group_label)
        .map(|g| g.items)
        .unwrap_or(&[])
}

impl CategoryDefinition {
    pub fn default_group(&self) -> Option<&'static CategoryGroup> {
        self.groups
            .iter()
            .find(|g| g.is_default)
            .or_else(|| self.groups.first())
    }
}

impl CategoryGroup {
    pub fn default_item(&self) -> Option<&'static str> {
        self.items.first().copied()
    }
}

pub fn default_category(kind: RecordKind) -> Option<&'static CategoryDefinition> {
    let cats = categories(kind);
    cats.iter().find(|c| c.is_default).or_else(|| cats.first())
}

/// Default path inside one category: its default group and that group's first item.
pub fn default_path_in(kind: RecordKind, category_label: &str) -> Option<CategoryPath> {
    let cat = category(kind, category_label)?;
    let grp = cat.default_group()?;
    Some(CategoryPath {
        kind,
        category: cat.label,
        group: grp.label,
        item: grp.default_item()?,
    })
}

pub fn default_path(kind: RecordKind) -> Option<CategoryPath> {
    default_path_in(kind, default_category(kind)?.label)
}

/// Resolve labels into a path that exists in the table.
pub fn resolve(kind: RecordKind, category_label: &str, group_label: &str, item: &str) -> Option<CategoryPath> {
    let cat = category(kind, category_label)?;
    let grp = cat.groups.iter().find(|g| g.label == group_label)?;
    let item = grp.items.iter().find(|i| **i == item).copied()?;
    Some(CategoryPath {
        kind,
        category: cat.label,
        group: grp.label,
        item,
    })
}

/// Locate a leaf item by name alone. The first match in table order wins since
/// some names ("還款", "其他") appear under more than one group.
pub fn find_item(kind: RecordKind, item: &str) -> Option<CategoryPath> {
    categories(kind).iter().find_map(|cat| {
        cat.groups.iter().find_map(|grp| {
            grp.items.iter().find(|i| **i == item).map(|i| CategoryPath {
                kind,
                category: cat.label,
                group: grp.label,
                item: *i,
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_match_life_preference() {
        let inc = default_path(RecordKind::Income).unwrap();
        assert_eq!(inc.category, "月收入");
        assert_eq!(inc.group, "生活收入 / 固定收入");
        assert_eq!(inc.item, "薪資收入");

        let exp = default_path(RecordKind::Expense).unwrap();
        assert_eq!(exp.category, "生活支出");
        assert_eq!(exp.group, "生活固定支出");
        assert_eq!(exp.item, "住");
    }

    #[test]
    fn category_defaults_fall_back_to_first_group() {
        let p = default_path_in(RecordKind::Expense, "生意支出").unwrap();
        assert_eq!(p.group, "變動支出");
        assert_eq!(p.item, "原料");

        let p = default_path_in(RecordKind::Income, "年度收入").unwrap();
        assert_eq!(p.group, "生活年度收入 / 固定年收入");

        let p = default_path_in(RecordKind::Expense, "年支出").unwrap();
        assert_eq!(p.group, "生活年度支出 / 稅金");
    }

    #[test]
    fn every_category_has_a_valid_default() {
        for kind in [RecordKind::Income, RecordKind::Expense] {
            for cat in categories(kind) {
                let p = default_path_in(kind, cat.label).unwrap();
                assert!(resolve(kind, p.category, p.group, p.item).is_some());
            }
        }
    }

    #[test]
    fn lookups_preserve_table_order() {
        let labels: Vec<_> = categories(RecordKind::Expense).iter().map(|c| c.label).collect();
        assert_eq!(labels, ["生意支出", "生活支出", "年支出"]);
        assert_eq!(
            items(RecordKind::Expense, "生活支出", "生活變動支出"),
            &["食", "衣", "行", "育", "樂", "醫療", "其他"]
        );
        assert!(items(RecordKind::Income, "生活支出", "生活變動支出").is_empty());
    }

    #[test]
    fn resolve_rejects_paths_across_types() {
        assert!(resolve(RecordKind::Income, "生活支出", "生活固定支出", "住").is_none());
        assert!(resolve(RecordKind::Expense, "生活支出", "生活固定支出", "食").is_none());
    }

    #[test]
    fn find_item_takes_first_occurrence() {
        let p = find_item(RecordKind::Expense, "還款").unwrap();
        assert_eq!(p.category, "生意支出");
        assert_eq!(p.group, "固定支出");
        assert_eq!(p.display(), "生意支出 / 固定支出");
        assert!(find_item(RecordKind::Expense, "薪資收入").is_none());
    }
}
