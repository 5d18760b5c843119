// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use nestledger::{cli, commands::records, db, store};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn record_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["nestledger", "record"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("record", rec_m)) => rec_m.clone(),
        _ => panic!("no record subcommand"),
    }
}

fn add(conn: &mut Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["add"];
    argv.extend_from_slice(args);
    records::handle(conn, "default", &record_matches(&argv))
}

#[test]
fn add_persists_with_category_display() {
    let mut conn = setup();
    add(
        &mut conn,
        &["--item", "食", "--amount", "1,250", "--date", "2025-03-04", "--note", "家庭聚餐"],
    )
    .unwrap();

    let session = store::load(&conn, "default").unwrap();
    assert_eq!(session.records().len(), 1);
    let r = &session.records()[0];
    assert_eq!(r.title, "食");
    assert_eq!(r.category, "生活支出 / 生活變動支出");
    assert_eq!(r.amount, Decimal::from(1250));
    assert_eq!(r.note.as_deref(), Some("家庭聚餐"));
}

#[test]
fn newest_record_comes_first_and_limit_applies() {
    let mut conn = setup();
    for (day, amount) in [("2025-01-01", "10"), ("2025-01-02", "20"), ("2025-01-03", "30")] {
        add(&mut conn, &["--amount", amount, "--date", day]).unwrap();
    }
    let session = store::load(&conn, "default").unwrap();
    let list_m = record_matches(&["list", "--limit", "2"]);
    let Some(("list", sub)) = list_m.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = records::query_rows(&session, sub).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03");
    assert_eq!(rows[0].id, 3);
}

#[test]
fn income_path_resolves_from_category_and_item() {
    let mut conn = setup();
    add(
        &mut conn,
        &[
            "--type",
            "income",
            "--category",
            "月收入",
            "--item",
            "薪資收入",
            "--amount",
            "52000",
            "--date",
            "2025-05-05",
        ],
    )
    .unwrap();
    let session = store::load(&conn, "default").unwrap();
    let r = &session.records()[0];
    assert_eq!(r.category, "月收入 / 生活收入 / 固定收入");
    let day = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
    let s = session.summarize(day);
    assert_eq!(s.income, Decimal::from(52000));
    assert_eq!(s.net, Decimal::from(52000));
}

#[test]
fn group_and_item_pick_the_owning_category() {
    let mut conn = setup();
    add(
        &mut conn,
        &["--item", "還款", "--group", "生活固定支出", "--amount", "100", "--date", "2025-03-01"],
    )
    .unwrap();
    add(&mut conn, &["--item", "還款", "--amount", "200", "--date", "2025-03-01"]).unwrap();
    assert!(
        add(
            &mut conn,
            &["--item", "食", "--group", "生活固定支出", "--amount", "5", "--date", "2025-03-01"],
        )
        .is_err()
    );

    let session = store::load(&conn, "default").unwrap();
    assert_eq!(session.records().len(), 2);
    assert_eq!(session.records()[1].category, "生活支出 / 生活固定支出");
    assert_eq!(session.records()[0].category, "生意支出 / 固定支出");
}

#[test]
fn rejected_add_leaves_store_untouched() {
    let mut conn = setup();
    add(&mut conn, &["--amount", "100", "--date", "2025-02-01"]).unwrap();
    assert!(add(&mut conn, &["--amount", "0", "--date", "2025-02-01"]).is_err());
    assert!(add(&mut conn, &["--amount", "abc", "--date", "2025-02-01"]).is_err());
    assert!(add(&mut conn, &["--amount", "50", "--date", "2025-13-01"]).is_err());
    assert!(add(&mut conn, &["--amount", "50", "--item", "薪資收入"]).is_err());
    let session = store::load(&conn, "default").unwrap();
    assert_eq!(session.records().len(), 1);
}

#[test]
fn day_report_summarizes_mixed_records() {
    let mut conn = setup();
    add(&mut conn, &["--amount", "300", "--date", "2025-04-10"]).unwrap();
    add(
        &mut conn,
        &["--type", "income", "--amount", "1000", "--date", "2025-04-10"],
    )
    .unwrap();
    add(&mut conn, &["--amount", "999", "--date", "2025-04-11"]).unwrap();

    let session = store::load(&conn, "default").unwrap();
    let day = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
    let report = records::day_report(&session, day, day);
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.summary.income, Decimal::from(1000));
    assert_eq!(report.summary.expense, Decimal::from(300));
    assert_eq!(report.summary.net, Decimal::from(700));
    assert_eq!(report.reminder, "今天已完成記帳");

    let empty = NaiveDate::from_ymd_opt(2025, 4, 12).unwrap();
    let report = records::day_report(&session, empty, empty);
    assert!(report.records.is_empty());
    assert_eq!(report.summary.net, Decimal::ZERO);
}

#[test]
fn sessions_are_isolated_by_name() {
    let mut conn = setup();
    add(&mut conn, &["--amount", "10", "--date", "2025-01-01"]).unwrap();
    let m = record_matches(&["add", "--amount", "20", "--date", "2025-01-01"]);
    records::handle(&mut conn, "kids", &m).unwrap();
    assert_eq!(store::load(&conn, "default").unwrap().records().len(), 1);
    let kids = store::load(&conn, "kids").unwrap();
    assert_eq!(kids.records()[0].amount, Decimal::from(20));
}

#[test]
fn review_time_is_validated_and_stored() {
    let mut conn = setup();
    assert_eq!(records::review_time_setting(&conn).unwrap(), "21:00");
    records::handle(&mut conn, "default", &record_matches(&["review-time", "--set", "07:30"]))
        .unwrap();
    assert_eq!(records::review_time_setting(&conn).unwrap(), "07:30");
    assert!(
        records::handle(&mut conn, "default", &record_matches(&["review-time", "--set", "25:00"]))
            .is_err()
    );
    assert_eq!(records::review_time_setting(&conn).unwrap(), "07:30");
}
