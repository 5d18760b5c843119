// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use nestledger::commands::{init, overview};
use nestledger::{cli, db, store};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn run(conn: &mut Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["nestledger"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("overview", sub)) => overview::handle(conn, "default", sub),
        Some(("init", sub)) => init::handle(conn, "default", sub).map(|_| ()),
        _ => panic!("unexpected subcommand"),
    }
}

#[test]
fn toggles_persist_and_reset_restores_all() {
    let mut conn = setup();
    run(&mut conn, &["overview", "disable", "dreamGoals"]).unwrap();
    run(&mut conn, &["overview", "disable", "consultShare"]).unwrap();
    let sel = overview::load_selection(&conn).unwrap();
    assert!(!sel.dream_goals && !sel.consult_share);
    assert!(sel.record_keeping && sel.emergency_fund && sel.financial_indicators);

    run(&mut conn, &["overview", "enable", "dreamGoals"]).unwrap();
    assert!(overview::load_selection(&conn).unwrap().dream_goals);

    run(&mut conn, &["overview", "reset"]).unwrap();
    assert_eq!(
        overview::load_selection(&conn).unwrap(),
        overview::OverviewSelection::default()
    );
}

#[test]
fn unknown_block_is_rejected() {
    let mut conn = setup();
    assert!(run(&mut conn, &["overview", "disable", "charts"]).is_err());
    assert_eq!(
        overview::load_selection(&conn).unwrap(),
        overview::OverviewSelection::default()
    );
}

#[test]
fn corrupt_selection_falls_back_to_defaults() {
    let conn = setup();
    db::set_setting(&conn, overview::SELECTION_KEY, "{not json").unwrap();
    assert_eq!(
        overview::load_selection(&conn).unwrap(),
        overview::OverviewSelection::default()
    );
}

#[test]
fn init_demo_seeds_once_unless_forced() {
    let mut conn = setup();
    run(&mut conn, &["init", "--demo"]).unwrap();
    let seeded = store::load(&conn, "default").unwrap();
    assert_eq!(seeded.records().len(), 5);
    assert_eq!(seeded.dreams().len(), 2);

    run(&mut conn, &["init"]).unwrap();
    assert_eq!(store::load(&conn, "default").unwrap().records().len(), 5);

    run(&mut conn, &["init", "--force"]).unwrap();
    let fresh = store::load(&conn, "default").unwrap();
    assert!(fresh.records().is_empty());
    assert!(store::exists(&conn, "default").unwrap());

    let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let ov = overview::build(&fresh, overview::load_selection(&conn).unwrap(), day, day);
    assert_eq!(ov.dream_goals.unwrap().percent, 0);
    assert!(ov.record_keeping.unwrap().records.is_empty());
}
