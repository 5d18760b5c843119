// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Load and save whole sessions, keyed by session name.

use crate::models::{Dream, DreamIcon, EmergencyFund, RecordEntry, RecordKind};
use crate::session::{Session, Snapshot};
use crate::utils::parse_date;
use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use tracing::{debug, info};

fn parse_stored_decimal(s: &str, what: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid {} '{}' in database", what, s))
}

pub fn exists(conn: &Connection, name: &str) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM sessions WHERE name=?1", params![name], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(found.is_some())
}

/// Unknown sessions load as an empty default session.
pub fn load(conn: &Connection, name: &str) -> Result<Session> {
    let fund_row: Option<(String, String)> = conn
        .query_row(
            "SELECT fund_target, fund_current FROM sessions WHERE name=?1",
            params![name],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    let Some((target_s, current_s)) = fund_row else {
        debug!(session = name, "no stored session, starting fresh");
        return Ok(Session::default());
    };
    let emergency_fund = EmergencyFund {
        target: parse_stored_decimal(&target_s, "fund target")?,
        current: parse_stored_decimal(&current_s, "fund current")?,
    };

    let mut stmt = conn.prepare(
        "SELECT id, date, title, category, amount, type, note FROM records
         WHERE session=?1 ORDER BY position",
    )?;
    let mut rows = stmt.query(params![name])?;
    let mut records = Vec::new();
    while let Some(r) = rows.next()? {
        let date_s: String = r.get(1)?;
        let amount_s: String = r.get(4)?;
        let kind_s: String = r.get(5)?;
        records.push(RecordEntry {
            id: r.get(0)?,
            date: parse_date(&date_s)?,
            title: r.get(2)?,
            category: r.get(3)?,
            amount: parse_stored_decimal(&amount_s, "record amount")?,
            kind: RecordKind::parse(&kind_s)?,
            note: r.get(6)?,
        });
    }

    let mut stmt = conn.prepare(
        "SELECT id, name, target, completed, icon FROM dreams
         WHERE session=?1 ORDER BY position",
    )?;
    let mut rows = stmt.query(params![name])?;
    let mut dreams = Vec::new();
    while let Some(r) = rows.next()? {
        let target_s: String = r.get(2)?;
        let completed_s: String = r.get(3)?;
        let icon_s: String = r.get(4)?;
        dreams.push(Dream {
            id: r.get(0)?,
            name: r.get(1)?,
            target: parse_stored_decimal(&target_s, "dream target")?,
            completed: parse_stored_decimal(&completed_s, "dream completed")?,
            icon: DreamIcon::parse(&icon_s)?,
        });
    }

    debug!(
        session = name,
        records = records.len(),
        dreams = dreams.len(),
        "session loaded"
    );
    Ok(Session::from_snapshot(Snapshot {
        records,
        dreams,
        emergency_fund,
    }))
}

/// Replace every stored row of `name` with `session` in one transaction.
pub fn save(conn: &mut Connection, name: &str, session: &Session) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM records WHERE session=?1", params![name])?;
    tx.execute("DELETE FROM dreams WHERE session=?1", params![name])?;
    let fund = session.emergency_fund();
    tx.execute(
        "INSERT INTO sessions(name, fund_target, fund_current) VALUES (?1, ?2, ?3)
         ON CONFLICT(name) DO UPDATE SET fund_target=excluded.fund_target,
           fund_current=excluded.fund_current, saved_at=datetime('now')",
        params![name, fund.target.to_string(), fund.current.to_string()],
    )?;
    {
        let mut ins = tx.prepare(
            "INSERT INTO records(session, id, position, date, title, category, amount, type, note)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)",
        )?;
        for (pos, r) in session.records().iter().enumerate() {
            ins.execute(params![
                name,
                r.id,
                pos as i64,
                r.date.to_string(),
                r.title,
                r.category,
                r.amount.to_string(),
                r.kind.as_str(),
                r.note.as_deref()
            ])?;
        }
        let mut ins = tx.prepare(
            "INSERT INTO dreams(session, id, position, name, target, completed, icon)
             VALUES (?1,?2,?3,?4,?5,?6,?7)",
        )?;
        for (pos, d) in session.dreams().iter().enumerate() {
            ins.execute(params![
                name,
                d.id,
                pos as i64,
                d.name,
                d.target.to_string(),
                d.completed.to_string(),
                d.icon.as_str()
            ])?;
        }
    }
    tx.commit()?;
    info!(
        session = name,
        records = session.records().len(),
        dreams = session.dreams().len(),
        "session saved"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;
    use crate::forms::DreamForm;
    use chrono::NaiveDate;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn unknown_session_loads_default() {
        let conn = conn();
        assert!(!exists(&conn, "nobody").unwrap());
        assert_eq!(load(&conn, "nobody").unwrap(), Session::default());
    }

    #[test]
    fn save_then_load_preserves_order_and_counters() {
        let mut conn = conn();
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let s = Session::seeded(today)
            .save_dream(
                None,
                &DreamForm {
                    name: "新家".into(),
                    target: "1000".into(),
                    completed: "10.5".into(),
                    icon: DreamIcon::Home,
                },
            )
            .unwrap();
        save(&mut conn, "home", &s).unwrap();
        assert!(exists(&conn, "home").unwrap());

        let loaded = load(&conn, "home").unwrap();
        assert_eq!(loaded, s);
        assert_eq!(loaded.dreams()[0].name, "新家");
        assert_eq!(loaded.records()[0].title, "早餐");
    }

    #[test]
    fn sessions_are_isolated_and_resave_replaces_rows() {
        let mut conn = conn();
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        save(&mut conn, "a", &Session::seeded(today)).unwrap();
        save(&mut conn, "b", &Session::default()).unwrap();
        save(&mut conn, "a", &Session::seeded(today)).unwrap();

        let a = load(&conn, "a").unwrap();
        assert_eq!(a.records().len(), 5);
        let b = load(&conn, "b").unwrap();
        assert!(b.records().is_empty());
        assert_eq!(b.emergency_fund(), &EmergencyFund::default());
    }
}
