// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Nestledger", "nestledger"));

/// Overrides the platform data dir location when set.
pub const DB_ENV: &str = "NESTLEDGER_DB";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("nestledger.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    debug!(path = %path.display(), "opening database");
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS sessions(
        name TEXT PRIMARY KEY,
        fund_target TEXT NOT NULL,
        fund_current TEXT NOT NULL,
        saved_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    -- position 0 is the most recent record
    CREATE TABLE IF NOT EXISTS records(
        session TEXT NOT NULL,
        id INTEGER NOT NULL,
        position INTEGER NOT NULL,
        date TEXT NOT NULL,
        title TEXT NOT NULL,
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        note TEXT,
        PRIMARY KEY(session, id),
        FOREIGN KEY(session) REFERENCES sessions(name) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_records_date ON records(session, date);

    CREATE TABLE IF NOT EXISTS dreams(
        session TEXT NOT NULL,
        id INTEGER NOT NULL,
        position INTEGER NOT NULL,
        name TEXT NOT NULL,
        target TEXT NOT NULL,
        completed TEXT NOT NULL,
        icon TEXT NOT NULL CHECK(icon IN ('heart','star','home','book')),
        PRIMARY KEY(session, id),
        FOREIGN KEY(session) REFERENCES sessions(name) ON DELETE CASCADE
    );
    "#,
    )?;
    Ok(())
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn delete_setting(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key=?1", params![key])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_is_idempotent_and_settings_upsert() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
        assert_eq!(get_setting(&conn, "review_time").unwrap(), None);
        set_setting(&conn, "review_time", "20:30").unwrap();
        set_setting(&conn, "review_time", "22:00").unwrap();
        assert_eq!(
            get_setting(&conn, "review_time").unwrap().as_deref(),
            Some("22:00")
        );
        delete_setting(&conn, "review_time").unwrap();
        assert_eq!(get_setting(&conn, "review_time").unwrap(), None);
    }
}
