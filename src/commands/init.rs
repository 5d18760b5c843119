// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::store;
use crate::utils::today;
use anyhow::Result;
use rusqlite::Connection;

/// Returns whether a session was written.
pub fn handle(conn: &mut Connection, name: &str, m: &clap::ArgMatches) -> Result<bool> {
    if store::exists(conn, name)? && !m.get_flag("force") {
        println!("Session '{}' already exists (use --force to replace it)", name);
        return Ok(false);
    }
    let session = if m.get_flag("demo") {
        Session::seeded(today())
    } else {
        Session::default()
    };
    store::save(conn, name, &session)?;
    println!(
        "Session '{}' ready with {} records and {} dreams",
        name,
        session.records().len(),
        session.dreams().len()
    );
    Ok(true)
}
