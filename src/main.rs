// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use nestledger::{cli, commands, db};

const LOG_ENV: &str = "NESTLEDGER_LOG";

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();
    let session = matches
        .get_one::<String>("session")
        .map(String::as_str)
        .unwrap_or(cli::DEFAULT_SESSION);

    let mut conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", sub)) => {
            if commands::init::handle(&mut conn, session, sub)? {
                println!("Database at {}", db::db_path()?.display());
            }
        }
        Some(("taxonomy", sub)) => commands::taxonomy::handle(sub)?,
        Some(("record", sub)) => commands::records::handle(&mut conn, session, sub)?,
        Some(("dream", sub)) => commands::dreams::handle(&mut conn, session, sub)?,
        Some(("fund", sub)) => commands::fund::handle(&mut conn, session, sub)?,
        Some(("overview", sub)) => commands::overview::handle(&mut conn, session, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, session, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
