// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

pub const DEFAULT_SESSION: &str = "default";

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn date_arg() -> Arg {
    Arg::new("date")
        .long("date")
        .help("Day as YYYY-MM-DD (default: today)")
}

pub fn build_cli() -> Command {
    Command::new("nestledger")
        .version(clap::crate_version!())
        .about("Household record keeping, dream goals, and emergency fund tracker")
        .arg(
            Arg::new("session")
                .long("session")
                .global(true)
                .default_value(DEFAULT_SESSION)
                .help("Name of the stored session to work on"),
        )
        .subcommand(
            Command::new("init")
                .about("Create the session if it does not exist yet")
                .arg(
                    Arg::new("demo")
                        .long("demo")
                        .action(ArgAction::SetTrue)
                        .help("Start from sample dreams and records"),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .action(ArgAction::SetTrue)
                        .help("Overwrite an existing session"),
                ),
        )
        .subcommand(
            Command::new("taxonomy")
                .about("Browse income/expense categories")
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List categories, groups, and items")
                        .arg(Arg::new("type").long("type").help("income|expense")),
                ))
                .subcommand(json_flags(
                    Command::new("defaults").about("Show the default selection per type"),
                )),
        )
        .subcommand(
            Command::new("record")
                .about("Record keeping")
                .subcommand(
                    Command::new("add")
                        .about("Log an income or expense")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .help("income|expense"),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("group").long("group"))
                        .arg(Arg::new("item").long("item"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(date_arg())
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List records, most recent first")
                        .arg(date_arg())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Income, expense, and net for one day")
                        .arg(date_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("calendar")
                        .about("Month view of logged days")
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .help("YYYY-MM (default: current month)"),
                        ),
                ))
                .subcommand(
                    Command::new("review-time")
                        .about("Show or set the daily review reminder time")
                        .arg(Arg::new("set").long("set").help("HH:MM")),
                ),
        )
        .subcommand(
            Command::new("dream")
                .about("Dream savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("completed").long("completed"))
                        .arg(
                            Arg::new("icon")
                                .long("icon")
                                .default_value("heart")
                                .help("heart|star|home|book"),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("target").long("target"))
                        .arg(Arg::new("completed").long("completed"))
                        .arg(Arg::new("icon").long("icon")),
                )
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("fund")
                .about("Emergency fund")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("target").long("target"))
                        .arg(Arg::new("current").long("current")),
                ),
        )
        .subcommand(
            Command::new("overview")
                .about("Dashboard summary")
                .subcommand(json_flags(Command::new("show").arg(date_arg())))
                .subcommand(Command::new("enable").arg(Arg::new("block").required(true)))
                .subcommand(Command::new("disable").arg(Arg::new("block").required(true)))
                .subcommand(Command::new("reset")),
        )
        .subcommand(
            Command::new("export")
                .about("Write session data to a file")
                .subcommand(
                    Command::new("session")
                        .about("Full snapshot as JSON")
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("records")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn session_flag_is_global() {
        let m = build_cli().get_matches_from(["nestledger", "record", "list", "--session", "kids"]);
        assert_eq!(m.get_one::<String>("session").unwrap(), "kids");
        let m = build_cli().get_matches_from(["nestledger", "fund", "show"]);
        assert_eq!(m.get_one::<String>("session").unwrap(), DEFAULT_SESSION);
    }
}
