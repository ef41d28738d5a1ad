// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

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
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("fincontrol")
        .version(crate_version!())
        .about("Personal income/expense tracking, monthly closings, and savings")
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("auth")
                .about("Manage users and the active session")
                .subcommand(
                    Command::new("signup")
                        .about("Create a user")
                        .arg(Arg::new("username").long("username").required(true))
                        .arg(Arg::new("name").long("name").required(true).help("Display name"))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(
                    Command::new("login")
                        .about("Authenticate and activate a session")
                        .arg(Arg::new("username").long("username").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(Command::new("logout").about("Clear the active session"))
                .subcommand(Command::new("whoami").about("Show the active user")),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["expense", "income"])
                                .default_value("expense"),
                        )
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_negative_numbers(true),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .action(ArgAction::SetTrue)
                                .help("Mark as a monthly recurring expense"),
                        )
                        .arg(
                            Arg::new("until")
                                .long("until")
                                .help("Last month of recurrence (YYYY-MM, inclusive)"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("month").long("month").help("Filter by YYYY-MM"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm").about("Delete a transaction by id").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(clap::value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import expenses from a description;amount;category;date file")
                .arg(Arg::new("path").long("path").required(true)),
        )
        .subcommand(
            Command::new("savings")
                .about("Show or override the savings total")
                .subcommand(Command::new("show").about("Show the current savings total"))
                .subcommand(
                    Command::new("set")
                        .about("Override the savings total")
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_negative_numbers(true),
                        ),
                ),
        )
        .subcommand(
            Command::new("close")
                .about("Close months and roll balances into savings")
                .subcommand(
                    Command::new("month")
                        .about("Close a month (defaults to the current one)")
                        .arg(Arg::new("month").long("month").help("YYYY-MM")),
                )
                .subcommand(Command::new("list").about("List closed months")),
        )
        .subcommand(
            Command::new("report")
                .about("Derived views over the transaction set")
                .subcommand(json_flags(
                    Command::new("monthly").about("Income/expenses/savings per month"),
                ))
                .subcommand(json_flags(
                    Command::new("breakdown")
                        .about("Expenses by category for a month")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to current")),
                ))
                .subcommand(json_flags(
                    Command::new("recurring").about("Projection of active recurring expenses"),
                ))
                .subcommand(json_flags(
                    Command::new("annual")
                        .about("Year totals with a 12-month breakdown")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(clap::value_parser!(i32)),
                        ),
                )),
        )
        .subcommand(
            Command::new("rate")
                .about("USD to BRL reference rate")
                .subcommand(Command::new("fetch").about("Fetch and cache the current rate"))
                .subcommand(Command::new("show").about("Show the cached rate")),
        )
        .subcommand(Command::new("doctor").about("Check stored data against the model invariants"))
}
