// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn tx_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("category")
            .long("category")
            .short('c')
            .required(required),
    )
    .arg(
        Arg::new("amount")
            .long("amount")
            .short('a')
            .allow_hyphen_values(true)
            .required(required),
    )
    .arg(
        Arg::new("date")
            .long("date")
            .short('d')
            .help("YYYY-MM-DD (defaults to today)"),
    )
    .arg(Arg::new("desc").long("desc").help("Optional description"))
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .about("Terminal client for the Finance Tracker API")
        .version(clap::crate_version!())
        .arg(
            Arg::new("api")
                .long("api")
                .env("FINTRACK_API")
                .global(true)
                .help("Base URL of the Finance Tracker API"),
        )
        .arg(
            Arg::new("currency")
                .long("currency")
                .env("FINTRACK_CURRENCY")
                .global(true)
                .help("Currency symbol prefixed to amounts"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .env("FINTRACK_DATA_DIR")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Where the session credential is kept"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .global(true)
                .value_parser(value_parser!(u64))
                .help("Request timeout in seconds (default: none)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count),
        )
        .subcommand(
            Command::new("login")
                .about("Log in and store the session credential")
                .arg(Arg::new("username").long("username").short('u').required(true))
                .arg(Arg::new("password").long("password").short('p').required(true)),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account and log in")
                .arg(Arg::new("username").long("username").short('u').required(true))
                .arg(Arg::new("email").long("email").short('e').required(true))
                .arg(Arg::new("password").long("password").short('p').required(true)),
        )
        .subcommand(Command::new("logout").about("Forget the stored credential"))
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("list").about("List transactions, newest first")))
                .subcommand(tx_fields(Command::new("add").about("Record a transaction"), true))
                .subcommand(tx_fields(
                    Command::new("edit")
                        .about("Replace a transaction; unspecified fields keep their values")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                    false,
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Balance, monthly limit and budget window")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("balance").long("balance").allow_hyphen_values(true))
                        .arg(Arg::new("limit").long("limit").allow_hyphen_values(true))
                        .arg(Arg::new("start").long("start").help("YYYY-MM-DD, empty to unset"))
                        .arg(Arg::new("end").long("end").help("YYYY-MM-DD, empty to unset")),
                ),
        )
        .subcommand(json_flags(
            Command::new("dashboard").about("Spending summary and category chart"),
        ))
        .subcommand(json_flags(
            Command::new("categories")
                .about("Totals per category")
                .arg(
                    Arg::new("local")
                        .long("local")
                        .action(ArgAction::SetTrue)
                        .help("Sum the fetched transactions instead of using server analytics"),
                ),
        ))
        .subcommand(Command::new("shell").about("Interactive session"))
}
