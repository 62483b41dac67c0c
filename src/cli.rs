// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["income", "expense"])
        .help("Transaction type")
}

pub fn build_cli() -> Command {
    Command::new("gigledger")
        .version(clap::crate_version!())
        .about("Income and expense ledger for gig workers")
        .arg(
            Arg::new("tax_rate")
                .long("tax-rate")
                .global(true)
                .help("Flat tax rate for this run, e.g. 0.25 (overrides the saved setting)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Record, list and remove transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(type_arg().required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                        .arg(
                            Arg::new("platform")
                                .long("platform")
                                .help("Where the income came from, e.g. Upwork"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions in the order they were recorded")
                        .arg(type_arg())
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm").about("Remove a transaction").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("summary")
                .about("Totals, savings rate and tax estimate")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the full summary as JSON"),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Breakdowns and suggestions")
                .subcommand(json_flags(
                    Command::new("categories")
                        .about("Totals per category")
                        .arg(type_arg()),
                ))
                .subcommand(
                    Command::new("advice").about("Rule-based suggestions").arg(
                        Arg::new("json")
                            .long("json")
                            .action(ArgAction::SetTrue),
                    ),
                ),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .required(true)
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("import").about("Import data").subcommand(
                Command::new("transactions")
                    .about("Import a CSV with columns type,amount,category,description,date,platform")
                    .arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-tax-rate")
                        .arg(Arg::new("rate").required(true).help("Between 0 and 1")),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the stored ledger for problems"))
}
