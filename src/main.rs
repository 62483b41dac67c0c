// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use gigledger::{cli, commands, db, logging, storage::SqliteStore, utils};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    logging::init(matches.get_flag("verbose"));

    let tax_override = match matches.get_one::<String>("tax_rate") {
        Some(raw) => Some(utils::parse_tax_rate(raw)?),
        None => None,
    };

    let conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => {
            let mut ledger = utils::open_ledger(&conn, tax_override)?;
            commands::transactions::handle(&mut ledger, sub)?;
        }
        Some(("summary", sub)) => {
            let ledger = utils::open_ledger(&conn, tax_override)?;
            commands::reports::summary(&ledger, sub)?;
        }
        Some(("report", sub)) => {
            let ledger = utils::open_ledger(&conn, tax_override)?;
            commands::reports::handle(&ledger, sub)?;
        }
        Some(("export", sub)) => {
            let ledger = utils::open_ledger(&conn, tax_override)?;
            commands::exporter::handle(&ledger, sub)?;
        }
        Some(("import", sub)) => {
            let mut ledger = utils::open_ledger(&conn, tax_override)?;
            commands::importer::handle(&mut ledger, sub)?;
        }
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&SqliteStore::new(&conn))?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
