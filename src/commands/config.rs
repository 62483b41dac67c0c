// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_tax_rate, parse_tax_rate, pretty_table, set_tax_rate};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let rows = vec![vec!["tax_rate".to_string(), get_tax_rate(conn)?.to_string()]];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        Some(("set-tax-rate", sub)) => {
            let raw = sub
                .get_one::<String>("rate")
                .ok_or_else(|| anyhow!("rate is required"))?;
            let rate = parse_tax_rate(raw)?;
            set_tax_rate(conn, rate)?;
            tracing::info!(%rate, "tax rate updated");
            println!("Tax rate set to {}", rate);
        }
        _ => {}
    }
    Ok(())
}
