// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::{NewTransaction, TxKind};
use crate::storage::KeyValueStore;
use crate::utils::{parse_date, parse_decimal};
use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;

pub fn handle<S: KeyValueStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(ledger, sub),
        _ => Ok(()),
    }
}

fn optional(rec: &csv::StringRecord, idx: usize) -> Option<String> {
    rec.get(idx)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Columns: type,amount,category,description,date,platform. Rows are added one
/// by one through the ledger; the first invalid row stops the import.
fn import_transactions<S: KeyValueStore>(
    ledger: &mut Ledger<S>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let path = sub
        .get_one::<String>("path")
        .ok_or_else(|| anyhow!("--path is required"))?
        .trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let mut imported = 0usize;
    for (idx, result) in rdr.records().enumerate() {
        let line = idx + 2;
        let rec = result?;
        let kind: TxKind = rec
            .get(0)
            .context("type missing")?
            .parse()
            .map_err(|e: String| anyhow!("Row {}: {}", line, e))?;
        let amount_raw = rec.get(1).context("amount missing")?;
        let amount = parse_decimal(amount_raw).with_context(|| format!("Row {}", line))?;
        let date = match optional(&rec, 4) {
            Some(d) => Some(parse_date(&d).with_context(|| format!("Row {}", line))?),
            None => None,
        };
        let candidate = NewTransaction {
            kind,
            amount: Some(amount),
            category: rec.get(2).unwrap_or("").to_string(),
            description: optional(&rec, 3),
            date,
            platform: optional(&rec, 5),
        };
        ledger
            .add(candidate)
            .with_context(|| format!("Row {} rejected", line))?;
        imported += 1;
    }
    tracing::info!(imported, path, "import finished");
    println!("Imported {} transactions from {}", imported, path);
    Ok(())
}
