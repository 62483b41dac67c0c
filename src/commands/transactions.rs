// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::{NewTransaction, Transaction, TxKind};
use crate::storage::KeyValueStore;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table};
use anyhow::{Result, anyhow};
use serde::Serialize;

pub fn handle<S: KeyValueStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn required<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    sub.get_one::<String>(name)
        .ok_or_else(|| anyhow!("--{} is required", name))
}

pub fn candidate_from_args(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let kind: TxKind = required(sub, "type")?.parse().map_err(|e: String| anyhow!(e))?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => Some(parse_date(d)?),
        None => None,
    };
    Ok(NewTransaction {
        kind,
        amount: Some(amount),
        category: required(sub, "category")?.to_string(),
        description: sub.get_one::<String>("description").cloned(),
        date,
        platform: sub.get_one::<String>("platform").cloned(),
    })
}

fn add<S: KeyValueStore>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let tx = ledger.add(candidate_from_args(sub)?)?;
    println!(
        "Recorded {} #{} of {} in '{}' on {}",
        tx.kind, tx.id, tx.amount, tx.category, tx.date
    );
    Ok(())
}

fn rm<S: KeyValueStore>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub
        .get_one::<i64>("id")
        .ok_or_else(|| anyhow!("--id is required"))?;
    let removed = ledger.remove(id)?;
    println!(
        "Removed {} #{} ({} in '{}')",
        removed.kind, removed.id, removed.amount, removed.category
    );
    Ok(())
}

fn list<S: KeyValueStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                let sign = if r.kind == TxKind::Income { "+" } else { "-" };
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.to_string(),
                    format!("{}{:.2}", sign, r.amount),
                    r.category.clone(),
                    r.description.clone(),
                    r.platform.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Amount", "Category", "Description", "Platform"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub date: String,
    pub amount: rust_decimal::Decimal,
    pub category: String,
    pub description: String,
    pub platform: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id,
            kind: t.kind,
            date: t.date.to_string(),
            amount: t.amount,
            category: t.category.clone(),
            description: t.description.clone().unwrap_or_default(),
            platform: t.platform.clone().unwrap_or_default(),
        }
    }
}

/// Filtered view of the ledger, kept in insertion order.
pub fn query_rows<S: KeyValueStore>(
    ledger: &Ledger<S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let kind = match sub.get_one::<String>("type") {
        Some(k) => Some(k.parse::<TxKind>().map_err(|e| anyhow!(e))?),
        None => None,
    };
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month(m)?),
        None => None,
    };
    let category = sub.get_one::<String>("category").map(|c| c.trim());
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    Ok(ledger
        .transactions()
        .iter()
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .filter(|t| category.is_none_or(|c| t.category.eq_ignore_ascii_case(c)))
        .filter(|t| {
            month
                .as_deref()
                .is_none_or(|m| t.date.format("%Y-%m").to_string() == m)
        })
        .take(limit)
        .map(TransactionRow::from)
        .collect())
}
