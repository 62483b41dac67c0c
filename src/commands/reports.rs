// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::{DerivedSummary, TxKind};
use crate::storage::KeyValueStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle<S: KeyValueStore>(ledger: &Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("categories", sub)) => categories(ledger.summary(), sub)?,
        Some(("advice", sub)) => advice(ledger.summary(), sub)?,
        _ => {}
    }
    Ok(())
}

pub fn summary<S: KeyValueStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let s = ledger.summary();
    if maybe_print_json(sub.get_flag("json"), false, s)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Transactions".into(), s.transaction_count.to_string()],
        vec!["Income".into(), fmt_money(&s.total_income)],
        vec!["Expenses".into(), fmt_money(&s.total_expenses)],
        vec!["Net income".into(), fmt_money(&s.net_income)],
        vec!["Savings rate".into(), format!("{:.1}%", s.savings_rate)],
        vec![
            format!("Tax owed ({}%)", (s.tax_rate * Decimal::ONE_HUNDRED).normalize()),
            fmt_money(&s.tax_owed),
        ],
        vec!["Quarterly payment".into(), fmt_money(&s.quarterly_tax)],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CategoryRow {
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub category: String,
    pub total: Decimal,
}

/// Category totals, income first, each group largest first.
pub fn category_rows(s: &DerivedSummary, only: Option<TxKind>) -> Vec<CategoryRow> {
    let mut out = Vec::new();
    for (kind, map) in [
        (TxKind::Income, &s.income_by_category),
        (TxKind::Expense, &s.expenses_by_category),
    ] {
        if only.is_some_and(|k| k != kind) {
            continue;
        }
        let mut group: Vec<CategoryRow> = map
            .iter()
            .map(|(category, total)| CategoryRow {
                kind,
                category: category.clone(),
                total: *total,
            })
            .collect();
        group.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
        out.extend(group);
    }
    out
}

fn categories(s: &DerivedSummary, sub: &clap::ArgMatches) -> Result<()> {
    let only = match sub.get_one::<String>("type") {
        Some(k) => Some(k.parse::<TxKind>().map_err(|e| anyhow!(e))?),
        None => None,
    };
    let data = category_rows(s, only);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| vec![r.kind.to_string(), r.category.clone(), fmt_money(&r.total)])
            .collect();
        println!("{}", pretty_table(&["Type", "Category", "Total"], rows));
    }
    Ok(())
}

fn advice(s: &DerivedSummary, sub: &clap::ArgMatches) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), false, &s.advice)? {
        return Ok(());
    }
    if s.advice.is_empty() {
        println!("No suggestions right now.");
    } else {
        for (i, msg) in s.advice.iter().enumerate() {
            println!("{}. {}", i + 1, msg);
        }
    }
    Ok(())
}
