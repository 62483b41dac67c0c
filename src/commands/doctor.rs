// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TxKind};
use crate::storage::{self, KeyValueStore};
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashSet;

pub fn handle<S: KeyValueStore>(store: &S) -> Result<()> {
    let rows = check(store)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Inspect the raw stored ledger. Each row is `[issue, detail]`.
pub fn check<S: KeyValueStore>(store: &S) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    let txs: Vec<Transaction> = match storage::load_transactions(store) {
        Ok(Some(txs)) => txs,
        Ok(None) => {
            rows.push(vec![
                "ledger_not_saved".into(),
                "seed data is used until the first change".into(),
            ]);
            return Ok(rows);
        }
        Err(err) => {
            rows.push(vec!["unreadable_payload".into(), err.to_string()]);
            return Ok(rows);
        }
    };

    let mut seen = HashSet::new();
    for t in &txs {
        if !seen.insert(t.id) {
            rows.push(vec!["duplicate_id".into(), t.id.to_string()]);
        }
        if t.amount <= Decimal::ZERO {
            rows.push(vec![
                "non_positive_amount".into(),
                format!("#{} {}", t.id, t.amount),
            ]);
        }
        if t.category.trim().is_empty() {
            rows.push(vec!["empty_category".into(), format!("#{}", t.id)]);
        }
        if t.kind == TxKind::Expense && t.platform.is_some() {
            rows.push(vec!["platform_on_expense".into(), format!("#{}", t.id)]);
        }
    }

    let max_id = txs.iter().map(|t| t.id).max().unwrap_or(0);
    match storage::load_next_id(store) {
        Ok(Some(next)) if next <= max_id => {
            rows.push(vec![
                "id_counter_behind".into(),
                format!("next id {} but max stored id {}", next, max_id),
            ]);
        }
        Err(err) => rows.push(vec!["unreadable_id_counter".into(), err.to_string()]),
        _ => {}
    }
    Ok(rows)
}
