// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger owns the transaction list. Every successful mutation rewrites
//! the whole list through the store and rebuilds the [`DerivedSummary`].

use crate::error::{LedgerError, StorageError};
use crate::metrics;
use crate::models::{DerivedSummary, NewTransaction, Transaction, TxKind};
use crate::storage::{self, KeyValueStore};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

fn seed_date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).expect("seed dates are valid calendar dates")
}

/// Starting data for a ledger that has never been saved.
pub fn seed_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: 1,
            kind: TxKind::Income,
            amount: Decimal::from(1200),
            category: "Freelance".into(),
            description: Some("Web Development Project".into()),
            date: seed_date(3, 1),
            platform: None,
        },
        Transaction {
            id: 2,
            kind: TxKind::Expense,
            amount: Decimal::new(5299, 2),
            category: "Software".into(),
            description: Some("Adobe Creative Suite".into()),
            date: seed_date(3, 2),
            platform: None,
        },
    ]
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub struct Ledger<S: KeyValueStore> {
    store: S,
    transactions: Vec<Transaction>,
    next_id: i64,
    tax_rate: Decimal,
    summary: DerivedSummary,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Load the persisted ledger, falling back to the seed data when nothing
    /// was saved yet or the stored payload cannot be read.
    pub fn open(store: S, tax_rate: Decimal) -> Self {
        let transactions = match storage::load_transactions(&store) {
            Ok(Some(txs)) => {
                debug!(count = txs.len(), "loaded ledger");
                txs
            }
            Ok(None) => {
                info!("no saved ledger, starting from seed data");
                seed_transactions()
            }
            Err(err) => {
                warn!(error = %err, "stored ledger unreadable, starting from seed data");
                seed_transactions()
            }
        };
        let high_water = storage::load_next_id(&store).unwrap_or_else(|err| {
            warn!(error = %err, "stored id counter unreadable, deriving from ledger");
            None
        });
        let max_id = transactions.iter().map(|t| t.id).max().unwrap_or(0);
        // i64::MAX is never issued, so it marks an exhausted id space.
        let next_id = match max_id.checked_add(1) {
            Some(n) => n.max(high_water.unwrap_or(1)),
            None => i64::MAX,
        };
        let summary = metrics::recompute(&transactions, tax_rate);
        Self {
            store,
            transactions,
            next_id,
            tax_rate,
            summary,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn summary(&self) -> &DerivedSummary {
        &self.summary
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn get(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn set_tax_rate(&mut self, tax_rate: Decimal) {
        self.tax_rate = tax_rate;
        self.refresh();
    }

    pub fn add(&mut self, candidate: NewTransaction) -> Result<Transaction, LedgerError> {
        let tx = self.validate(candidate)?;
        let after = self.next_id.checked_add(1).ok_or_else(|| {
            LedgerError::Persistence(StorageError::Backend(
                "transaction id space exhausted".into(),
            ))
        })?;
        // Ids stay burned even if the list write below fails.
        storage::save_next_id(&mut self.store, after)?;
        self.next_id = after;
        self.transactions.push(tx.clone());
        if let Err(err) = self.persist() {
            self.transactions.pop();
            return Err(err);
        }
        self.refresh();
        debug!(id = tx.id, kind = %tx.kind, amount = %tx.amount, "added transaction");
        Ok(tx)
    }

    pub fn remove(&mut self, id: i64) -> Result<Transaction, LedgerError> {
        let pos = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        // The counter must outlive the removed maximum id.
        storage::save_next_id(&mut self.store, self.next_id)?;
        let removed = self.transactions.remove(pos);
        if let Err(err) = self.persist() {
            self.transactions.insert(pos, removed);
            return Err(err);
        }
        self.refresh();
        debug!(id, "removed transaction");
        Ok(removed)
    }

    fn validate(&self, c: NewTransaction) -> Result<Transaction, LedgerError> {
        let amount = c
            .amount
            .ok_or_else(|| LedgerError::Validation("amount is required".into()))?;
        if amount <= Decimal::ZERO {
            return Err(LedgerError::Validation(format!(
                "amount must be positive, got {}",
                amount
            )));
        }
        let running = match c.kind {
            TxKind::Income => self.summary.total_income,
            TxKind::Expense => self.summary.total_expenses,
        };
        if running.checked_add(amount).is_none() {
            return Err(LedgerError::Validation(format!(
                "amount {} would overflow the {} total",
                amount, c.kind
            )));
        }
        let category = c.category.trim();
        if category.is_empty() {
            return Err(LedgerError::Validation("category is required".into()));
        }
        let platform = match c.kind {
            TxKind::Income => non_empty(c.platform),
            TxKind::Expense => None,
        };
        Ok(Transaction {
            id: self.next_id,
            kind: c.kind,
            amount,
            category: category.to_string(),
            description: non_empty(c.description),
            date: c
                .date
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
            platform,
        })
    }

    fn persist(&mut self) -> Result<(), LedgerError> {
        storage::save_transactions(&mut self.store, &self.transactions)?;
        Ok(())
    }

    fn refresh(&mut self) {
        self.summary = metrics::recompute(&self.transactions, self.tax_rate);
    }
}
