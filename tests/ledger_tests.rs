// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use gigledger::storage::{self, KeyValueStore, MemoryStore, LEDGER_KEY, NEXT_ID_KEY};
use gigledger::{Ledger, LedgerError, NewTransaction, StorageError, TxKind};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
}

/// Accepts reads, refuses writes once `fail` is set.
struct FlakyStore {
    inner: MemoryStore,
    fail: bool,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Backend("disk full".into()));
        }
        self.inner.put(key, value)
    }
}

#[test]
fn first_run_starts_from_seed() {
    let ledger = Ledger::open(MemoryStore::new(), dec!(0.25));
    let txs = ledger.transactions();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].kind, TxKind::Income);
    assert_eq!(txs[0].amount, dec!(1200));
    assert_eq!(txs[1].category, "Software");
    assert_eq!(ledger.summary().net_income, dec!(1147.01));
    // opening alone does not write anything
    assert!(ledger.store().get(LEDGER_KEY).unwrap().is_none());
}

#[test]
fn add_then_reload_reproduces_record() {
    let mut ledger = Ledger::open(MemoryStore::new(), dec!(0.25));
    let added = ledger
        .add(
            NewTransaction::new(TxKind::Income, dec!(450.75), " Design ")
                .description("Logo for bakery")
                .date(day(3))
                .platform("Upwork"),
        )
        .unwrap();
    assert_eq!(added.id, 3);
    assert_eq!(added.category, "Design");

    let reopened = Ledger::open(ledger.into_store(), dec!(0.25));
    let txs = reopened.transactions();
    assert_eq!(txs.len(), 3);
    assert_eq!(txs.last(), Some(&added));
    assert_eq!(txs.iter().filter(|t| t.id == added.id).count(), 1);
}

#[test]
fn add_appends_in_insertion_order() {
    let mut ledger = Ledger::open(MemoryStore::new(), dec!(0.25));
    ledger
        .add(NewTransaction::new(TxKind::Expense, dec!(10), "Travel").date(day(20)))
        .unwrap();
    ledger
        .add(NewTransaction::new(TxKind::Expense, dec!(5), "Food").date(day(1)))
        .unwrap();
    let cats: Vec<&str> = ledger
        .transactions()
        .iter()
        .map(|t| t.category.as_str())
        .collect();
    assert_eq!(cats, vec!["Freelance", "Software", "Travel", "Food"]);
}

#[test]
fn zero_amount_is_rejected_and_ledger_unchanged() {
    let mut ledger = Ledger::open(MemoryStore::new(), dec!(0.25));
    let before = ledger.transactions().to_vec();
    let err = ledger
        .add(NewTransaction::new(TxKind::Expense, Decimal::ZERO, "Software"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert_eq!(ledger.transactions(), before.as_slice());
    assert!(ledger.store().get(LEDGER_KEY).unwrap().is_none());
}

#[test]
fn missing_amount_negative_amount_and_blank_category_are_rejected() {
    let mut ledger = Ledger::open(MemoryStore::new(), dec!(0.25));
    let mut no_amount = NewTransaction::new(TxKind::Income, dec!(1), "Design");
    no_amount.amount = None;
    assert!(matches!(ledger.add(no_amount), Err(LedgerError::Validation(_))));
    assert!(matches!(
        ledger.add(NewTransaction::new(TxKind::Income, dec!(-3), "Design")),
        Err(LedgerError::Validation(_))
    ));
    assert!(matches!(
        ledger.add(NewTransaction::new(TxKind::Income, dec!(3), "   ")),
        Err(LedgerError::Validation(_))
    ));
    assert_eq!(ledger.transactions().len(), 2);
}

#[test]
fn expense_platform_is_dropped_and_blank_text_becomes_none() {
    let mut ledger = Ledger::open(MemoryStore::new(), dec!(0.25));
    let t = ledger
        .add(
            NewTransaction::new(TxKind::Expense, dec!(12), "Fees")
                .platform("Upwork")
                .description("  "),
        )
        .unwrap();
    assert_eq!(t.platform, None);
    assert_eq!(t.description, None);
}

#[test]
fn remove_deletes_and_persists() {
    let mut ledger = Ledger::open(MemoryStore::new(), dec!(0.25));
    let removed = ledger.remove(2).unwrap();
    assert_eq!(removed.category, "Software");
    assert_eq!(ledger.summary().total_expenses, Decimal::ZERO);

    let reopened = Ledger::open(ledger.into_store(), dec!(0.25));
    assert!(reopened.get(2).is_none());
    assert_eq!(reopened.transactions().len(), 1);
}

#[test]
fn removing_unknown_id_reports_not_found() {
    let mut ledger = Ledger::open(MemoryStore::new(), dec!(0.25));
    let err = ledger.remove(99).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(99)));
    assert_eq!(ledger.transactions().len(), 2);
}

#[test]
fn ids_are_never_reused() {
    let mut store = MemoryStore::new();
    {
        let mut ledger = Ledger::open(&mut store, dec!(0.25));
        let a = ledger
            .add(NewTransaction::new(TxKind::Income, dec!(1), "Tips"))
            .unwrap();
        ledger.remove(a.id).unwrap();
        let b = ledger
            .add(NewTransaction::new(TxKind::Income, dec!(2), "Tips"))
            .unwrap();
        assert_eq!((a.id, b.id), (3, 4));
        ledger.remove(b.id).unwrap();
    }
    let mut ledger = Ledger::open(&mut store, dec!(0.25));
    let c = ledger
        .add(NewTransaction::new(TxKind::Income, dec!(3), "Tips"))
        .unwrap();
    assert_eq!(c.id, 5);
}

#[test]
fn summary_follows_every_mutation() {
    let mut ledger = Ledger::open(MemoryStore::new(), dec!(0.25));
    ledger
        .add(NewTransaction::new(TxKind::Income, dec!(800), "Design").platform("Fiverr"))
        .unwrap();
    assert_eq!(ledger.summary().total_income, dec!(2000));
    assert_eq!(ledger.summary().tax_owed, dec!(500.00));
    ledger.remove(1).unwrap();
    assert_eq!(ledger.summary().total_income, dec!(800));
    ledger.set_tax_rate(dec!(0.1));
    assert_eq!(ledger.summary().tax_owed, dec!(80.00));
    assert_eq!(ledger.tax_rate(), dec!(0.1));
}

#[test]
fn corrupt_payload_falls_back_to_seed() {
    let mut store = MemoryStore::new();
    store.put(LEDGER_KEY, "{not json").unwrap();
    let ledger = Ledger::open(store, dec!(0.25));
    assert_eq!(ledger.transactions().len(), 2);
    assert_eq!(ledger.transactions()[0].category, "Freelance");
}

#[test]
fn failed_write_is_surfaced_and_rolled_back() {
    let mut ledger = Ledger::open(
        FlakyStore {
            inner: MemoryStore::new(),
            fail: false,
        },
        dec!(0.25),
    );
    ledger
        .add(NewTransaction::new(TxKind::Income, dec!(100), "Design"))
        .unwrap();
    let mut store = ledger.into_store();
    store.fail = true;

    let mut ledger = Ledger::open(store, dec!(0.25));
    let err = ledger
        .add(NewTransaction::new(TxKind::Income, dec!(5), "Tips"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Persistence(_)));
    assert!(matches!(ledger.remove(1), Err(LedgerError::Persistence(_))));
    assert_eq!(ledger.transactions().len(), 3);
    assert_eq!(ledger.summary().total_income, dec!(1300));
}

#[test]
fn persisted_list_keeps_optional_fields_as_null() {
    let mut ledger = Ledger::open(MemoryStore::new(), dec!(0.25));
    ledger
        .add(NewTransaction::new(TxKind::Expense, dec!(9.5), "Food").date(day(2)))
        .unwrap();
    let raw = ledger.store().get(LEDGER_KEY).unwrap().unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let last = &v.as_array().unwrap()[2];
    assert_eq!(last["type"], "expense");
    assert_eq!(last["amount"], "9.5");
    assert_eq!(last["date"], "2025-04-02");
    assert!(last["description"].is_null());
    assert!(last["platform"].is_null());
    assert_eq!(
        storage::load_transactions(ledger.store()).unwrap().unwrap(),
        ledger.transactions()
    );
}

#[test]
fn seed_rows_carry_their_calendar_dates() {
    let ledger = Ledger::open(MemoryStore::new(), dec!(0.25));
    let dates: Vec<String> = ledger
        .transactions()
        .iter()
        .map(|t| t.date.to_string())
        .collect();
    assert_eq!(dates, vec!["2025-03-01", "2025-03-02"]);
}

#[test]
fn extreme_amounts_keep_ledger_openable() {
    let mut store = MemoryStore::new();
    {
        let mut ledger = Ledger::open(&mut store, dec!(0.25));
        ledger.remove(1).unwrap();
        ledger.remove(2).unwrap();
        ledger
            .add(NewTransaction::new(TxKind::Income, dec!(0.00000001), "Tips"))
            .unwrap();
        let huge = Decimal::from_i128_with_scale(10_i128.pow(25), 0);
        ledger
            .add(NewTransaction::new(TxKind::Expense, huge, "Equipment"))
            .unwrap();
        assert_eq!(ledger.summary().savings_rate, Decimal::MIN);
        assert!(ledger.summary().advice.iter().any(|m| m.contains("70%")));
    }

    let mut ledger = Ledger::open(&mut store, dec!(0.25));
    assert_eq!(ledger.transactions().len(), 2);
    let err = ledger
        .add(NewTransaction::new(TxKind::Expense, Decimal::MAX, "Equipment"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert_eq!(ledger.transactions().len(), 2);
}

#[test]
fn overflowing_income_is_rejected_before_saving() {
    let mut ledger = Ledger::open(MemoryStore::new(), dec!(0.25));
    ledger
        .add(NewTransaction::new(TxKind::Income, Decimal::MAX - dec!(1200), "Windfall"))
        .unwrap();
    let saved = ledger.store().get(LEDGER_KEY).unwrap();
    let err = ledger
        .add(NewTransaction::new(TxKind::Income, dec!(1), "Tips"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert_eq!(ledger.store().get(LEDGER_KEY).unwrap(), saved);
    assert_eq!(ledger.summary().total_income, Decimal::MAX);
}

#[test]
fn exhausted_id_space_is_reported_not_panicked() {
    let mut store = MemoryStore::new();
    store
        .put(
            LEDGER_KEY,
            &format!(
                r#"[{{"id":{},"type":"income","amount":"10","category":"A","description":null,"date":"2025-01-01","platform":null}}]"#,
                i64::MAX
            ),
        )
        .unwrap();
    let mut ledger = Ledger::open(store, dec!(0.25));
    let err = ledger
        .add(NewTransaction::new(TxKind::Income, dec!(1), "Tips"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Persistence(_)));
    assert_eq!(ledger.transactions().len(), 1);

    let mut store = MemoryStore::new();
    store.put(NEXT_ID_KEY, &i64::MAX.to_string()).unwrap();
    let mut ledger = Ledger::open(store, dec!(0.25));
    assert!(matches!(
        ledger.add(NewTransaction::new(TxKind::Income, dec!(1), "Tips")),
        Err(LedgerError::Persistence(_))
    ));
    assert_eq!(ledger.transactions().len(), 2);
}
