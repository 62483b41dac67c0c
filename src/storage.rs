// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence bridge between the ledger and an opaque key-value store.
//!
//! The whole transaction list lives under [`LEDGER_KEY`] as one JSON array and
//! is overwritten on every save. The id high-water mark lives next to it under
//! [`NEXT_ID_KEY`].

use crate::error::StorageError;
use crate::models::Transaction;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashMap;

pub const LEDGER_KEY: &str = "ledger.transactions";
pub const NEXT_ID_KEY: &str = "ledger.next_id";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).put(key, value)
    }
}

/// Store backed by the `kv` table of the application database.
pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteStore<'_> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn save_transactions<S: KeyValueStore + ?Sized>(
    store: &mut S,
    txs: &[Transaction],
) -> Result<(), StorageError> {
    let payload = serde_json::to_string(txs)?;
    store.put(LEDGER_KEY, &payload)
}

/// Returns `Ok(None)` when the ledger key has never been written.
pub fn load_transactions<S: KeyValueStore + ?Sized>(
    store: &S,
) -> Result<Option<Vec<Transaction>>, StorageError> {
    match store.get(LEDGER_KEY)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn save_next_id<S: KeyValueStore + ?Sized>(store: &mut S, next_id: i64) -> Result<(), StorageError> {
    store.put(NEXT_ID_KEY, &next_id.to_string())
}

pub fn load_next_id<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<i64>, StorageError> {
    match store.get(NEXT_ID_KEY)? {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|e| StorageError::Backend(format!("Invalid next id '{}': {}", raw, e))),
        None => Ok(None),
    }
}
