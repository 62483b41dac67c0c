// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid stored payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage backend failure: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid transaction: {0}")]
    Validation(String),

    #[error("Transaction {0} not found")]
    NotFound(i64),

    #[error("Failed to persist ledger: {0}")]
    Persistence(#[from] StorageError),
}
