// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod storage;
pub mod utils;

pub use error::{LedgerError, StorageError};
pub use ledger::Ledger;
pub use models::{DerivedSummary, NewTransaction, Transaction, TxKind};
