// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::storage::SqliteStore;
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_tax_rate(s: &str) -> Result<Decimal> {
    let rate = parse_decimal(s)?;
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(anyhow!("Tax rate {} out of range, expected 0..=1", rate));
    }
    Ok(rate)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("${:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn get_tax_rate(conn: &Connection) -> Result<Decimal> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key='tax_rate'", [], |r| {
            r.get(0)
        })
        .optional()?;
    match v {
        Some(s) => parse_tax_rate(&s).context("Stored tax_rate setting is invalid"),
        None => Ok(DEFAULT_TAX_RATE),
    }
}

pub fn set_tax_rate(conn: &Connection, rate: Decimal) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('tax_rate', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![rate.to_string()],
    )?;
    Ok(())
}

/// Open the ledger stored in `conn`. `tax_override` wins over the saved setting.
pub fn open_ledger(conn: &Connection, tax_override: Option<Decimal>) -> Result<Ledger<SqliteStore<'_>>> {
    let rate = match tax_override {
        Some(r) => r,
        None => get_tax_rate(conn)?,
    };
    Ok(Ledger::open(SqliteStore::new(conn), rate))
}
