// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{DerivedSummary, Transaction, TxKind};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::{BTreeMap, BTreeSet};

pub const HIGH_EXPENSE_RATIO: Decimal = Decimal::from_parts(7, 0, 0, false, 1);
pub const SOFTWARE_SPEND_LIMIT: Decimal = Decimal::from_parts(200, 0, 0, false, 0);
pub const INSURANCE_SUGGESTION_INCOME: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);
pub const MIN_INCOME_PLATFORMS: usize = 2;

type Rule = (fn(&DerivedSummary) -> bool, &'static str);

// Evaluated in order; each rule contributes at most one message.
const RULES: &[Rule] = &[
    (
        high_expense_ratio,
        "Your expenses are over 70% of your income. Look for costs you can cut.",
    ),
    (
        heavy_software_spend,
        "Software spending is above $200. Audit your subscriptions for tools you no longer use.",
    ),
    (
        concentrated_income,
        "Most of your income comes from a single platform. Diversify to reduce risk.",
    ),
    (
        missing_insurance,
        "Income is above $5000 with no insurance expense. Health insurance premiums may be tax deductible.",
    ),
];

fn round_half_up(d: Decimal, dp: u32) -> Decimal {
    d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

fn high_expense_ratio(s: &DerivedSummary) -> bool {
    // A ratio too large to represent is above the limit.
    !s.total_income.is_zero()
        && s.total_expenses
            .checked_div(s.total_income)
            .is_none_or(|ratio| ratio > HIGH_EXPENSE_RATIO)
}

fn heavy_software_spend(s: &DerivedSummary) -> bool {
    s.expenses_by_category
        .get("Software")
        .is_some_and(|amt| *amt > SOFTWARE_SPEND_LIMIT)
}

fn concentrated_income(s: &DerivedSummary) -> bool {
    s.income_platforms.len() < MIN_INCOME_PLATFORMS
}

fn missing_insurance(s: &DerivedSummary) -> bool {
    s.total_income > INSURANCE_SUGGESTION_INCOME && !s.expenses_by_category.contains_key("Insurance")
}

pub fn advise(summary: &DerivedSummary) -> Vec<String> {
    RULES
        .iter()
        .filter(|(applies, _)| applies(summary))
        .map(|(_, msg)| msg.to_string())
        .collect()
}

/// Rebuild every aggregate from scratch. Identical inputs in any order give
/// identical output.
///
/// Sums saturate at `Decimal::MAX`; ratios that do not fit are clamped.
pub fn recompute(txs: &[Transaction], tax_rate: Decimal) -> DerivedSummary {
    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    let mut income_by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut expenses_by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut income_platforms: BTreeSet<String> = BTreeSet::new();

    for t in txs {
        match t.kind {
            TxKind::Income => {
                total_income = total_income.saturating_add(t.amount);
                let slot = income_by_category
                    .entry(t.category.clone())
                    .or_insert(Decimal::ZERO);
                *slot = slot.saturating_add(t.amount);
                if let Some(p) = t.platform.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
                    income_platforms.insert(p.to_string());
                }
            }
            TxKind::Expense => {
                total_expenses = total_expenses.saturating_add(t.amount);
                let slot = expenses_by_category
                    .entry(t.category.clone())
                    .or_insert(Decimal::ZERO);
                *slot = slot.saturating_add(t.amount);
            }
        }
    }

    // Both totals are non-negative, so the difference cannot overflow.
    let net_income = total_income - total_expenses;
    let savings_rate = if total_income.is_zero() {
        Decimal::ZERO
    } else {
        net_income
            .checked_div(total_income)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .map(|r| round_half_up(r, 1))
            .unwrap_or(if net_income.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            })
    };
    let tax_owed = round_half_up(total_income.saturating_mul(tax_rate), 2);
    let quarterly_tax = round_half_up(tax_owed / Decimal::from(4), 2);

    let mut summary = DerivedSummary {
        transaction_count: txs.len(),
        total_income,
        total_expenses,
        net_income,
        savings_rate,
        income_by_category,
        expenses_by_category,
        income_platforms,
        tax_rate,
        tax_owed,
        quarterly_tax,
        advice: Vec::new(),
    };
    summary.advice = advise(&summary);
    summary
}
