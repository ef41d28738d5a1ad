// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over the current user's transaction and closing sets.
//! Nothing here touches the store or the clock: the "current" month and
//! target year come from the caller, and every function recomputes from
//! scratch (data volumes are small enough that caching would be noise).

use std::collections::BTreeMap;

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{MonthlyClosing, Recurrence, Transaction, TransactionType};
use crate::utils::split_month;

#[derive(Debug, Clone, Serialize)]
pub struct MonthlySummary {
    pub month: String, // YYYY-MM
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub savings: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecurringProjection {
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub end_month: Option<String>,
    /// Months left after the current one; 0 means the end month is the
    /// current month, -1 means no end date.
    pub months_remaining: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthSlot {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub closed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnualConsolidation {
    pub year: i32,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_balance: Decimal,
    pub months: Vec<MonthSlot>, // always 12 slots, Jan..Dec
}

/// YYYY-MM key of a transaction date. Zero-padded, so lexicographic
/// order is chronological order.
pub fn month_key(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// One summary per month that has at least one transaction, ascending.
pub fn monthly_summaries(txs: &[Transaction]) -> Vec<MonthlySummary> {
    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for tx in txs {
        let entry = map.entry(month_key(tx.date)).or_default();
        match tx.r#type {
            TransactionType::Income => entry.0 += tx.amount,
            TransactionType::Expense => entry.1 += tx.amount,
        }
    }
    map.into_iter()
        .map(|(month, (income, expenses))| MonthlySummary {
            month,
            total_income: income,
            total_expenses: expenses,
            savings: income - expenses,
        })
        .collect()
}

pub fn transactions_in_month<'a>(txs: &'a [Transaction], month: &str) -> Vec<&'a Transaction> {
    txs.iter().filter(|t| month_key(t.date) == month).collect()
}

fn sum_by_type(txs: &[Transaction], month: &str, r#type: TransactionType) -> Decimal {
    txs.iter()
        .filter(|t| t.r#type == r#type && month_key(t.date) == month)
        .map(|t| t.amount)
        .sum()
}

pub fn income_in_month(txs: &[Transaction], month: &str) -> Decimal {
    sum_by_type(txs, month, TransactionType::Income)
}

pub fn expenses_in_month(txs: &[Transaction], month: &str) -> Decimal {
    sum_by_type(txs, month, TransactionType::Expense)
}

/// Per-category expense totals for the given month, descending by amount.
/// Accumulation keeps encounter order so equal totals stay deterministic
/// under the stable sort.
pub fn expenses_by_category(txs: &[Transaction], month: &str) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for tx in txs
        .iter()
        .filter(|t| t.r#type == TransactionType::Expense && month_key(t.date) == month)
    {
        match totals.iter_mut().find(|c| c.category == tx.category) {
            Some(entry) => entry.amount += tx.amount,
            None => totals.push(CategoryTotal {
                category: tx.category.clone(),
                amount: tx.amount,
            }),
        }
    }
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals
}

/// Active recurring expenses with their remaining horizon, in source order.
/// An end month strictly before `current_month` means the obligation has
/// expired and is dropped; no end month yields the -1 sentinel.
pub fn recurring_projections(
    txs: &[Transaction],
    current_month: &str,
) -> Result<Vec<RecurringProjection>> {
    let (now_y, now_m) = split_month(current_month)?;
    let mut out = Vec::new();
    for tx in txs
        .iter()
        .filter(|t| t.recurrence == Recurrence::Recurring && t.r#type == TransactionType::Expense)
    {
        let months_remaining = match &tx.recurrence_end {
            Some(end) => {
                if end.as_str() < current_month {
                    continue;
                }
                let (end_y, end_m) = split_month(end)?;
                ((end_y - now_y) * 12 + (end_m as i32 - now_m as i32 - 1)).max(0)
            }
            None => -1,
        };
        out.push(RecurringProjection {
            description: tx.description.clone(),
            amount: tx.amount,
            category: tx.category.clone(),
            end_month: tx.recurrence_end.clone(),
            months_remaining,
        });
    }
    Ok(out)
}

/// Year totals plus a fixed 12-slot breakdown. Months without activity
/// still get a slot with zero sums; `closed` only reflects an existing
/// closing record.
pub fn annual_consolidation(
    txs: &[Transaction],
    closings: &[MonthlyClosing],
    year: i32,
) -> AnnualConsolidation {
    let mut months = Vec::with_capacity(12);
    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    for m in 1..=12u32 {
        let key = format!("{:04}-{:02}", year, m);
        let income = income_in_month(txs, &key);
        let expenses = expenses_in_month(txs, &key);
        total_income += income;
        total_expenses += expenses;
        months.push(MonthSlot {
            closed: closings.iter().any(|c| c.month == key),
            balance: income - expenses,
            month: key,
            income,
            expenses,
        });
    }
    AnnualConsolidation {
        year,
        total_income,
        total_expenses,
        total_balance: total_income - total_expenses,
        months,
    }
}
