// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Expense categories accepted for `type = expense` transactions.
pub const EXPENSE_CATEGORIES: [&str; 11] = [
    "moradia",
    "alimentação",
    "transporte",
    "saúde",
    "educação",
    "lazer",
    "vestuário",
    "assinaturas",
    "contas",
    "investimentos",
    "outros",
];

/// Income categories accepted for `type = income` transactions.
pub const INCOME_CATEGORIES: [&str; 5] =
    ["salário", "freelance", "investimentos", "bônus", "outros"];

/// Fallback category for blank or unrecognized import fields.
pub const DEFAULT_CATEGORY: &str = "outros";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Expense => write!(f, "expense"),
            TransactionType::Income => write!(f, "income"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(TransactionType::Expense),
            "income" => Ok(TransactionType::Income),
            other => Err(anyhow::anyhow!(
                "Invalid transaction type '{}', expected expense|income",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recurrence {
    OneTime,
    Recurring,
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::OneTime => write!(f, "one-time"),
            Recurrence::Recurring => write!(f, "recurring"),
        }
    }
}

impl FromStr for Recurrence {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one-time" => Ok(Recurrence::OneTime),
            "recurring" => Ok(Recurrence::Recurring),
            other => Err(anyhow::anyhow!(
                "Invalid recurrence '{}', expected one-time|recurring",
                other
            )),
        }
    }
}

pub fn categories_for(r#type: TransactionType) -> &'static [&'static str] {
    match r#type {
        TransactionType::Expense => &EXPENSE_CATEGORIES,
        TransactionType::Income => &INCOME_CATEGORIES,
    }
}

pub fn is_valid_category(r#type: TransactionType, category: &str) -> bool {
    categories_for(r#type).contains(&category)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub r#type: TransactionType,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub recurrence: Recurrence,
    /// Inclusive YYYY-MM end of a recurring expense; None means unbounded.
    pub recurrence_end: Option<String>,
    pub created_at: String,
}

/// Transaction as supplied by the caller, before the store assigns
/// an id and creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub r#type: TransactionType,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub recurrence: Recurrence,
    pub recurrence_end: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyClosing {
    pub month: String, // YYYY-MM
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub closed_at: String,
}

/// Authenticated user for the current invocation. Resolved once at
/// startup and passed to every command that touches user data.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    pub display_name: String,
}
