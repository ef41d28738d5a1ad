// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Bulk import of pasted expenses, one per line:
//! `description;amount;category;date`. Parsing is all-or-nothing; a bad
//! line aborts the import before anything is written.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use csv::ReaderBuilder;
use rusqlite::Connection;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    is_valid_category, NewTransaction, Recurrence, Session, TransactionType, DEFAULT_CATEGORY,
};
use crate::store;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Line {line}: expected description;amount;category;date, got {got} field(s)")]
    FieldCount { line: usize, got: usize },
    #[error("Line {line}: unreadable record: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("Line {line}: invalid amount '{value}'")]
    Amount { line: usize, value: String },
    #[error("Line {line}: amount must not be negative")]
    NegativeAmount { line: usize },
    #[error("Line {line}: invalid date '{value}', expected YYYY-MM-DD")]
    Date { line: usize, value: String },
}

pub fn handle(conn: &mut Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("path").unwrap().trim();
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Read import file {}", path))?;
    let today = Utc::now().date_naive();
    let txs = parse_lines(&text, today)?;
    if txs.is_empty() {
        println!("Nothing to import");
        return Ok(());
    }
    let count = store::insert_transactions(conn, session.user_id, &txs)?;
    println!("Imported {} transaction(s) from {}", count, path);
    Ok(())
}

/// Parse the paste format. Every row becomes a one-time expense; blank
/// or unrecognized categories fall back to "outros", a blank date means
/// `today`. The first bad line fails the whole batch.
pub fn parse_lines(text: &str, today: NaiveDate) -> Result<Vec<NewTransaction>, ImportError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut out = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let fallback_line = idx + 1;
        let rec = result.map_err(|e| ImportError::Malformed {
            line: fallback_line,
            reason: e.to_string(),
        })?;
        let line = rec
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_line);
        if rec.len() < 4 {
            return Err(ImportError::FieldCount {
                line,
                got: rec.len(),
            });
        }

        let description = rec.get(0).unwrap_or("").to_string();

        let amount_raw = rec.get(1).unwrap_or("");
        let amount = amount_raw
            .replace(',', ".")
            .parse::<Decimal>()
            .map_err(|_| ImportError::Amount {
                line,
                value: amount_raw.to_string(),
            })?;
        if amount.is_sign_negative() {
            return Err(ImportError::NegativeAmount { line });
        }

        let category_raw = rec.get(2).unwrap_or("");
        let category = if is_valid_category(TransactionType::Expense, category_raw) {
            category_raw.to_string()
        } else {
            DEFAULT_CATEGORY.to_string()
        };

        let date_raw = rec.get(3).unwrap_or("");
        let date = if date_raw.is_empty() {
            today
        } else {
            NaiveDate::parse_from_str(date_raw, "%Y-%m-%d").map_err(|_| ImportError::Date {
                line,
                value: date_raw.to_string(),
            })?
        };

        out.push(NewTransaction {
            r#type: TransactionType::Expense,
            description,
            amount,
            category,
            date,
            recurrence: Recurrence::OneTime,
            recurrence_end: None,
        });
    }
    Ok(out)
}
