// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month closing. A (user, month) pair is Open until a closing row
//! exists, then Closed; there is no reopen. Re-closing is allowed and
//! replaces the row: transactions are never frozen by a close, so the
//! new row reflects whatever the month's data sums to at call time.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::models::MonthlyClosing;
use crate::utils::parse_month;

pub fn is_month_closed(conn: &Connection, user_id: i64, month: &str) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM monthly_closings WHERE user_id=?1 AND month=?2",
            params![user_id, month],
            |r| r.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Close `month` for the user: sum its transactions as they stand now,
/// upsert the closing row, and move the savings scalar by the delta
/// against any prior closing of the same month. The whole step runs in
/// one SQLite transaction, so the savings read-modify-write cannot lose
/// an update to a concurrent close.
pub fn close_month(conn: &mut Connection, user_id: i64, month: &str) -> Result<MonthlyClosing> {
    let month = parse_month(month)?;
    let db_tx = conn.transaction()?;

    let (income, expenses) = sum_month(&db_tx, user_id, &month)?;
    let balance = income - expenses;

    let previous_balance = crate::store::get_closing(&db_tx, user_id, &month)?
        .map(|c| c.balance)
        .unwrap_or(Decimal::ZERO);

    db_tx.execute(
        "INSERT INTO monthly_closings(user_id, month, income, expenses, balance, closed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, datetime('now'))
         ON CONFLICT(user_id, month) DO UPDATE SET
             income=excluded.income,
             expenses=excluded.expenses,
             balance=excluded.balance,
             closed_at=excluded.closed_at",
        params![
            user_id,
            &month,
            income.to_string(),
            expenses.to_string(),
            balance.to_string(),
        ],
    )?;

    let savings = crate::store::get_savings(&db_tx, user_id)?;
    crate::store::set_savings(&db_tx, user_id, savings + (balance - previous_balance))?;

    let record = crate::store::get_closing(&db_tx, user_id, &month)?
        .context("Closing record not found on read-back")?;
    db_tx.commit()?;

    Ok(record)
}

fn sum_month(conn: &Connection, user_id: i64, month: &str) -> Result<(Decimal, Decimal)> {
    let mut stmt = conn.prepare(
        "SELECT type, amount FROM transactions WHERE user_id=?1 AND substr(date,1,7)=?2",
    )?;
    let mut rows = stmt.query(params![user_id, month])?;
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let r#type: String = r.get(0)?;
        let amount_s: String = r.get(1)?;
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in transactions", amount_s))?;
        if r#type == "income" {
            income += amount;
        } else {
            expenses += amount;
        }
    }
    Ok((income, expenses))
}
