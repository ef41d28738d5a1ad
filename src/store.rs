// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence collaborator. Every read and write is scoped by the
//! owning user's id; amounts travel as TEXT and are parsed to Decimal
//! on the way out, like every other numeric column in the schema.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::models::{MonthlyClosing, NewTransaction, Transaction};

pub fn insert_transaction(
    conn: &Connection,
    user_id: i64,
    tx: &NewTransaction,
) -> Result<Transaction> {
    conn.execute(
        "INSERT INTO transactions(user_id, type, description, amount, category, date, recurrence, recurrence_end)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user_id,
            tx.r#type.to_string(),
            tx.description,
            tx.amount.to_string(),
            tx.category,
            tx.date.to_string(),
            tx.recurrence.to_string(),
            tx.recurrence_end,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get_transaction(conn, user_id, id)?
        .context("Inserted transaction not found on read-back")
}

/// All-or-nothing bulk insert; one SQLite transaction for the batch.
pub fn insert_transactions(
    conn: &mut Connection,
    user_id: i64,
    txs: &[NewTransaction],
) -> Result<usize> {
    let db_tx = conn.transaction()?;
    for tx in txs {
        db_tx.execute(
            "INSERT INTO transactions(user_id, type, description, amount, category, date, recurrence, recurrence_end)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                user_id,
                tx.r#type.to_string(),
                tx.description,
                tx.amount.to_string(),
                tx.category,
                tx.date.to_string(),
                tx.recurrence.to_string(),
                tx.recurrence_end,
            ],
        )?;
    }
    db_tx.commit()?;
    Ok(txs.len())
}

/// Returns false when no row with that id belongs to the user; deleting
/// an unknown id is a no-op, not an error.
pub fn delete_transaction(conn: &Connection, user_id: i64, id: i64) -> Result<bool> {
    let affected = conn.execute(
        "DELETE FROM transactions WHERE user_id=?1 AND id=?2",
        params![user_id, id],
    )?;
    Ok(affected > 0)
}

pub fn get_transaction(conn: &Connection, user_id: i64, id: i64) -> Result<Option<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, type, description, amount, category, date, recurrence, recurrence_end, created_at
         FROM transactions WHERE user_id=?1 AND id=?2",
    )?;
    let mut rows = stmt.query(params![user_id, id])?;
    match rows.next()? {
        Some(r) => Ok(Some(transaction_from_row(r)?)),
        None => Ok(None),
    }
}

/// Full transaction set for a user, newest first (creation order, the
/// ordering the original UI lists under).
pub fn list_transactions(conn: &Connection, user_id: i64) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, type, description, amount, category, date, recurrence, recurrence_end, created_at
         FROM transactions WHERE user_id=?1 ORDER BY created_at DESC, id DESC",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(transaction_from_row(r)?);
    }
    Ok(out)
}

fn transaction_from_row(r: &rusqlite::Row<'_>) -> Result<Transaction> {
    let type_s: String = r.get(1)?;
    let amount_s: String = r.get(3)?;
    let date_s: String = r.get(5)?;
    let recurrence_s: String = r.get(6)?;
    Ok(Transaction {
        id: r.get(0)?,
        r#type: type_s.parse()?,
        description: r.get(2)?,
        amount: amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in transactions", amount_s))?,
        category: r.get(4)?,
        date: crate::utils::parse_date(&date_s)?,
        recurrence: recurrence_s.parse()?,
        recurrence_end: r.get(7)?,
        created_at: r.get(8)?,
    })
}

/// Closings for a user, ascending by month.
pub fn list_closings(conn: &Connection, user_id: i64) -> Result<Vec<MonthlyClosing>> {
    let mut stmt = conn.prepare(
        "SELECT month, income, expenses, balance, closed_at
         FROM monthly_closings WHERE user_id=?1 ORDER BY month ASC",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(closing_from_row(r)?);
    }
    Ok(out)
}

pub fn get_closing(conn: &Connection, user_id: i64, month: &str) -> Result<Option<MonthlyClosing>> {
    let mut stmt = conn.prepare(
        "SELECT month, income, expenses, balance, closed_at
         FROM monthly_closings WHERE user_id=?1 AND month=?2",
    )?;
    let mut rows = stmt.query(params![user_id, month])?;
    match rows.next()? {
        Some(r) => Ok(Some(closing_from_row(r)?)),
        None => Ok(None),
    }
}

fn closing_from_row(r: &rusqlite::Row<'_>) -> Result<MonthlyClosing> {
    let income_s: String = r.get(1)?;
    let expenses_s: String = r.get(2)?;
    let balance_s: String = r.get(3)?;
    Ok(MonthlyClosing {
        month: r.get(0)?,
        income: crate::utils::parse_decimal(&income_s)?,
        expenses: crate::utils::parse_decimal(&expenses_s)?,
        balance: crate::utils::parse_decimal(&balance_s)?,
        closed_at: r.get(4)?,
    })
}

pub fn get_savings(conn: &Connection, user_id: i64) -> Result<Decimal> {
    let v: Option<String> = conn
        .query_row(
            "SELECT amount FROM savings WHERE user_id=?1",
            params![user_id],
            |r| r.get(0),
        )
        .optional()?;
    match v {
        Some(s) => crate::utils::parse_decimal(&s),
        None => Ok(Decimal::ZERO),
    }
}

pub fn set_savings(conn: &Connection, user_id: i64, amount: Decimal) -> Result<()> {
    conn.execute(
        "INSERT INTO savings(user_id, amount) VALUES(?1, ?2)
         ON CONFLICT(user_id) DO UPDATE SET amount=excluded.amount",
        params![user_id, amount.to_string()],
    )?;
    Ok(())
}
