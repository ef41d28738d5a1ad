// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Invariant scan over the active user's rows. The schema CHECKs cover
//! type and recurrence values; everything subtler ends up here.

use anyhow::Result;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use crate::models::{is_valid_category, Session, TransactionType};
use crate::utils::pretty_table;

pub fn handle(conn: &Connection, session: &Session) -> Result<()> {
    let mut rows = Vec::new();

    let mut stmt = conn.prepare(
        "SELECT id, type, amount, category, date, recurrence, recurrence_end
         FROM transactions WHERE user_id=?1 ORDER BY id",
    )?;
    let mut cur = stmt.query(params![session.user_id])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let type_s: String = r.get(1)?;
        let amount_s: String = r.get(2)?;
        let category: String = r.get(3)?;
        let date: String = r.get(4)?;
        let recurrence: String = r.get(5)?;
        let recurrence_end: Option<String> = r.get(6)?;

        match amount_s.parse::<Decimal>() {
            Ok(amount) if amount.is_sign_negative() => {
                rows.push(vec!["negative_amount".into(), format!("tx {}: {}", id, amount_s)]);
            }
            Ok(_) => {}
            Err(_) => {
                rows.push(vec!["bad_amount".into(), format!("tx {}: '{}'", id, amount_s)]);
            }
        }

        if let Ok(r#type) = type_s.parse::<TransactionType>() {
            if !is_valid_category(r#type, &category) {
                rows.push(vec![
                    "category_type_mismatch".into(),
                    format!("tx {}: '{}' is not a {} category", id, category, r#type),
                ]);
            }
        }

        if let Some(end) = recurrence_end {
            if recurrence != "recurring" {
                rows.push(vec![
                    "end_on_one_time".into(),
                    format!("tx {}: recurrence_end on a one-time row", id),
                ]);
            } else if date.len() >= 7 && end.as_str() < &date[..7] {
                rows.push(vec![
                    "end_before_start".into(),
                    format!("tx {}: ends {} before its own month {}", id, end, &date[..7]),
                ]);
            }
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
