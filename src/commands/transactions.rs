// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;

use crate::models::{
    categories_for, is_valid_category, NewTransaction, Recurrence, Session, TransactionType,
};
use crate::utils::{maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table};
use crate::{engine, store};

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, session, sub)?,
        Some(("list", sub)) => list(conn, session, sub)?,
        Some(("rm", sub)) => rm(conn, session, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let r#type: TransactionType = sub.get_one::<String>("type").unwrap().parse()?;
    let description = sub.get_one::<String>("description").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => Utc::now().date_naive(),
    };
    let recurring = sub.get_flag("recurring");
    let until = sub.get_one::<String>("until");

    if description.is_empty() {
        bail!("Description must not be empty");
    }
    if amount.is_sign_negative() {
        bail!("Amount must not be negative");
    }
    if !is_valid_category(r#type, &category) {
        bail!(
            "Unknown {} category '{}' (expected one of: {})",
            r#type,
            category,
            categories_for(r#type).join(", ")
        );
    }
    let recurrence_end = match until {
        Some(end) => {
            if !recurring {
                bail!("--until only applies to --recurring transactions");
            }
            let end = parse_month(end)?;
            if end.as_str() < engine::month_key(date).as_str() {
                bail!(
                    "Recurrence end {} is before the transaction's own month",
                    end
                );
            }
            Some(end)
        }
        None => None,
    };

    let tx = store::insert_transaction(
        conn,
        session.user_id,
        &NewTransaction {
            r#type,
            description,
            amount,
            category,
            date,
            recurrence: if recurring {
                Recurrence::Recurring
            } else {
                Recurrence::OneTime
            },
            recurrence_end,
        },
    )?;
    println!(
        "Recorded {} '{}' of {} on {} (id: {})",
        tx.r#type, tx.description, tx.amount, tx.date, tx.id
    );
    Ok(())
}

fn list(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, session.user_id, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.r#type.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.recurrence.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Description", "Amount", "Category", "Recurrence"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if store::delete_transaction(conn, session.user_id, id)? {
        println!("Deleted transaction {}", id);
    } else {
        println!("No transaction with id {}; nothing deleted", id);
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub r#type: String,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub recurrence: String,
}

pub fn query_rows(
    conn: &Connection,
    user_id: i64,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT id, date, type, description, amount, category, recurrence
         FROM transactions WHERE user_id=?1",
    );
    let mut params_vec: Vec<String> = vec![user_id.to_string()];

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(month.into());
    }
    sql.push_str(" ORDER BY created_at DESC, id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(TransactionRow {
            id: r.get(0)?,
            date: r.get(1)?,
            r#type: r.get(2)?,
            description: r.get(3)?,
            amount: r.get(4)?,
            category: r.get(5)?,
            recurrence: r.get(6)?,
        });
    }
    Ok(data)
}
