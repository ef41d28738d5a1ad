// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views. Each report loads the user's full transaction (and,
//! where relevant, closing) set and hands it to the engine; the current
//! month and year come from the wall clock here, never inside the engine.

use anyhow::Result;
use chrono::{Datelike, Utc};
use rusqlite::Connection;

use crate::models::Session;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};
use crate::{engine, store};

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("monthly", sub)) => monthly(conn, session, sub)?,
        Some(("breakdown", sub)) => breakdown(conn, session, sub)?,
        Some(("recurring", sub)) => recurring(conn, session, sub)?,
        Some(("annual", sub)) => annual(conn, session, sub)?,
        _ => {}
    }
    Ok(())
}

fn monthly(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let txs = store::list_transactions(conn, session.user_id)?;
    let data = engine::monthly_summaries(&txs);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|s| {
                vec![
                    s.month.clone(),
                    fmt_money(&s.total_income),
                    fmt_money(&s.total_expenses),
                    fmt_money(&s.savings),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Savings"], rows)
        );
    }
    Ok(())
}

fn breakdown(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => engine::month_key(Utc::now().date_naive()),
    };
    let txs = store::list_transactions(conn, session.user_id)?;
    let data = engine::expenses_by_category(&txs, &month);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| vec![c.category.clone(), fmt_money(&c.amount)])
            .collect();
        println!("Expenses by category in {}", month);
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

fn recurring(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let current_month = engine::month_key(Utc::now().date_naive());
    let txs = store::list_transactions(conn, session.user_id)?;
    let data = engine::recurring_projections(&txs, &current_month)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|p| {
                let remaining = if p.months_remaining == -1 {
                    "no end date".to_string()
                } else {
                    format!("{} month(s) left", p.months_remaining)
                };
                vec![
                    p.description.clone(),
                    p.category.clone(),
                    format!("{}/month", fmt_money(&p.amount)),
                    p.end_month.clone().unwrap_or_default(),
                    remaining,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Description", "Category", "Amount", "Until", "Remaining"],
                rows
            )
        );
    }
    Ok(())
}

fn annual(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let year = match sub.get_one::<i32>("year") {
        Some(y) => *y,
        None => Utc::now().year(),
    };
    let txs = store::list_transactions(conn, session.user_id)?;
    let closings = store::list_closings(conn, session.user_id)?;
    let data = engine::annual_consolidation(&txs, &closings, year);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!(
            "Year {}: income {} | expenses {} | balance {}",
            data.year,
            fmt_money(&data.total_income),
            fmt_money(&data.total_expenses),
            fmt_money(&data.total_balance)
        );
        let rows: Vec<Vec<String>> = data
            .months
            .iter()
            .map(|s| {
                vec![
                    s.month.clone(),
                    fmt_money(&s.income),
                    fmt_money(&s.expenses),
                    fmt_money(&s.balance),
                    if s.closed { "closed" } else { "open" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Balance", "Status"], rows)
        );
    }
    Ok(())
}
