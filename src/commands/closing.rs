// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;

use crate::models::Session;
use crate::utils::{fmt_money, pretty_table};
use crate::{closing, engine, store};

pub fn handle(conn: &mut Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => close(conn, session, sub)?,
        Some(("list", _)) => list(conn, session)?,
        _ => {}
    }
    Ok(())
}

fn close(conn: &mut Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => m.clone(),
        None => engine::month_key(Utc::now().date_naive()),
    };
    let reclose = closing::is_month_closed(conn, session.user_id, &month)?;
    let record = closing::close_month(conn, session.user_id, &month)?;
    let total = store::get_savings(conn, session.user_id)?;
    if reclose {
        println!("Re-closed {} (previous closing replaced)", record.month);
    } else {
        println!("Closed {}", record.month);
    }
    println!(
        "Income {} | Expenses {} | Balance {}",
        fmt_money(&record.income),
        fmt_money(&record.expenses),
        fmt_money(&record.balance)
    );
    println!("Savings total is now {}", fmt_money(&total));
    Ok(())
}

fn list(conn: &Connection, session: &Session) -> Result<()> {
    let closings = store::list_closings(conn, session.user_id)?;
    let rows: Vec<Vec<String>> = closings
        .iter()
        .map(|c| {
            vec![
                c.month.clone(),
                fmt_money(&c.income),
                fmt_money(&c.expenses),
                fmt_money(&c.balance),
                c.closed_at.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expenses", "Balance", "Closed at"], rows)
    );
    Ok(())
}
