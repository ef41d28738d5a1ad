// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! USD to BRL reference rate, display-only. Fetch failures degrade to
//! the cached value or an "unavailable" notice; they never fail the
//! command, since nothing downstream depends on the rate.

use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Deserialize;

use crate::utils::http_client;

const RATE_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";
const RATE_KEY: &str = "usd_brl_rate";
const RATE_DATE_KEY: &str = "usd_brl_fetched_at";

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("fetch", _)) => fetch(conn)?,
        Some(("show", _)) => show(conn)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct RateResponse {
    rates: HashMap<String, f64>,
}

fn fetch_brl() -> Result<f64> {
    let client = http_client()?;
    let resp = client.get(RATE_URL).send()?.error_for_status()?;
    let body: RateResponse = resp.json()?;
    body.rates
        .get("BRL")
        .copied()
        .ok_or_else(|| anyhow::anyhow!("No BRL rate in response"))
}

fn fetch(conn: &Connection) -> Result<()> {
    match fetch_brl() {
        Ok(rate) => {
            let today = Utc::now().date_naive().to_string();
            for (key, value) in [(RATE_KEY, rate.to_string()), (RATE_DATE_KEY, today)] {
                conn.execute(
                    "INSERT INTO settings(key, value) VALUES(?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value=excluded.value",
                    params![key, value],
                )?;
            }
            println!("USD/BRL = {:.4}", rate);
        }
        Err(_) => show_cached(conn)?,
    }
    Ok(())
}

fn show(conn: &Connection) -> Result<()> {
    show_cached(conn)
}

fn show_cached(conn: &Connection) -> Result<()> {
    let cached = read_setting(conn, RATE_KEY)?;
    match cached {
        Some(rate) => {
            let fetched = read_setting(conn, RATE_DATE_KEY)?.unwrap_or_default();
            println!("USD/BRL = {} (cached {})", rate, fetched);
        }
        None => println!("USD/BRL rate unavailable"),
    }
    Ok(())
}

fn read_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}
