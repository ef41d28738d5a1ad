// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use rusqlite::Connection;

use crate::models::Session;
use crate::store;
use crate::utils::{fmt_money, parse_decimal};

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let total = store::get_savings(conn, session.user_id)?;
            println!("Savings total: {}", fmt_money(&total));
        }
        Some(("set", sub)) => {
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            if amount.is_sign_negative() {
                bail!("Savings total must not be negative");
            }
            store::set_savings(conn, session.user_id, amount)?;
            println!("Savings total set to {}", fmt_money(&amount));
        }
        _ => {}
    }
    Ok(())
}
