// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::session;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("signup", sub)) => {
            let username = sub.get_one::<String>("username").unwrap();
            let name = sub.get_one::<String>("name").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            session::sign_up(conn, username, name, password)?;
            println!("Created user '{}'", username.trim());
        }
        Some(("login", sub)) => {
            let username = sub.get_one::<String>("username").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            let s = session::log_in(conn, username, password)?;
            println!("Logged in as {} ({})", s.username, s.display_name);
        }
        Some(("logout", _)) => {
            session::log_out(conn)?;
            println!("Logged out");
        }
        Some(("whoami", _)) => match session::current(conn)? {
            Some(s) => println!("{} ({})", s.username, s.display_name),
            None => println!("Not logged in"),
        },
        _ => {}
    }
    Ok(())
}
