// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use fincontrol::{cli, commands, db, session};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("auth", sub)) => commands::auth::handle(&conn, sub)?,
        Some(("rate", sub)) => commands::rate::handle(&conn, sub)?,
        Some(("tx", sub)) => {
            let session = session::require(&conn)?;
            commands::transactions::handle(&conn, &session, sub)?
        }
        Some(("import", sub)) => {
            let session = session::require(&conn)?;
            commands::importer::handle(&mut conn, &session, sub)?
        }
        Some(("savings", sub)) => {
            let session = session::require(&conn)?;
            commands::savings::handle(&conn, &session, sub)?
        }
        Some(("close", sub)) => {
            let session = session::require(&conn)?;
            commands::closing::handle(&mut conn, &session, sub)?
        }
        Some(("report", sub)) => {
            let session = session::require(&conn)?;
            commands::reports::handle(&conn, &session, sub)?
        }
        Some(("doctor", _)) => {
            let session = session::require(&conn)?;
            commands::doctor::handle(&conn, &session)?
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
