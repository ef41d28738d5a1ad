// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Identity collaborator. Credentials live in the `users` table; the
//! active session is a marker row in `settings` that each invocation
//! resolves into an explicit `Session` value. Commands receive that
//! value instead of reaching into ambient auth state.

use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::Session;

const ACTIVE_USER_KEY: &str = "active_user";

pub fn sign_up(
    conn: &Connection,
    username: &str,
    display_name: &str,
    password: &str,
) -> Result<()> {
    let username = username.trim();
    if username.is_empty() {
        bail!("Username must not be empty");
    }
    if password.is_empty() {
        bail!("Password must not be empty");
    }
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM users WHERE username=?1",
            params![username],
            |r| r.get(0),
        )
        .optional()?;
    if existing.is_some() {
        bail!("Username '{}' is already taken", username);
    }
    let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST).context("Hash password")?;
    conn.execute(
        "INSERT INTO users(username, display_name, password_hash) VALUES (?1, ?2, ?3)",
        params![username, display_name, hash],
    )?;
    Ok(())
}

/// Verify credentials and mark the user active. Wrong username and
/// wrong password produce the same message.
pub fn log_in(conn: &Connection, username: &str, password: &str) -> Result<Session> {
    let row: Option<(i64, String, String, String)> = conn
        .query_row(
            "SELECT id, username, display_name, password_hash FROM users WHERE username=?1",
            params![username.trim()],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;
    let Some((user_id, username, display_name, hash)) = row else {
        bail!("Invalid username or password");
    };
    if !bcrypt::verify(password, &hash).context("Verify password")? {
        bail!("Invalid username or password");
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![ACTIVE_USER_KEY, user_id.to_string()],
    )?;
    Ok(Session {
        user_id,
        username,
        display_name,
    })
}

pub fn log_out(conn: &Connection) -> Result<()> {
    conn.execute(
        "DELETE FROM settings WHERE key=?1",
        params![ACTIVE_USER_KEY],
    )?;
    Ok(())
}

pub fn current(conn: &Connection) -> Result<Option<Session>> {
    let marker: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![ACTIVE_USER_KEY],
            |r| r.get(0),
        )
        .optional()?;
    let Some(marker) = marker else {
        return Ok(None);
    };
    let user_id: i64 = marker
        .parse()
        .with_context(|| format!("Invalid active user marker '{}'", marker))?;
    let row: Option<(String, String)> = conn
        .query_row(
            "SELECT username, display_name FROM users WHERE id=?1",
            params![user_id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    // A stale marker (user deleted underneath it) reads as logged out.
    Ok(row.map(|(username, display_name)| Session {
        user_id,
        username,
        display_name,
    }))
}

/// Session for commands that refuse to run logged out.
pub fn require(conn: &Connection) -> Result<Session> {
    current(conn)?.context("Not logged in. Run 'fincontrol auth login' first")
}
