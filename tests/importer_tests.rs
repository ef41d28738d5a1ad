// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use std::io::Write;
use tempfile::NamedTempFile;

use fincontrol::commands::importer::{self, ImportError};
use fincontrol::models::{Recurrence, Session, TransactionType};
use fincontrol::{cli, db};

fn today() -> NaiveDate {
    NaiveDate::parse_from_str("2025-03-15", "%Y-%m-%d").unwrap()
}

fn setup() -> (Connection, Session) {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO users(username, display_name, password_hash) VALUES('vini','Vinicius','x')",
        [],
    )
    .unwrap();
    let session = Session {
        user_id: 1,
        username: "vini".into(),
        display_name: "Vinicius".into(),
    };
    (conn, session)
}

#[test]
fn parses_the_paste_format() {
    let txs = importer::parse_lines("Mercado;120,50;alimentação;2025-03-01", today()).unwrap();
    assert_eq!(txs.len(), 1);
    let tx = &txs[0];
    assert_eq!(tx.description, "Mercado");
    assert_eq!(tx.amount.to_string(), "120.50");
    assert_eq!(tx.category, "alimentação");
    assert_eq!(tx.date.to_string(), "2025-03-01");
    assert_eq!(tx.r#type, TransactionType::Expense);
    assert_eq!(tx.recurrence, Recurrence::OneTime);
}

#[test]
fn too_few_fields_abort_the_import() {
    let err = importer::parse_lines("Mercado;120,50;alimentação", today()).unwrap_err();
    assert!(matches!(err, ImportError::FieldCount { line: 1, got: 3 }));
}

#[test]
fn one_bad_line_fails_the_whole_batch() {
    let text = "Mercado;120,50;alimentação;2025-03-01\nPadaria;12";
    let err = importer::parse_lines(text, today()).unwrap_err();
    assert!(matches!(err, ImportError::FieldCount { line: 2, .. }));
}

#[test]
fn blank_category_and_date_get_defaults() {
    let txs = importer::parse_lines("Farmácia;33,90;;", today()).unwrap();
    assert_eq!(txs[0].category, "outros");
    assert_eq!(txs[0].date, today());
}

#[test]
fn unknown_category_falls_back_to_outros() {
    let txs = importer::parse_lines("Pet shop;80;petiscos;2025-03-02", today()).unwrap();
    assert_eq!(txs[0].category, "outros");
}

#[test]
fn negative_or_garbled_amounts_are_rejected() {
    let err = importer::parse_lines("Estorno;-10;outros;2025-03-01", today()).unwrap_err();
    assert!(matches!(err, ImportError::NegativeAmount { line: 1 }));

    let err = importer::parse_lines("Mercado;abc;outros;2025-03-01", today()).unwrap_err();
    assert!(matches!(err, ImportError::Amount { line: 1, .. }));
}

#[test]
fn bad_date_is_rejected() {
    let err = importer::parse_lines("Mercado;10;outros;01/03/2025", today()).unwrap_err();
    assert!(matches!(err, ImportError::Date { line: 1, .. }));
}

#[test]
fn cli_import_writes_all_rows() {
    let (mut conn, session) = setup();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Mercado;120,50;alimentação;2025-03-01").unwrap();
    writeln!(file, "Uber;25,00;transporte;2025-03-02").unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["fincontrol", "import", "--path", &path]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(&mut conn, &session, import_m).unwrap();
    } else {
        panic!("no import subcommand");
    }

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions WHERE user_id=1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 2);
    let (amount, r#type): (String, String) = conn
        .query_row(
            "SELECT amount, type FROM transactions WHERE description='Mercado'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(amount, "120.50");
    assert_eq!(r#type, "expense");
}

#[test]
fn cli_import_with_a_bad_line_writes_nothing() {
    let (mut conn, session) = setup();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Mercado;120,50;alimentação;2025-03-01").unwrap();
    writeln!(file, "só três;campos;aqui").unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["fincontrol", "import", "--path", &path]);
    if let Some(("import", import_m)) = matches.subcommand() {
        assert!(importer::handle(&mut conn, &session, import_m).is_err());
    } else {
        panic!("no import subcommand");
    }

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}
