// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection};

use fincontrol::commands::transactions;
use fincontrol::models::Session;
use fincontrol::{cli, db, store};

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

fn seed_tx(conn: &Connection, user_id: i64, date: &str) {
    conn.execute(
        "INSERT INTO transactions(user_id, type, description, amount, category, date)
         VALUES (?1, 'expense', 'seed', '10', 'outros', ?2)",
        params![user_id, date],
    )
    .unwrap();
}

fn run_tx(conn: &Connection, session: &Session, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["fincontrol", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(conn, session, tx_m)
}

#[test]
fn list_limit_respected() {
    let (conn, _session) = setup();
    for i in 1..=3 {
        seed_tx(&conn, 1, &format!("2025-01-0{}", i));
    }
    let matches = cli::build_cli().get_matches_from(["fincontrol", "tx", "list", "--limit", "2"]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = transactions::query_rows(&conn, 1, list_m).unwrap();
    assert_eq!(rows.len(), 2);
    // Newest first: same created_at second, so id breaks the tie.
    assert_eq!(rows[0].date, "2025-01-03");
}

#[test]
fn list_month_filter() {
    let (conn, _session) = setup();
    seed_tx(&conn, 1, "2025-01-10");
    seed_tx(&conn, 1, "2025-02-10");
    let matches =
        cli::build_cli().get_matches_from(["fincontrol", "tx", "list", "--month", "2025-02"]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = transactions::query_rows(&conn, 1, list_m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, "2025-02-10");
}

#[test]
fn list_is_scoped_to_the_session_user() {
    let (conn, _session) = setup();
    conn.execute(
        "INSERT INTO users(username, display_name, password_hash) VALUES('other','Other','x')",
        [],
    )
    .unwrap();
    seed_tx(&conn, 1, "2025-01-10");
    seed_tx(&conn, 2, "2025-01-11");
    let matches = cli::build_cli().get_matches_from(["fincontrol", "tx", "list"]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    assert_eq!(transactions::query_rows(&conn, 1, list_m).unwrap().len(), 1);
}

#[test]
fn add_records_a_validated_transaction() {
    let (conn, session) = setup();
    run_tx(
        &conn,
        &session,
        &[
            "add",
            "--description",
            "Aluguel",
            "--amount",
            "1200",
            "--category",
            "moradia",
            "--date",
            "2025-03-01",
            "--recurring",
            "--until",
            "2025-12",
        ],
    )
    .unwrap();

    let txs = store::list_transactions(&conn, 1).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].description, "Aluguel");
    assert_eq!(txs[0].amount.to_string(), "1200");
    assert_eq!(txs[0].recurrence_end.as_deref(), Some("2025-12"));
}

#[test]
fn add_rejects_category_type_mismatch() {
    let (conn, session) = setup();
    // "salário" is an income category; the expense enumeration wins here.
    let err = run_tx(
        &conn,
        &session,
        &[
            "add",
            "--description",
            "Pagamento",
            "--amount",
            "100",
            "--category",
            "salário",
            "--date",
            "2025-03-01",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("category"));
    assert!(store::list_transactions(&conn, 1).unwrap().is_empty());
}

#[test]
fn add_rejects_negative_amount_and_bad_recurrence_end() {
    let (conn, session) = setup();
    assert!(run_tx(
        &conn,
        &session,
        &["add", "--description", "x", "--amount", "-5", "--category", "outros"],
    )
    .is_err());

    // --until without --recurring
    assert!(run_tx(
        &conn,
        &session,
        &[
            "add", "--description", "x", "--amount", "5", "--category", "outros", "--date",
            "2025-03-01", "--until", "2025-12",
        ],
    )
    .is_err());

    // End month before the transaction's own month.
    assert!(run_tx(
        &conn,
        &session,
        &[
            "add", "--description", "x", "--amount", "5", "--category", "outros", "--date",
            "2025-03-01", "--recurring", "--until", "2025-02",
        ],
    )
    .is_err());

    assert!(store::list_transactions(&conn, 1).unwrap().is_empty());
}

#[test]
fn deleting_an_unknown_id_is_a_noop() {
    let (conn, session) = setup();
    seed_tx(&conn, 1, "2025-01-10");
    run_tx(&conn, &session, &["rm", "--id", "999"]).unwrap();
    assert_eq!(store::list_transactions(&conn, 1).unwrap().len(), 1);
}

#[test]
fn delete_only_touches_the_owners_rows() {
    let (conn, _session) = setup();
    conn.execute(
        "INSERT INTO users(username, display_name, password_hash) VALUES('other','Other','x')",
        [],
    )
    .unwrap();
    seed_tx(&conn, 2, "2025-01-10");
    let foreign_id: i64 = conn
        .query_row("SELECT id FROM transactions WHERE user_id=2", [], |r| r.get(0))
        .unwrap();
    assert!(!store::delete_transaction(&conn, 1, foreign_id).unwrap());
    assert_eq!(store::list_transactions(&conn, 2).unwrap().len(), 1);
}
