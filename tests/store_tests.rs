// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

use fincontrol::models::{NewTransaction, Recurrence, TransactionType};
use fincontrol::{db, store};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO users(username, display_name, password_hash) VALUES('vini','Vinicius','x')",
        [],
    )
    .unwrap();
    conn
}

fn new_tx(description: &str, date: &str) -> NewTransaction {
    NewTransaction {
        r#type: TransactionType::Expense,
        description: description.into(),
        amount: "42.10".parse().unwrap(),
        category: "outros".into(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        recurrence: Recurrence::OneTime,
        recurrence_end: None,
    }
}

#[test]
fn insert_assigns_id_and_timestamp() {
    let conn = setup();
    let tx = store::insert_transaction(&conn, 1, &new_tx("Mercado", "2025-03-01")).unwrap();
    assert!(tx.id > 0);
    assert!(!tx.created_at.is_empty());
    assert_eq!(tx.amount.to_string(), "42.10");
    assert_eq!(tx.date.to_string(), "2025-03-01");
}

#[test]
fn list_returns_newest_first() {
    let conn = setup();
    store::insert_transaction(&conn, 1, &new_tx("first", "2025-01-01")).unwrap();
    store::insert_transaction(&conn, 1, &new_tx("second", "2025-01-02")).unwrap();
    let txs = store::list_transactions(&conn, 1).unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].description, "second");
}

#[test]
fn bulk_insert_is_one_unit() {
    let mut conn = setup();
    let batch = vec![new_tx("a", "2025-01-01"), new_tx("b", "2025-01-02")];
    let count = store::insert_transactions(&mut conn, 1, &batch).unwrap();
    assert_eq!(count, 2);
    assert_eq!(store::list_transactions(&conn, 1).unwrap().len(), 2);
}

#[test]
fn savings_defaults_to_zero_and_overrides() {
    let conn = setup();
    assert_eq!(store::get_savings(&conn, 1).unwrap(), Decimal::ZERO);
    store::set_savings(&conn, 1, "1234.56".parse().unwrap()).unwrap();
    assert_eq!(store::get_savings(&conn, 1).unwrap().to_string(), "1234.56");
    store::set_savings(&conn, 1, "10".parse().unwrap()).unwrap();
    assert_eq!(store::get_savings(&conn, 1).unwrap().to_string(), "10");
}

#[test]
fn closings_list_ascending_by_month() {
    let conn = setup();
    for month in ["2025-03", "2025-01", "2025-02"] {
        conn.execute(
            "INSERT INTO monthly_closings(user_id, month, income, expenses, balance)
             VALUES (1, ?1, '0', '0', '0')",
            [month],
        )
        .unwrap();
    }
    let closings = store::list_closings(&conn, 1).unwrap();
    let months: Vec<&str> = closings.iter().map(|c| c.month.as_str()).collect();
    assert_eq!(months, vec!["2025-01", "2025-02", "2025-03"]);
}

#[test]
fn get_transaction_respects_user_scope() {
    let conn = setup();
    conn.execute(
        "INSERT INTO users(username, display_name, password_hash) VALUES('other','Other','x')",
        [],
    )
    .unwrap();
    let tx = store::insert_transaction(&conn, 1, &new_tx("mine", "2025-01-01")).unwrap();
    assert!(store::get_transaction(&conn, 2, tx.id).unwrap().is_none());
    assert!(store::get_transaction(&conn, 1, tx.id).unwrap().is_some());
}
