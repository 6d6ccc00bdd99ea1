mod support;

use chrono::NaiveDate;
use rusqlite::Connection;
use support::setup_db;

#[test]
fn start_date_is_created_once() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let first_run = NaiveDate::from_ymd_opt(2026, 3, 1).expect("date");
    let second_run = NaiveDate::from_ymd_opt(2026, 3, 9).expect("date");

    assert_eq!(db.get_start_date().expect("start date"), None);
    assert_eq!(
        db.get_or_init_start_date(first_run).expect("init"),
        first_run
    );
    assert_eq!(
        db.get_or_init_start_date(second_run).expect("init again"),
        first_run
    );
}

#[test]
fn set_start_date_keeps_a_single_row() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    db.set_start_date(NaiveDate::from_ymd_opt(2026, 3, 1).expect("date"))
        .expect("set");
    db.set_start_date(NaiveDate::from_ymd_opt(2026, 4, 1).expect("date"))
        .expect("set again");

    let conn = Connection::open(&test_db.path).expect("open conn");
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM tracking_meta", [], |row| row.get(0))
        .expect("count");
    let stored: String = conn
        .query_row("SELECT start_date FROM tracking_meta", [], |row| row.get(0))
        .expect("stored");
    assert_eq!(rows, 1);
    assert_eq!(stored, "2026-04-01");
}

#[test]
fn malformed_start_date_is_a_parse_error() {
    let test_db = setup_db();
    let conn = Connection::open(&test_db.path).expect("open conn");
    conn.execute(
        "INSERT INTO tracking_meta (start_date) VALUES ('not-a-date')",
        [],
    )
    .expect("insert");

    let err = test_db.db.get_start_date().expect_err("parse should fail");
    assert!(err.to_string().starts_with("time parse error"));
}
