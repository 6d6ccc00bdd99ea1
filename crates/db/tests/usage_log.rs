mod support;

use chrono::NaiveDate;
use co2_core::UsageAggregate;
use rusqlite::Connection;
use support::{assert_close, insert_samples, make_sample, setup_db};

#[test]
fn aggregate_of_empty_log_is_zero() {
    let test_db = setup_db();
    let aggregate = test_db.db.aggregate().expect("aggregate");
    assert_eq!(aggregate, UsageAggregate::default());
    assert_eq!(test_db.db.count_samples().expect("count"), 0);
    assert_eq!(test_db.db.last_sample_timestamp().expect("last"), None);
}

#[test]
fn aggregate_matches_elementwise_sum_of_appends() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let samples = vec![
        make_sample("2026-01-01T10:00:00.000Z", 1.5, 2.25, 0.1),
        make_sample("2026-01-01T10:01:00.000Z", 0.0, 10.0, 0.5),
        make_sample("2026-01-01T10:02:00.000Z", 3.0, 0.75, 0.2),
    ];
    let mut expected = UsageAggregate::default();
    for (index, sample) in samples.iter().enumerate() {
        insert_samples(db, std::slice::from_ref(sample));
        expected.add_sample(sample);
        let aggregate = db.aggregate().expect("aggregate");
        assert_close(aggregate.sent_mb, expected.sent_mb);
        assert_close(aggregate.received_mb, expected.received_mb);
        assert_close(aggregate.usage_mb, expected.usage_mb);
        assert_close(aggregate.co2_g, expected.co2_g);
        assert_eq!(db.count_samples().expect("count"), index as u64 + 1);
    }
}

#[test]
fn aggregate_since_filters_by_timestamp() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    insert_samples(
        db,
        &[
            make_sample("2026-01-01T23:59:00.000Z", 1.0, 1.0, 1.0),
            make_sample("2026-01-02T00:00:00.000Z", 2.0, 2.0, 2.0),
            make_sample("2026-01-02T05:00:00.000Z", 3.0, 3.0, 3.0),
        ],
    );

    let today = db
        .aggregate_since("2026-01-02T00:00:00.000Z")
        .expect("aggregate since");
    assert_close(today.co2_g, 5.0);
    assert_close(today.usage_mb, 10.0);

    let later = db
        .aggregate_since("2026-01-03T00:00:00.000Z")
        .expect("aggregate since");
    assert_eq!(later, UsageAggregate::default());
}

#[test]
fn recent_samples_returns_newest_first() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    insert_samples(
        db,
        &[
            make_sample("2026-01-01T10:00:00.000Z", 1.0, 0.0, 0.1),
            make_sample("2026-01-01T10:01:00.000Z", 2.0, 0.0, 0.2),
            make_sample("2026-01-01T10:02:00.000Z", 3.0, 0.0, 0.3),
        ],
    );

    let recent = db.recent_samples(2).expect("recent");
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].timestamp, "2026-01-01T10:02:00.000Z");
    assert_eq!(recent[1].timestamp, "2026-01-01T10:01:00.000Z");
    assert_close(recent[0].co2_grams_estimate, 0.3);
    assert_eq!(
        db.last_sample_timestamp().expect("last").as_deref(),
        Some("2026-01-01T10:02:00.000Z")
    );
}

#[test]
fn appended_rows_use_the_usage_log_schema() {
    let mut test_db = setup_db();
    insert_samples(
        &mut test_db.db,
        &[make_sample("2026-01-01T10:00:00.000Z", 1.0, 2.0, 0.25)],
    );

    let conn = Connection::open(&test_db.path).expect("open conn");
    let row: (String, f64, f64, f64, f64) = conn
        .query_row(
            "SELECT timestamp, data_sent, data_received, total_usage, daily_usage FROM usage_log",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
        )
        .expect("load row");
    assert_eq!(row.0, "2026-01-01T10:00:00.000Z");
    assert_eq!((row.1, row.2, row.3, row.4), (1.0, 2.0, 3.0, 0.25));
}

#[test]
fn clear_removes_samples_and_restarts_tracking() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let original = NaiveDate::from_ymd_opt(2026, 1, 1).expect("date");
    let today = NaiveDate::from_ymd_opt(2026, 2, 14).expect("date");
    db.set_start_date(original).expect("start date");
    insert_samples(
        db,
        &[
            make_sample("2026-01-01T10:00:00.000Z", 1.0, 1.0, 1.0),
            make_sample("2026-01-02T10:00:00.000Z", 1.0, 1.0, 1.0),
        ],
    );

    db.clear(today).expect("clear");

    assert_eq!(db.aggregate().expect("aggregate"), UsageAggregate::default());
    assert_eq!(db.count_samples().expect("count"), 0);
    assert_eq!(db.get_start_date().expect("start date"), Some(today));
}

#[test]
fn append_fails_when_log_table_is_missing() {
    let mut test_db = setup_db();
    let conn = Connection::open(&test_db.path).expect("open conn");
    conn.execute("DROP TABLE usage_log", []).expect("drop table");

    let err = test_db
        .db
        .append_sample(&make_sample("2026-01-01T10:00:00.000Z", 1.0, 1.0, 1.0))
        .expect_err("append should fail");
    assert!(err.to_string().starts_with("sqlite error"));
}
