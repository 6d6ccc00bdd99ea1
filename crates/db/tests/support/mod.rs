#![allow(dead_code)]

use std::path::PathBuf;

use co2_core::UsageSample;
use tempfile::TempDir;
use co2_db::Db;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn make_sample(ts: &str, sent_mb: f64, received_mb: f64, co2_g: f64) -> UsageSample {
    UsageSample {
        timestamp: ts.to_string(),
        bytes_sent_delta_mb: sent_mb,
        bytes_received_delta_mb: received_mb,
        total_usage_mb: sent_mb + received_mb,
        co2_grams_estimate: co2_g,
    }
}

pub fn insert_samples(db: &mut Db, samples: &[UsageSample]) {
    for sample in samples {
        db.append_sample(sample).expect("append sample");
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
