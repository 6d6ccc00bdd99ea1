#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use co2_app::{AppPaths, AppState, ManualClock, ScriptedCounters, Tracker, TrackerConfig};
use co2_core::CounterReading;
use tempfile::TempDir;

pub const MB: u64 = 1_048_576;

pub struct Harness {
    pub _dir: TempDir,
    pub app: AppState,
    pub clock: ManualClock,
    pub counters: ScriptedCounters,
    pub tracker: Tracker,
}

impl Harness {
    /// Opens a second tracker over the same files, as a restart would.
    pub fn reopen(&self) -> Tracker {
        self.app
            .open_tracker(self.counters.clone(), Arc::new(self.clock.clone()))
            .expect("reopen tracker")
    }
}

pub fn local(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(year, month, day, hour, minute, second)
        .earliest()
        .expect("local time")
}

pub fn reading(sent_mb: u64, received_mb: u64) -> CounterReading {
    CounterReading::new(sent_mb * MB, received_mb * MB)
}

pub fn test_config() -> TrackerConfig {
    TrackerConfig {
        co2_per_gb: 10.0,
        yearly_baseline_g: 300_000.0,
        ..TrackerConfig::default()
    }
}

pub fn harness_at(now: DateTime<Local>, config: TrackerConfig) -> Harness {
    let dir = tempfile::tempdir().expect("temp dir");
    let app = AppState::new(AppPaths::new(dir.path().join("data")), config);
    let clock = ManualClock::new(now);
    let counters = ScriptedCounters::default();
    let tracker = app
        .open_tracker(counters.clone(), Arc::new(clock.clone()))
        .expect("open tracker");
    Harness {
        _dir: dir,
        app,
        clock,
        counters,
        tracker,
    }
}

pub fn harness() -> Harness {
    harness_at(local(2026, 3, 10, 12, 0, 0), test_config())
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
