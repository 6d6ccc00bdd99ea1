mod scheduler;
mod state;
mod tasks;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Local};
use co2_core::{CounterReading, UsageAccountant, UsageSample};
use co2_db::Db;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::config::{TrackerConfig, validate_target_pct};
use crate::counters::CounterSource;
use crate::error::{AppError, Result};
use crate::error_log::ErrorLog;
use crate::util::time::to_utc_timestamp;

pub use scheduler::{Rollover, check_rollover};
pub use state::{Snapshot, TrackingState};
pub use tasks::TrackerTasks;

/// Samples network counters, accounts CO2 and publishes snapshots.
///
/// Cloning is cheap; every clone drives the same engine. Writers serialize on
/// one lock and publish a fresh [`Snapshot`] after each change, so readers
/// never see a half-applied tick.
#[derive(Clone)]
pub struct Tracker {
    inner: Arc<Inner>,
}

struct Inner {
    engine: Mutex<Engine>,
    published: watch::Sender<Snapshot>,
    clock: Arc<dyn Clock>,
    error_log: ErrorLog,
}

struct Engine {
    db: Db,
    counters: Box<dyn CounterSource>,
    config: TrackerConfig,
    accountant: UsageAccountant,
    state: TrackingState,
    last_reading: Option<(CounterReading, DateTime<Local>)>,
}

impl Engine {
    fn snapshot(&self, now: DateTime<Local>) -> Snapshot {
        self.state.snapshot(&self.config, now)
    }
}

impl Tracker {
    /// Builds the engine and loads its totals from the store.
    pub fn new(
        mut db: Db,
        counters: impl CounterSource + 'static,
        clock: Arc<dyn Clock>,
        mut config: TrackerConfig,
        error_log: ErrorLog,
    ) -> Result<Self> {
        config.validate()?;
        if let Some(pct) = db.get_personal_target_pct()? {
            config.personal_reduction_target_pct = pct;
        }
        let now = clock.now();
        let state = TrackingState::load(&mut db, now)?;
        info!(
            "tracking since {}: {} samples, {:.2} g CO2",
            state.start_date, state.sample_count, state.lifetime_co2_g
        );
        let engine = Engine {
            db,
            counters: Box::new(counters),
            accountant: UsageAccountant::new(config.co2_per_gb),
            config,
            state,
            last_reading: None,
        };
        let (published, _) = watch::channel(engine.snapshot(now));
        Ok(Self {
            inner: Arc::new(Inner {
                engine: Mutex::new(engine),
                published,
                clock,
                error_log,
            }),
        })
    }

    pub fn get_snapshot(&self) -> Snapshot {
        self.inner.published.borrow().clone()
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.inner.published.subscribe()
    }

    pub fn config(&self) -> TrackerConfig {
        self.engine().config.clone()
    }

    pub fn set_personal_target(&self, pct: i64) -> Result<()> {
        let pct = validate_target_pct(pct).inspect_err(|err| warn!("{}", err))?;
        let now = self.inner.clock.now();
        let mut engine = self.engine();
        engine.config.personal_reduction_target_pct = pct;
        if let Err(err) = engine.db.set_personal_target_pct(pct) {
            self.record_error(now, "persist personal target", &AppError::from(err));
        }
        info!("personal reduction target set to {}%", pct);
        self.publish(engine.snapshot(now));
        Ok(())
    }

    /// Wipes the usage log and restarts tracking from today once the
    /// confirmation code matches.
    pub fn reset(&self, confirmation_code: &str) -> Result<()> {
        let now = self.inner.clock.now();
        let mut engine = self.engine();
        if confirmation_code != engine.config.reset_code {
            warn!("reset rejected: confirmation code did not match");
            return Err(AppError::ResetAuth);
        }
        if let Err(err) = engine.db.clear(now.date_naive()) {
            let err = AppError::from(err);
            self.record_error(now, "reset", &err);
            return Err(err);
        }
        if let Err(err) = self.inner.error_log.clear() {
            warn!("failed to clear error log: {}", err);
        }
        let state = match TrackingState::load(&mut engine.db, now) {
            Ok(state) => state,
            Err(err) => {
                self.record_error(now, "reload after reset", &err);
                return Err(err);
            }
        };
        engine.state = state;
        info!("tracking reset; new start date {}", engine.state.start_date);
        self.publish(engine.snapshot(now));
        Ok(())
    }

    /// Takes the counter reading the first tick measures against.
    pub fn prime(&self) -> Result<()> {
        let now = self.inner.clock.now();
        let mut engine = self.engine();
        match engine.counters.read() {
            Ok(reading) => {
                engine.last_reading = Some((reading, now));
                Ok(())
            }
            Err(err) => {
                self.record_error(now, "baseline counter read", &err);
                Err(err)
            }
        }
    }

    /// One tick of the sampling task. Failures are logged and returned; the
    /// tracker stays usable either way.
    pub fn sample_once(&self) -> Result<Option<UsageSample>> {
        let now = self.inner.clock.now();
        let mut engine = self.engine();
        if let Rollover::Reset { previous } = check_rollover(&mut engine.state, now.date_naive()) {
            info!("new day; cleared today's total from {}", previous);
        }

        let reading = match engine.counters.read() {
            Ok(reading) => reading,
            Err(err) => {
                // A rollover above may still need to reach readers.
                self.publish(engine.snapshot(now));
                drop(engine);
                self.record_error(now, "sampling tick", &err);
                return Err(err);
            }
        };
        let Some((prev, prev_at)) = engine.last_reading.replace((reading, now)) else {
            debug!("recorded baseline counters");
            return Ok(None);
        };

        let sample = engine
            .accountant
            .sample(prev, reading, to_utc_timestamp(now));
        let elapsed = (now - prev_at).num_milliseconds() as f64 / 1000.0;
        let elapsed = if elapsed > 0.0 {
            elapsed
        } else {
            engine.config.sample_interval_secs as f64
        };
        engine.state.current_co2_rate_g_per_hour = sample.co2_grams_estimate * 3600.0 / elapsed;

        let appended = engine.db.append_sample(&sample);
        if appended.is_ok() {
            engine.state.apply_sample(&sample);
            debug!(
                "sampled {:.3} MB, {:.4} g CO2",
                sample.total_usage_mb, sample.co2_grams_estimate
            );
        }
        self.publish(engine.snapshot(now));
        drop(engine);

        match appended {
            Ok(()) => Ok(Some(sample)),
            Err(err) => {
                let err = AppError::from(err);
                self.record_error(now, "sampling tick", &err);
                Err(err)
            }
        }
    }

    /// One tick of the daily-reset task. Always republishes so day-based
    /// projections stay current.
    pub fn check_rollover(&self) -> Rollover {
        let now = self.inner.clock.now();
        let mut engine = self.engine();
        let rollover = check_rollover(&mut engine.state, now.date_naive());
        if let Rollover::Reset { previous } = rollover {
            info!("new day; cleared today's total from {}", previous);
        }
        self.publish(engine.snapshot(now));
        rollover
    }

    pub fn recent_samples(&self, limit: usize) -> Result<Vec<UsageSample>> {
        Ok(self.engine().db.recent_samples(limit)?)
    }

    pub fn error_log_entries(&self) -> Result<Vec<String>> {
        self.inner.error_log.entries()
    }

    /// Starts both periodic tasks with the configured intervals. Must be
    /// called from within a tokio runtime.
    pub fn start(&self) -> TrackerTasks {
        let config = self.config();
        self.start_with_intervals(config.sample_interval(), config.reset_poll_interval())
    }

    pub fn start_with_intervals(
        &self,
        sample_interval: Duration,
        reset_poll_interval: Duration,
    ) -> TrackerTasks {
        // A failed baseline read is retried by the first tick.
        let _ = self.prime();
        info!(
            "sampling every {:?}, checking for a new day every {:?}",
            sample_interval, reset_poll_interval
        );
        tasks::spawn(self.clone(), sample_interval, reset_poll_interval)
    }

    fn engine(&self) -> MutexGuard<'_, Engine> {
        self.inner
            .engine
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, snapshot: Snapshot) {
        self.inner.published.send_replace(snapshot);
    }

    fn record_error(&self, at: DateTime<Local>, context: &str, err: &AppError) {
        error!("{}: {}", context, err);
        if let Err(log_err) = self
            .inner
            .error_log
            .append(at, &format!("{}: {}", context, err))
        {
            warn!("failed to write error log: {}", log_err);
        }
    }
}
