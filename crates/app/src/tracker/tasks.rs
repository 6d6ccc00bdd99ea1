use std::time::Duration;

use tokio::task::{self, JoinHandle};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error};

use super::Tracker;
use crate::config::MAX_INTERVAL_SECS;

/// Handles to the sampling and daily-reset tasks.
pub struct TrackerTasks {
    sampling: JoinHandle<()>,
    daily_reset: JoinHandle<()>,
}

impl TrackerTasks {
    /// True once either loop has stopped.
    pub fn is_finished(&self) -> bool {
        self.sampling.is_finished() || self.daily_reset.is_finished()
    }

    pub fn shutdown(self) {
        self.sampling.abort();
        self.daily_reset.abort();
        debug!("tracker tasks stopped");
    }
}

pub(super) fn spawn(
    tracker: Tracker,
    sample_interval: Duration,
    reset_poll_interval: Duration,
) -> TrackerTasks {
    let sample_interval = clamp_period(sample_interval);
    let reset_poll_interval = clamp_period(reset_poll_interval);
    let sampling = tokio::spawn(run_sampling(tracker.clone(), sample_interval));
    let daily_reset = tokio::spawn(run_daily_reset(tracker, reset_poll_interval));
    TrackerTasks {
        sampling,
        daily_reset,
    }
}

fn clamp_period(period: Duration) -> Duration {
    period
        .max(Duration::from_millis(1))
        .min(Duration::from_secs(MAX_INTERVAL_SECS))
}

async fn run_sampling(tracker: Tracker, period: Duration) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let worker = tracker.clone();
        // Tick errors are already logged by the tracker.
        if let Err(err) = task::spawn_blocking(move || worker.sample_once()).await {
            error!("sampling tick aborted: {}", err);
        }
    }
}

async fn run_daily_reset(tracker: Tracker, period: Duration) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let worker = tracker.clone();
        if let Err(err) = task::spawn_blocking(move || worker.check_rollover()).await {
            error!("daily reset check aborted: {}", err);
        }
    }
}
