use std::sync::Arc;

use co2_db::Db;

use crate::clock::{Clock, SystemClock};
use crate::config::TrackerConfig;
use crate::counters::{CounterSource, SystemCounters};
use crate::error::{AppError, Result};
use crate::error_log::ErrorLog;
use crate::startup::{AppPaths, ensure_app_data_dir};
use crate::tracker::Tracker;

/// Paths and engine parameters needed to run the local tracker.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub paths: AppPaths,
    pub tracker: TrackerConfig,
}

/// Application state shared by frontends.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: AppConfig,
}

impl AppState {
    pub fn new(paths: AppPaths, tracker: TrackerConfig) -> Self {
        Self {
            config: AppConfig { paths, tracker },
        }
    }

    pub fn setup_db(&self) -> Result<()> {
        ensure_app_data_dir(&self.config.paths)?;
        setup_db(&self.config.paths.db_path)
    }

    pub fn open_db(&self) -> Result<Db> {
        Ok(Db::open(&self.config.paths.db_path)?)
    }

    pub fn error_log(&self) -> ErrorLog {
        ErrorLog::new(&self.config.paths.error_log_path)
    }

    pub fn open_tracker(
        &self,
        counters: impl CounterSource + 'static,
        clock: Arc<dyn Clock>,
    ) -> Result<Tracker> {
        self.setup_db()
            .map_err(|err| AppError::Message(format!("initialize db: {}", err)))?;
        Tracker::new(
            self.open_db()?,
            counters,
            clock,
            self.config.tracker.clone(),
            self.error_log(),
        )
    }

    /// Tracker fed by the host's real network counters and wall clock.
    pub fn open_system_tracker(&self) -> Result<Tracker> {
        self.open_tracker(SystemCounters::new(), Arc::new(SystemClock))
    }
}

pub fn setup_db(path: &std::path::Path) -> Result<()> {
    let mut db = Db::open(path)?;
    db.migrate()?;
    Ok(())
}
