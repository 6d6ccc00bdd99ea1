pub mod app;
pub mod clock;
pub mod config;
pub mod counters;
pub mod error;
pub mod error_log;
pub mod startup;
pub mod tracker;
pub mod util;

pub use app::{AppConfig, AppState};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TrackerConfig;
pub use counters::{CounterSource, ScriptedCounters, SystemCounters};
pub use error::{AppError, Result};
pub use error_log::ErrorLog;
pub use startup::{AppPaths, ensure_app_data_dir};
pub use tracker::{Rollover, Snapshot, Tracker, TrackerTasks, TrackingState};
pub use util::time::{local_midnight_utc, to_utc_timestamp};
