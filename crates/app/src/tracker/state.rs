use chrono::{DateTime, Local, NaiveDate};
use co2_core::{ProjectionEngine, TargetStatus, UsageSample};
use co2_db::Db;
use serde::Serialize;

use crate::config::TrackerConfig;
use crate::error::Result;
use crate::util::time::{local_midnight_utc, to_utc_timestamp};

/// Running totals owned by the tracker. Rebuilt from the store on startup.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingState {
    pub start_date: NaiveDate,
    pub lifetime_sent_mb: f64,
    pub lifetime_received_mb: f64,
    pub lifetime_usage_mb: f64,
    pub lifetime_co2_g: f64,
    pub today_co2_g: f64,
    pub last_reset_date: NaiveDate,
    pub current_co2_rate_g_per_hour: f64,
    pub sample_count: u64,
    pub last_sample_at: Option<String>,
}

impl TrackingState {
    pub fn load(db: &mut Db, now: DateTime<Local>) -> Result<Self> {
        let today = now.date_naive();
        let lifetime = db.aggregate()?;
        let start_date = db.get_or_init_start_date(today)?;
        let since_midnight = db.aggregate_since(&local_midnight_utc(today)?)?;
        Ok(Self {
            start_date,
            lifetime_sent_mb: lifetime.sent_mb,
            lifetime_received_mb: lifetime.received_mb,
            lifetime_usage_mb: lifetime.usage_mb,
            lifetime_co2_g: lifetime.co2_g,
            today_co2_g: since_midnight.co2_g,
            last_reset_date: today,
            current_co2_rate_g_per_hour: 0.0,
            sample_count: db.count_samples()?,
            last_sample_at: db.last_sample_timestamp()?,
        })
    }

    pub fn apply_sample(&mut self, sample: &UsageSample) {
        self.lifetime_sent_mb += sample.bytes_sent_delta_mb;
        self.lifetime_received_mb += sample.bytes_received_delta_mb;
        self.lifetime_usage_mb += sample.total_usage_mb;
        self.lifetime_co2_g += sample.co2_grams_estimate;
        self.today_co2_g += sample.co2_grams_estimate;
        self.sample_count += 1;
        self.last_sample_at = Some(sample.timestamp.clone());
    }

    pub fn snapshot(&self, config: &TrackerConfig, now: DateTime<Local>) -> Snapshot {
        let engine = ProjectionEngine::new(
            config.yearly_baseline_g,
            config.personal_reduction_target_pct,
        );
        let projection = engine.project(self.lifetime_co2_g, self.start_date, now.naive_local());
        Snapshot {
            start_date: self.start_date,
            lifetime_sent_mb: self.lifetime_sent_mb,
            lifetime_received_mb: self.lifetime_received_mb,
            lifetime_usage_mb: self.lifetime_usage_mb,
            lifetime_co2_g: self.lifetime_co2_g,
            today_co2_g: self.today_co2_g,
            last_reset_date: self.last_reset_date,
            current_co2_rate_g_per_hour: self.current_co2_rate_g_per_hour,
            average_co2_g_per_hour: projection.average_co2_g_per_hour,
            days_since_start: projection.days_since_start,
            average_daily_co2_g: projection.average_daily_co2_g,
            projected_yearly_g: projection.projected_yearly_g,
            yearly_baseline_g: config.yearly_baseline_g,
            personal_reduction_target_pct: config.personal_reduction_target_pct,
            target_g: projection.target_g,
            status: projection.status,
            sample_count: self.sample_count,
            last_sample_at: self.last_sample_at.clone(),
            published_at: to_utc_timestamp(now),
        }
    }
}

/// Read-only copy of the derived metrics handed to display code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub start_date: NaiveDate,
    pub lifetime_sent_mb: f64,
    pub lifetime_received_mb: f64,
    pub lifetime_usage_mb: f64,
    pub lifetime_co2_g: f64,
    pub today_co2_g: f64,
    pub last_reset_date: NaiveDate,
    pub current_co2_rate_g_per_hour: f64,
    pub average_co2_g_per_hour: f64,
    pub days_since_start: i64,
    pub average_daily_co2_g: f64,
    pub projected_yearly_g: f64,
    pub yearly_baseline_g: f64,
    pub personal_reduction_target_pct: u8,
    pub target_g: f64,
    pub status: TargetStatus,
    pub sample_count: u64,
    pub last_sample_at: Option<String>,
    pub published_at: String,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
