use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const BYTES_PER_MB: f64 = 1_048_576.0;
pub const MB_PER_GB: f64 = 1024.0;
pub const MB_PER_TB: f64 = 1_048_576.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Cumulative byte counters for all interfaces at the moment of a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterReading {
    pub bytes_sent: u64,
    pub bytes_received: u64,
}

impl CounterReading {
    pub fn new(bytes_sent: u64, bytes_received: u64) -> Self {
        Self {
            bytes_sent,
            bytes_received,
        }
    }
}

/// One row of the usage log, produced once per sampling tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSample {
    pub timestamp: String,
    pub bytes_sent_delta_mb: f64,
    pub bytes_received_delta_mb: f64,
    pub total_usage_mb: f64,
    pub co2_grams_estimate: f64,
}

/// Elementwise sums over a set of usage samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageAggregate {
    pub sent_mb: f64,
    pub received_mb: f64,
    pub usage_mb: f64,
    pub co2_g: f64,
}

impl UsageAggregate {
    pub fn add_sample(&mut self, sample: &UsageSample) {
        self.sent_mb += sample.bytes_sent_delta_mb;
        self.received_mb += sample.bytes_received_delta_mb;
        self.usage_mb += sample.total_usage_mb;
        self.co2_g += sample.co2_grams_estimate;
    }

    pub fn is_empty(&self) -> bool {
        self.usage_mb == 0.0 && self.co2_g == 0.0
    }
}

/// Converts counter deltas into CO2 estimates.
///
/// The factor is charged per transferred volume: a tick that moves one GB
/// costs `co2_per_gb` grams regardless of how long the tick lasted, so per-tick
/// values sum to the lifetime value without any rate extrapolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageAccountant {
    co2_per_gb: f64,
}

impl UsageAccountant {
    pub fn new(co2_per_gb: f64) -> Self {
        Self { co2_per_gb }
    }

    pub fn sample(
        &self,
        prev: CounterReading,
        curr: CounterReading,
        timestamp: impl Into<String>,
    ) -> UsageSample {
        // A counter that went backwards was reset; the tick contributes nothing.
        let sent_delta_mb = curr.bytes_sent.saturating_sub(prev.bytes_sent) as f64 / BYTES_PER_MB;
        let received_delta_mb =
            curr.bytes_received.saturating_sub(prev.bytes_received) as f64 / BYTES_PER_MB;
        let total_usage_mb = sent_delta_mb + received_delta_mb;
        UsageSample {
            timestamp: timestamp.into(),
            bytes_sent_delta_mb: sent_delta_mb,
            bytes_received_delta_mb: received_delta_mb,
            total_usage_mb,
            co2_grams_estimate: self.co2_for_mb(total_usage_mb),
        }
    }

    pub fn co2_for_mb(&self, usage_mb: f64) -> f64 {
        (usage_mb / MB_PER_GB) * self.co2_per_gb
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    OnTarget,
    AboveTarget,
}

impl TargetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OnTarget => "On Target",
            Self::AboveTarget => "Above Target",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub days_since_start: i64,
    pub average_daily_co2_g: f64,
    pub average_co2_g_per_hour: f64,
    pub projected_yearly_g: f64,
    pub target_g: f64,
    pub status: TargetStatus,
}

/// Extrapolates lifetime emissions to a yearly figure and compares it with a
/// baseline reduced by the personal target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionEngine {
    pub yearly_baseline_g: f64,
    pub personal_reduction_target_pct: u8,
}

impl ProjectionEngine {
    pub fn new(yearly_baseline_g: f64, personal_reduction_target_pct: u8) -> Self {
        Self {
            yearly_baseline_g,
            personal_reduction_target_pct,
        }
    }

    pub fn target_g(&self) -> f64 {
        target_g(self.yearly_baseline_g, self.personal_reduction_target_pct)
    }

    pub fn project(
        &self,
        lifetime_co2_g: f64,
        start_date: NaiveDate,
        now: NaiveDateTime,
    ) -> Projection {
        let days_since_start = days_since_start(start_date, now);
        let average_daily_co2_g = lifetime_co2_g / days_since_start as f64;
        let projected_yearly_g = average_daily_co2_g * DAYS_PER_YEAR;
        let target_g = self.target_g();
        let status = if projected_yearly_g <= target_g {
            TargetStatus::OnTarget
        } else {
            TargetStatus::AboveTarget
        };
        Projection {
            days_since_start,
            average_daily_co2_g,
            average_co2_g_per_hour: average_per_hour(lifetime_co2_g, start_date, now),
            projected_yearly_g,
            target_g,
            status,
        }
    }
}

pub fn target_g(yearly_baseline_g: f64, personal_reduction_target_pct: u8) -> f64 {
    yearly_baseline_g * (1.0 - f64::from(personal_reduction_target_pct) / 100.0)
}

/// Whole days elapsed since the start date's midnight, never less than one.
pub fn days_since_start(start_date: NaiveDate, now: NaiveDateTime) -> i64 {
    let elapsed = now - start_date.and_time(chrono::NaiveTime::MIN);
    elapsed.num_days().max(1)
}

fn average_per_hour(lifetime_co2_g: f64, start_date: NaiveDate, now: NaiveDateTime) -> f64 {
    let elapsed = now - start_date.and_time(chrono::NaiveTime::MIN);
    let hours = elapsed.num_seconds() as f64 / 3600.0;
    if hours > 0.0 {
        lifetime_co2_g / hours
    } else {
        0.0
    }
}

pub fn format_co2(co2_grams: f64) -> String {
    if co2_grams >= 1_000_000.0 {
        format!("{:.2} tonnes", co2_grams / 1_000_000.0)
    } else if co2_grams >= 1_000.0 {
        format!("{:.2} kg", co2_grams / 1_000.0)
    } else {
        format!("{:.2} grams", co2_grams)
    }
}

pub fn format_data_units(data_mb: f64) -> String {
    if data_mb >= MB_PER_TB {
        format!("{:.2} TB", data_mb / MB_PER_TB)
    } else if data_mb >= MB_PER_GB {
        format!("{:.2} GB", data_mb / MB_PER_GB)
    } else {
        format!("{:.2} MB", data_mb)
    }
}
