use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

pub const DEFAULT_CO2_PER_GB: f64 = 54.86;
pub const DEFAULT_YEARLY_BASELINE_G: f64 = 200_000.0;
pub const DEFAULT_PERSONAL_TARGET_PCT: u8 = 10;
pub const DEFAULT_SAMPLE_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_RESET_POLL_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_RESET_CODE: &str = "12345678";
/// Longest sampling or reset-poll interval accepted: one day.
pub const MAX_INTERVAL_SECS: u64 = 86_400;

/// Engine parameters supplied at startup.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Grams of CO2 charged per GB transferred. Applied per transferred
    /// volume, never extrapolated over time.
    pub co2_per_gb: f64,
    /// Assumed average yearly emissions in grams.
    pub yearly_baseline_g: f64,
    pub personal_reduction_target_pct: u8,
    pub sample_interval_secs: u64,
    pub reset_poll_interval_secs: u64,
    pub reset_code: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            co2_per_gb: DEFAULT_CO2_PER_GB,
            yearly_baseline_g: DEFAULT_YEARLY_BASELINE_G,
            personal_reduction_target_pct: DEFAULT_PERSONAL_TARGET_PCT,
            sample_interval_secs: DEFAULT_SAMPLE_INTERVAL_SECS,
            reset_poll_interval_secs: DEFAULT_RESET_POLL_INTERVAL_SECS,
            reset_code: DEFAULT_RESET_CODE.to_string(),
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.co2_per_gb.is_finite() || self.co2_per_gb < 0.0 {
            return Err(AppError::Config(format!(
                "co2_per_gb must be a non-negative number, got {}",
                self.co2_per_gb
            )));
        }
        if !self.yearly_baseline_g.is_finite() || self.yearly_baseline_g < 0.0 {
            return Err(AppError::Config(format!(
                "yearly_baseline_g must be a non-negative number, got {}",
                self.yearly_baseline_g
            )));
        }
        validate_target_pct(i64::from(self.personal_reduction_target_pct))?;
        validate_interval("sample_interval_secs", self.sample_interval_secs)?;
        validate_interval("reset_poll_interval_secs", self.reset_poll_interval_secs)?;
        if self.reset_code.is_empty() {
            return Err(AppError::Config("reset_code must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_secs(self.sample_interval_secs)
    }

    pub fn reset_poll_interval(&self) -> Duration {
        Duration::from_secs(self.reset_poll_interval_secs)
    }
}

fn validate_interval(name: &str, secs: u64) -> Result<()> {
    if (1..=MAX_INTERVAL_SECS).contains(&secs) {
        Ok(())
    } else {
        Err(AppError::Config(format!(
            "{} must be between 1 and {}, got {}",
            name, MAX_INTERVAL_SECS, secs
        )))
    }
}

pub fn validate_target_pct(pct: i64) -> Result<u8> {
    if (0..=100).contains(&pct) {
        Ok(pct as u8)
    } else {
        Err(AppError::Config(format!(
            "personal reduction target must be between 0 and 100, got {}",
            pct
        )))
    }
}
