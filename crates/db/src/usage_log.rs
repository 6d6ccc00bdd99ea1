use chrono::NaiveDate;
use co2_core::{UsageAggregate, UsageSample};
use rusqlite::{OptionalExtension, params};

use crate::Db;
use crate::error::Result;
use crate::helpers::row_to_usage_sample;
use crate::tracking_meta::write_start_date;

impl Db {
    /// Appends one sample. The `daily_usage` column carries the CO2 estimate.
    pub fn append_sample(&mut self, sample: &UsageSample) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO usage_log (timestamp, data_sent, data_received, total_usage, daily_usage)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                sample.timestamp,
                sample.bytes_sent_delta_mb,
                sample.bytes_received_delta_mb,
                sample.total_usage_mb,
                sample.co2_grams_estimate,
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn aggregate(&self) -> Result<UsageAggregate> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT
              COALESCE(SUM(data_sent), 0.0),
              COALESCE(SUM(data_received), 0.0),
              COALESCE(SUM(total_usage), 0.0),
              COALESCE(SUM(daily_usage), 0.0)
            FROM usage_log
            "#,
        )?;
        let aggregate = stmt.query_row([], |row| {
            Ok(UsageAggregate {
                sent_mb: row.get(0)?,
                received_mb: row.get(1)?,
                usage_mb: row.get(2)?,
                co2_g: row.get(3)?,
            })
        })?;
        Ok(aggregate)
    }

    /// Sums the samples recorded at or after `since` (UTC RFC 3339).
    pub fn aggregate_since(&self, since: &str) -> Result<UsageAggregate> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT
              COALESCE(SUM(data_sent), 0.0),
              COALESCE(SUM(data_received), 0.0),
              COALESCE(SUM(total_usage), 0.0),
              COALESCE(SUM(daily_usage), 0.0)
            FROM usage_log
            WHERE timestamp >= ?1
            "#,
        )?;
        let aggregate = stmt.query_row(params![since], |row| {
            Ok(UsageAggregate {
                sent_mb: row.get(0)?,
                received_mb: row.get(1)?,
                usage_mb: row.get(2)?,
                co2_g: row.get(3)?,
            })
        })?;
        Ok(aggregate)
    }

    /// Most recent samples, newest first.
    pub fn recent_samples(&self, limit: usize) -> Result<Vec<UsageSample>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT timestamp, data_sent, data_received, total_usage, daily_usage
            FROM usage_log
            ORDER BY timestamp DESC, rowid DESC
            LIMIT ?1
            "#,
        )?;
        let rows = stmt.query_map(params![limit as i64], row_to_usage_sample)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn count_samples(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM usage_log", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    pub fn last_sample_timestamp(&self) -> Result<Option<String>> {
        let ts = self
            .conn
            .query_row(
                "SELECT timestamp FROM usage_log ORDER BY timestamp DESC, rowid DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(ts)
    }

    /// Drops every sample and restarts tracking from `today`.
    pub fn clear(&mut self, today: NaiveDate) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM usage_log", [])?;
        write_start_date(&tx, today)?;
        tx.commit()?;
        Ok(())
    }
}
