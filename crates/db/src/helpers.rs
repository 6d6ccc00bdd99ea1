use co2_core::UsageSample;
use rusqlite::Row;

pub(crate) fn row_to_usage_sample(
    row: &Row<'_>,
) -> std::result::Result<UsageSample, rusqlite::Error> {
    Ok(UsageSample {
        timestamp: row.get(0)?,
        bytes_sent_delta_mb: row.get(1)?,
        bytes_received_delta_mb: row.get(2)?,
        total_usage_mb: row.get(3)?,
        co2_grams_estimate: row.get(4)?,
    })
}
