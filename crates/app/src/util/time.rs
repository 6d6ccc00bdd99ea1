use chrono::{DateTime, Local, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

use crate::error::{AppError, Result};

/// Storage form of a timestamp: UTC RFC 3339 with millisecond precision.
pub fn to_utc_timestamp(at: DateTime<Local>) -> String {
    at.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The UTC timestamp of local midnight at the start of `date`.
pub fn local_midnight_utc(date: NaiveDate) -> Result<String> {
    let start = Local
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .ok_or_else(|| AppError::Message(format!("no local midnight on {}", date)))?;
    Ok(to_utc_timestamp(start))
}
