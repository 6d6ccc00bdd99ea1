use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};

use crate::Db;
use crate::error::Result;

pub const START_DATE_FORMAT: &str = "%Y-%m-%d";

impl Db {
    pub fn get_start_date(&self) -> Result<Option<NaiveDate>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT start_date FROM tracking_meta ORDER BY rowid ASC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        match value {
            Some(value) => Ok(Some(NaiveDate::parse_from_str(&value, START_DATE_FORMAT)?)),
            None => Ok(None),
        }
    }

    pub fn set_start_date(&mut self, date: NaiveDate) -> Result<()> {
        let tx = self.conn.transaction()?;
        write_start_date(&tx, date)?;
        tx.commit()?;
        Ok(())
    }

    /// Returns the stored start date, recording `today` when none exists yet.
    pub fn get_or_init_start_date(&mut self, today: NaiveDate) -> Result<NaiveDate> {
        if let Some(date) = self.get_start_date()? {
            return Ok(date);
        }
        self.set_start_date(today)?;
        Ok(today)
    }
}

pub(crate) fn write_start_date(conn: &Connection, date: NaiveDate) -> Result<()> {
    conn.execute("DELETE FROM tracking_meta", [])?;
    conn.execute(
        "INSERT INTO tracking_meta (start_date) VALUES (?1)",
        params![date.format(START_DATE_FORMAT).to_string()],
    )?;
    Ok(())
}
