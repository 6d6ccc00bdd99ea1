mod error;
mod helpers;
mod migrations;
mod settings;
mod tracking_meta;
mod usage_log;

use std::path::Path;

use rusqlite::Connection;

pub use error::{DbError, Result};
pub use tracking_meta::START_DATE_FORMAT;

/// SQLite-backed store for the usage log and tracking metadata.
pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        Ok(Self { conn })
    }
}
