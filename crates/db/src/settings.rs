use rusqlite::params;

use crate::Db;
use crate::error::Result;

const PERSONAL_TARGET_KEY: &str = "personal_reduction_target_pct";

impl Db {
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM app_setting WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row.get::<_, String>(0)?))
        } else {
            Ok(None)
        }
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO app_setting (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// Stored target override; unreadable or out-of-range values are ignored.
    pub fn get_personal_target_pct(&self) -> Result<Option<u8>> {
        let pct = self
            .get_setting(PERSONAL_TARGET_KEY)?
            .and_then(|value| value.parse::<u8>().ok())
            .filter(|value| *value <= 100);
        Ok(pct)
    }

    pub fn set_personal_target_pct(&self, pct: u8) -> Result<()> {
        self.set_setting(PERSONAL_TARGET_KEY, &pct.to_string())
    }
}
