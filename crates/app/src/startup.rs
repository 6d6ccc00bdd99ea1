use std::path::PathBuf;

use crate::Result;

pub const DB_FILE_NAME: &str = "co2-usage.sqlite";
pub const ERROR_LOG_FILE_NAME: &str = "error_log.txt";

#[derive(Clone, Debug)]
pub struct AppPaths {
    pub app_data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub error_log_path: PathBuf,
}

impl AppPaths {
    pub fn new(app_data_dir: PathBuf) -> Self {
        let db_path = app_data_dir.join(DB_FILE_NAME);
        let log_dir = app_data_dir.join("logs");
        let error_log_path = log_dir.join(ERROR_LOG_FILE_NAME);
        Self {
            app_data_dir,
            db_path,
            log_dir,
            error_log_path,
        }
    }
}

pub fn ensure_app_data_dir(paths: &AppPaths) -> Result<()> {
    std::fs::create_dir_all(&paths.app_data_dir)?;
    std::fs::create_dir_all(&paths.log_dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_live_under_data_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        let paths = AppPaths::new(dir.path().join("co2"));
        assert_eq!(paths.db_path, dir.path().join("co2").join(DB_FILE_NAME));
        assert_eq!(
            paths.error_log_path,
            dir.path().join("co2").join("logs").join(ERROR_LOG_FILE_NAME)
        );

        ensure_app_data_dir(&paths).expect("create dirs");
        assert!(paths.log_dir.is_dir());
    }
}
