use std::fs;
use std::path::PathBuf;

use co2_app::TrackerConfig;
use serde::{Deserialize, Serialize};

const CONFIG_DIR_NAME: &str = "co2-tracker";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_REPORT_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub report_interval_secs: u64,
    pub tracker: TrackerConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            report_interval_secs: DEFAULT_REPORT_INTERVAL_SECS,
            tracker: TrackerConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub paths: ConfigPaths,
    pub created: bool,
}

pub fn load_or_create() -> Result<ConfigLoad, String> {
    load_or_create_in(config_dir()?)
}

pub fn load_or_create_in(dir: PathBuf) -> Result<ConfigLoad, String> {
    fs::create_dir_all(&dir)
        .map_err(|err| format!("create config dir {}: {}", dir.display(), err))?;
    let file = dir.join(CONFIG_FILE_NAME);
    let paths = ConfigPaths { file };

    if paths.file.exists() {
        let contents = fs::read_to_string(&paths.file)
            .map_err(|err| format!("read config {}: {}", paths.file.display(), err))?;
        let config: CliConfig = toml::from_str(&contents)
            .map_err(|err| format!("parse config {}: {}", paths.file.display(), err))?;
        return Ok(ConfigLoad {
            config,
            paths,
            created: false,
        });
    }

    let config = CliConfig::default();
    let contents =
        toml::to_string_pretty(&config).map_err(|err| format!("serialize config: {}", err))?;
    fs::write(&paths.file, contents)
        .map_err(|err| format!("write config {}: {}", paths.file.display(), err))?;

    Ok(ConfigLoad {
        config,
        paths,
        created: true,
    })
}

fn config_dir() -> Result<PathBuf, String> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME").filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(dir).join(CONFIG_DIR_NAME));
    }
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(PathBuf::from(home).join(".config").join(CONFIG_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_defaults_then_reads_them_back() {
        let temp = tempfile::tempdir().expect("temp dir");
        let dir = temp.path().join("co2-tracker");

        let created = load_or_create_in(dir.clone()).expect("create");
        assert!(created.created);
        assert_eq!(created.config, CliConfig::default());

        let loaded = load_or_create_in(dir.clone()).expect("load");
        assert!(!loaded.created);
        assert_eq!(loaded.config, CliConfig::default());
        assert!(dir.join(CONFIG_FILE_NAME).is_file());
    }

    #[test]
    fn partial_tracker_table_keeps_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
            [tracker]
            co2_per_gb = 10.0
            personal_reduction_target_pct = 20
            "#,
        )
        .expect("parse");
        assert_eq!(config.report_interval_secs, DEFAULT_REPORT_INTERVAL_SECS);
        assert_eq!(config.tracker.co2_per_gb, 10.0);
        assert_eq!(config.tracker.personal_reduction_target_pct, 20);
        assert_eq!(config.tracker.sample_interval_secs, 60);
    }
}
