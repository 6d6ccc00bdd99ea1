use std::path::PathBuf;

use co2_app::startup::DB_FILE_NAME;

#[derive(Debug, Clone)]
pub struct DataDirResolution {
    pub dir: PathBuf,
    pub matched_existing: bool,
}

pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<DataDirResolution, String> {
    if let Some(dir) = explicit {
        let matched_existing = dir.join(DB_FILE_NAME).exists();
        return Ok(DataDirResolution {
            dir,
            matched_existing,
        });
    }
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(pick_candidate(candidates(PathBuf::from(home))))
}

fn candidates(home: PathBuf) -> Vec<PathBuf> {
    vec![
        home.join(".local").join("share").join("co2-tracker"),
        home.join("Documents").join("CO2_Tracker"),
    ]
}

fn pick_candidate(candidates: Vec<PathBuf>) -> DataDirResolution {
    for candidate in &candidates {
        if candidate.join(DB_FILE_NAME).exists() {
            return DataDirResolution {
                dir: candidate.clone(),
                matched_existing: true,
            };
        }
    }
    DataDirResolution {
        dir: candidates.into_iter().next().unwrap_or_default(),
        matched_existing: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_a_candidate_with_an_existing_database() {
        let temp = tempfile::tempdir().expect("temp dir");
        let home = temp.path().to_path_buf();
        let documents = home.join("Documents").join("CO2_Tracker");
        std::fs::create_dir_all(&documents).expect("create dir");
        std::fs::write(documents.join(DB_FILE_NAME), b"").expect("touch db");

        let resolved = pick_candidate(candidates(home.clone()));
        assert!(resolved.matched_existing);
        assert_eq!(resolved.dir, documents);

        std::fs::remove_file(documents.join(DB_FILE_NAME)).expect("remove db");
        let resolved = pick_candidate(candidates(home.clone()));
        assert!(!resolved.matched_existing);
        assert_eq!(
            resolved.dir,
            home.join(".local").join("share").join("co2-tracker")
        );
    }
}
