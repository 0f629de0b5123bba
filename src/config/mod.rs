use std::path::{Path, PathBuf};

use crate::error::{ReadalongError, Result};

pub const DATA_DIR_ENV: &str = "READALONG_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "data";
const CATALOG_FILE: &str = "catalog.json";
const LEARNER_FILE: &str = "learner.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Explicit override first, then `READALONG_DATA_DIR`, then `./data`.
    pub fn from_override(path: Option<PathBuf>) -> Result<Self> {
        let env_dir = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
        Self::resolve(path, env_dir)
    }

    fn resolve(path: Option<PathBuf>, env_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = path
            .or(env_dir.filter(|dir| !dir.as_os_str().is_empty()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        reject_file(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(CATALOG_FILE)
    }

    pub fn learner_path(&self) -> PathBuf {
        self.data_dir.join(LEARNER_FILE)
    }

    pub fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(|err| {
            ReadalongError::io(
                format!("creating data directory {}", self.data_dir.display()),
                err,
            )
        })
    }
}

fn reject_file(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(ReadalongError::invalid_input(format!(
            "data path {:?} is not a directory",
            path
        )));
    }
    Ok(())
}
