//! Application configuration: optional `amo.yaml` plus `AMO_*` environment overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AmoError, Result};
use crate::storage::{MatrixStore, DEFAULT_SLOT, DEFAULT_STORAGE_DIR};

pub const DEFAULT_CONFIG_PATH: &str = "amo.yaml";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_CHART_NAME: &str = "Goddess";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub storage_dir: PathBuf,
    pub storage_slot: String,
    /// Loaded at startup when nothing is remembered.
    pub default_matrix: Option<PathBuf>,
    pub use_sample_matrix: bool,
    pub chart_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_slot: DEFAULT_SLOT.to_string(),
            default_matrix: None,
            use_sample_matrix: false,
            chart_name: DEFAULT_CHART_NAME.to_string(),
        }
    }
}

impl AppConfig {
    pub fn store(&self) -> MatrixStore {
        MatrixStore::new(&self.storage_dir, &self.storage_slot)
    }

    /// Apply `AMO_BIND`, `AMO_STORAGE_DIR` and `AMO_DEFAULT_MATRIX` on top of the file values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(bind) = env::var("AMO_BIND") {
            self.bind_addr = bind;
        }
        if let Ok(dir) = env::var("AMO_STORAGE_DIR") {
            self.storage_dir = PathBuf::from(dir);
        }
        if let Ok(path) = env::var("AMO_DEFAULT_MATRIX") {
            self.default_matrix = Some(PathBuf::from(path)).filter(|p| !p.as_os_str().is_empty());
        }
        self
    }
}

/// Load a YAML config file. A missing file yields the defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let raw = fs::read_to_string(path).map_err(|e| AmoError::io(path, e))?;
    if raw.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    Ok(serde_yaml::from_str(&raw)?)
}

/// Config from `$AMO_CONFIG` (or `amo.yaml`), then environment overrides.
pub fn config_from_env() -> Result<AppConfig> {
    let path = env::var("AMO_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    Ok(load_config(path)?.with_env_overrides())
}
