//! Holds the current matrix snapshot and runs loads and computes against it.
//!
//! A load builds a complete new [MatrixSnapshot] first and only then swaps it in,
//! so a failed load leaves the previous snapshot untouched.

use std::fmt;
use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::config::AppConfig;
use crate::engine::{compute_chart, RoleAssignment, TripleFormChart};
use crate::error::{AmoError, Result};
use crate::matrix::{load_matrix_file, parse_matrix, sample_matrix, Matrix, MatrixSnapshot};
use crate::storage::{MatrixStore, RememberedMatrix};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum MatrixSource {
    File(String),
    Upload,
    Storage,
    Sample,
}

impl fmt::Display for MatrixSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file {path}"),
            Self::Upload => f.write_str("upload"),
            Self::Storage => f.write_str("storage"),
            Self::Sample => f.write_str("sample"),
        }
    }
}

#[derive(Debug, Clone)]
struct Loaded {
    snapshot: MatrixSnapshot,
    source: MatrixSource,
}

#[derive(Debug, Clone, Default)]
pub struct Workbench {
    current: Option<Loaded>,
}

impl Workbench {
    pub fn new() -> Self {
        Self::default()
    }

    /// Startup order: remembered slot, configured default file, embedded sample, empty.
    pub fn bootstrap(config: &AppConfig, store: &MatrixStore) -> Self {
        let mut workbench = Self::new();

        match store.restore() {
            Ok(Some(remembered)) => {
                match workbench
                    .load_text(&remembered.matrix_text, MatrixSource::Storage)
                    .map(|_| ())
                {
                    Ok(()) => return workbench,
                    Err(err) => warn!(
                        "ignoring stored matrix in slot '{}': {err}",
                        remembered.slot
                    ),
                }
            }
            Ok(None) => {}
            Err(err) => warn!("ignoring unreadable storage slot '{}': {err}", store.slot()),
        }

        if let Some(path) = &config.default_matrix {
            match workbench.load_file(path).map(|_| ()) {
                Ok(()) => return workbench,
                Err(err) => warn!("default matrix {} not loaded: {err}", path.display()),
            }
        }

        if config.use_sample_matrix {
            if let Err(err) = workbench.load_sample() {
                warn!("sample matrix not loaded: {err}");
            }
        }
        workbench
    }

    /// Replace the current snapshot with one built from `matrix`.
    pub fn load_matrix(&mut self, matrix: Matrix, source: MatrixSource) -> Result<&MatrixSnapshot> {
        let snapshot = MatrixSnapshot::from_matrix(matrix)?;
        info!(
            "matrix loaded from {source}: {} types, {} rows, {} attackers",
            snapshot.types().len(),
            snapshot.row_count(),
            snapshot.lookup().attacker_count()
        );
        let loaded = self.current.insert(Loaded { snapshot, source });
        Ok(&loaded.snapshot)
    }

    pub fn load_text(&mut self, text: &str, source: MatrixSource) -> Result<&MatrixSnapshot> {
        let matrix = parse_matrix(text)?;
        self.load_matrix(matrix, source)
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&MatrixSnapshot> {
        let path = path.as_ref();
        let matrix = load_matrix_file(path)?;
        self.load_matrix(matrix, MatrixSource::File(path.display().to_string()))
    }

    pub fn load_sample(&mut self) -> Result<&MatrixSnapshot> {
        self.load_matrix(sample_matrix(), MatrixSource::Sample)
    }

    pub fn snapshot(&self) -> Result<&MatrixSnapshot> {
        self.current
            .as_ref()
            .map(|loaded| &loaded.snapshot)
            .ok_or(AmoError::NotLoaded)
    }

    pub fn source(&self) -> Option<&MatrixSource> {
        self.current.as_ref().map(|loaded| &loaded.source)
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// Human status line for the current state.
    pub fn status(&self) -> String {
        match &self.current {
            None => "No matrix loaded.".to_string(),
            Some(Loaded { snapshot, source }) => match source {
                MatrixSource::Storage => format!(
                    "Restored matrix from storage: {} types.",
                    snapshot.types().len()
                ),
                MatrixSource::Sample => format!(
                    "Sample matrix loaded: {} types, all Neutral. Load your real WRNX matrix.",
                    snapshot.types().len()
                ),
                MatrixSource::File(_) | MatrixSource::Upload => format!(
                    "Matrix loaded: {} types, {} rows.",
                    snapshot.types().len(),
                    snapshot.row_count()
                ),
            },
        }
    }

    pub fn compute(&self, roles: &RoleAssignment, name: &str) -> Result<TripleFormChart> {
        compute_chart(self.snapshot()?, roles, name)
    }

    pub fn remember(&self, store: &MatrixStore) -> Result<RememberedMatrix> {
        store.remember(self.snapshot()?.matrix())
    }
}
