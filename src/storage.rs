//! Named slot on disk holding the last remembered matrix in delimited-text form.

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{AmoError, Result};
use crate::matrix::Matrix;

pub const DEFAULT_STORAGE_DIR: &str = "data";
pub const DEFAULT_SLOT: &str = "GE_matrix_csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RememberedMatrix {
    pub slot: String,
    pub saved_at: String,
    pub matrix_text: String,
}

#[derive(Debug, Clone)]
pub struct MatrixStore {
    dir: PathBuf,
    slot: String,
}

impl MatrixStore {
    pub fn new(dir: impl Into<PathBuf>, slot: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            slot: slot.into(),
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_slot(&self.slot)))
    }

    /// Overwrite the slot with `matrix`.
    pub fn remember(&self, matrix: &Matrix) -> Result<RememberedMatrix> {
        let record = RememberedMatrix {
            slot: self.slot.clone(),
            saved_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            matrix_text: matrix.to_delimited_text(),
        };
        fs::create_dir_all(&self.dir).map_err(|e| AmoError::io(&self.dir, e))?;
        let path = self.path();
        let raw = serde_json::to_string_pretty(&record)?;
        fs::write(&path, raw).map_err(|e| AmoError::io(&path, e))?;
        info!("matrix stored in slot '{}' ({})", self.slot, path.display());
        Ok(record)
    }

    /// Clear the slot. Returns whether anything was removed.
    pub fn forget(&self) -> Result<bool> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("stored matrix cleared from slot '{}'", self.slot);
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AmoError::io(&path, e)),
        }
    }

    pub fn restore(&self) -> Result<Option<RememberedMatrix>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).map_err(|e| AmoError::io(&path, e))?;
        Ok(Some(serde_json::from_str(&raw)?))
    }
}

impl Default for MatrixStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_DIR, DEFAULT_SLOT)
    }
}

fn sanitize_slot(slot: &str) -> String {
    let cleaned: String = slot
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        DEFAULT_SLOT.to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_names_are_file_safe() {
        assert_eq!(sanitize_slot("GE_matrix_csv"), "GE_matrix_csv");
        assert_eq!(sanitize_slot("../evil"), "___evil");
        assert_eq!(sanitize_slot(""), DEFAULT_SLOT);
    }
}
