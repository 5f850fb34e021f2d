//! Error taxonomy for matrix loading, chart computation and persistence.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::engine::Form;

pub type Result<T> = std::result::Result<T, AmoError>;

#[derive(Debug, Error)]
pub enum AmoError {
    /// Nothing left after stripping the byte-order mark and whitespace.
    #[error("matrix input is empty")]
    EmptyInput,

    /// Fewer than one header row plus one data row.
    #[error("matrix needs a header row and at least one data row (found {rows} row(s))")]
    MissingData { rows: usize },

    #[error("first column must be \"Attacker\", found {found:?}")]
    InvalidHeader { found: String },

    #[error("no matrix loaded")]
    NotLoaded,

    #[error("no {form} type selected")]
    Selection { form: Form },

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl AmoError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by the caller's input rather than the host.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::MissingData { .. }
                | Self::InvalidHeader { .. }
                | Self::NotLoaded
                | Self::Selection { .. }
                | Self::Json(_)
        )
    }
}
