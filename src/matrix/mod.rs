//! Matrix ingestion: delimited text or workbook → grid → normalized lookup.

pub mod lookup;
pub mod parser;
pub mod sample;
pub mod spreadsheet;

use std::fs;
use std::path::Path;

pub use lookup::{build_lookup, normalize_key, Lookup, MatrixSnapshot, TypeName, ATTACKER_HEADER};
pub use parser::{detect_delimiter, parse_matrix, Delimiter, Matrix};
pub use sample::{sample_matrix, SAMPLE_TYPES};
pub use spreadsheet::{is_spreadsheet_path, read_workbook_matrix};

use crate::error::{AmoError, Result};

/// Read a matrix file, choosing the workbook reader by extension.
pub fn load_matrix_file(path: impl AsRef<Path>) -> Result<Matrix> {
    let path = path.as_ref();
    if is_spreadsheet_path(path) {
        return read_workbook_matrix(path);
    }
    let raw = fs::read_to_string(path).map_err(|e| AmoError::io(path, e))?;
    parse_matrix(&raw)
}
