//! Read a WRNX matrix from the first sheet of a workbook (.xlsx/.xlsm/.xls/.xlsb/.ods).

use std::path::Path;

use calamine::{Data, Reader};

use crate::error::{AmoError, Result};
use crate::matrix::parser::{Delimiter, Matrix};

pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

pub fn is_spreadsheet_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => format!("{f}"),
        Data::Int(i) => format!("{i}"),
        Data::Bool(b) => format!("{b}"),
        _ => String::new(),
    }
}

/// Grid of the first worksheet. Trailing empty rows are dropped; the grid keeps
/// comma as its delimiter for re-serialization.
pub fn read_workbook_matrix(path: &Path) -> Result<Matrix> {
    let mut workbook = calamine::open_workbook_auto(path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(AmoError::EmptyInput)?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    while rows
        .last()
        .map_or(false, |row| row.iter().all(String::is_empty))
    {
        rows.pop();
    }
    if rows.is_empty() {
        return Err(AmoError::EmptyInput);
    }
    Ok(Matrix::new(rows, Delimiter::Comma))
}
