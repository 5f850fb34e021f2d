//! Delimited-text matrix parsing (comma, semicolon or tab; detected from the first line).
//!
//! Cells are never quoted or escaped in a WRNX matrix, so a line is split on the
//! delimiter directly. Structure is not validated here; see [crate::matrix::lookup].

use serde::Serialize;

use crate::error::{AmoError, Result};

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
}

impl Delimiter {
    /// Detection order; earlier entries win ties.
    pub const CANDIDATES: [Delimiter; 3] = [Self::Comma, Self::Semicolon, Self::Tab];

    pub const fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Semicolon => ';',
            Self::Tab => '\t',
        }
    }
}

/// Rectangular-ish grid of trimmed cells. Row 0 is the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<Vec<String>>,
    delimiter: Delimiter,
}

impl Matrix {
    pub fn new(rows: Vec<Vec<String>>, delimiter: Delimiter) -> Self {
        Self { rows, delimiter }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows after the header, including blank ones.
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Serialize back to delimited text using the delimiter the matrix was read with.
    pub fn to_delimited_text(&self) -> String {
        let sep = self.delimiter.as_char().to_string();
        self.rows
            .iter()
            .map(|row| row.join(&sep))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn trim_cell(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == BOM)
}

/// Pick the candidate that splits `line` into the most fields.
pub fn detect_delimiter(line: &str) -> Delimiter {
    let mut best = Delimiter::Comma;
    let mut best_fields = 0usize;
    for candidate in Delimiter::CANDIDATES {
        let fields = line.split(candidate.as_char()).count();
        if fields > best_fields {
            best = candidate;
            best_fields = fields;
        }
    }
    best
}

/// Parse raw matrix text into a grid of trimmed cells.
pub fn parse_matrix(input: &str) -> Result<Matrix> {
    let text = trim_cell(input);
    if text.is_empty() {
        return Err(AmoError::EmptyInput);
    }

    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();
    let delimiter = detect_delimiter(lines[0]);

    let rows = lines
        .iter()
        .map(|line| {
            line.split(delimiter.as_char())
                .map(|cell| trim_cell(cell).to_string())
                .collect()
        })
        .collect();

    Ok(Matrix::new(rows, delimiter))
}
