//! Attacker → defender → symbol lookup built from a parsed [Matrix].

use std::collections::{HashMap, HashSet};

use log::warn;
use serde::Serialize;

use crate::engine::baseline::{base_type_sums, BaseTypeSums};
use crate::engine::Symbol;
use crate::error::{AmoError, Result};
use crate::matrix::parser::{parse_matrix, Matrix};

pub const ATTACKER_HEADER: &str = "Attacker";

/// Normalized lookup key for a type name.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeName {
    pub display: String,
    #[serde(skip)]
    pub key: String,
}

impl TypeName {
    pub fn new(display: &str) -> Self {
        Self {
            display: display.to_string(),
            key: normalize_key(display),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lookup {
    entries: HashMap<String, HashMap<String, Symbol>>,
}

impl Lookup {
    /// Symbol for an attacker/defender pair by normalized key. Missing pairs are Neutral.
    pub fn symbol(&self, attacker_key: &str, defender_key: &str) -> Symbol {
        self.entries
            .get(attacker_key)
            .and_then(|row| row.get(defender_key))
            .copied()
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn contains_attacker(&self, attacker_key: &str) -> bool {
        self.entries.contains_key(attacker_key)
    }

    pub fn attacker_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, attacker_key: String, defender_key: String, symbol: Symbol) {
        self.entries
            .entry(attacker_key)
            .or_default()
            .insert(defender_key, symbol);
    }
}

fn warn_duplicates<'a>(what: &str, keys: impl Iterator<Item = &'a str>) {
    let mut seen = HashSet::new();
    let duplicates: Vec<&str> = keys.filter(|key| !seen.insert(*key)).collect();
    if !duplicates.is_empty() {
        warn!(
            "duplicate {what} names {duplicates:?}; the last occurrence wins in the lookup"
        );
    }
}

/// Validate the grid and build the lookup plus the ordered defender type list.
///
/// Duplicate normalized names are kept as-is: later columns and rows overwrite
/// earlier ones in the lookup.
pub fn build_lookup(matrix: &Matrix) -> Result<(Lookup, Vec<TypeName>)> {
    let rows = matrix.rows();
    if rows.len() < 2 {
        return Err(AmoError::MissingData { rows: rows.len() });
    }

    let header = &rows[0];
    let first = header.first().map(String::as_str).unwrap_or("");
    if !first.eq_ignore_ascii_case(ATTACKER_HEADER) {
        return Err(AmoError::InvalidHeader {
            found: first.to_string(),
        });
    }

    let types: Vec<TypeName> = header[1..].iter().map(|cell| TypeName::new(cell)).collect();
    warn_duplicates("defender", types.iter().map(|t| t.key.as_str()));

    let mut lookup = Lookup::default();
    let mut attacker_keys = Vec::new();
    for row in matrix.data_rows() {
        let attacker = row.first().map(|cell| cell.trim()).unwrap_or("");
        if attacker.is_empty() {
            continue;
        }
        let attacker_key = normalize_key(attacker);
        for (column, defender) in types.iter().enumerate() {
            let symbol = row
                .get(column + 1)
                .map(|cell| Symbol::parse(cell))
                .unwrap_or_default();
            lookup.insert(attacker_key.clone(), defender.key.clone(), symbol);
        }
        attacker_keys.push(attacker_key);
    }
    warn_duplicates("attacker", attacker_keys.iter().map(String::as_str));

    Ok((lookup, types))
}

/// Everything derived from one successfully loaded matrix. Immutable once built.
#[derive(Debug, Clone)]
pub struct MatrixSnapshot {
    matrix: Matrix,
    types: Vec<TypeName>,
    lookup: Lookup,
    baselines: BaseTypeSums,
}

impl MatrixSnapshot {
    /// Build lookup and baselines together so they can never disagree.
    pub fn from_matrix(matrix: Matrix) -> Result<Self> {
        let (lookup, types) = build_lookup(&matrix)?;
        let baselines = base_type_sums(&lookup, &types);
        Ok(Self {
            matrix,
            types,
            lookup,
            baselines,
        })
    }

    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_matrix(parse_matrix(text)?)
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn types(&self) -> &[TypeName] {
        &self.types
    }

    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.display.as_str()).collect()
    }

    /// Header spelling of `name`, matched case-insensitively (last duplicate
    /// wins, as in the lookup). Unknown names come back trimmed.
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        let key = normalize_key(name);
        self.types
            .iter()
            .rev()
            .find(|t| t.key == key)
            .map_or(name.trim(), |t| t.display.as_str())
    }

    pub fn lookup(&self) -> &Lookup {
        &self.lookup
    }

    pub fn baselines(&self) -> &BaseTypeSums {
        &self.baselines
    }

    /// Data rows after the header, blank lines included.
    pub fn row_count(&self) -> usize {
        self.matrix.data_rows().len()
    }
}
