//! Embedded sample matrix: the fourteen GoddessEND types with every cell Neutral.

use crate::matrix::lookup::ATTACKER_HEADER;
use crate::matrix::parser::{Delimiter, Matrix};

pub const SAMPLE_TYPES: [&str; 14] = [
    "Fire",
    "Ice",
    "Wind",
    "Water",
    "Earth",
    "Poison",
    "Celestial",
    "Dark",
    "Light",
    "Thunder",
    "Artisan",
    "Totem",
    "Spirit",
    "Hero",
];

/// Structure-only matrix. Each data row carries just its type name, so every
/// interaction reads as `N` until a real matrix is loaded.
pub fn sample_matrix() -> Matrix {
    let mut header = vec![ATTACKER_HEADER.to_string()];
    header.extend(SAMPLE_TYPES.iter().map(|t| t.to_string()));

    let mut rows = vec![header];
    rows.extend(SAMPLE_TYPES.iter().map(|t| vec![t.to_string()]));
    Matrix::new(rows, Delimiter::Comma)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::lookup::MatrixSnapshot;

    #[test]
    fn sample_is_loadable_and_neutral() {
        let snapshot = MatrixSnapshot::from_matrix(sample_matrix()).expect("sample");
        assert_eq!(snapshot.types().len(), 14);
        assert_eq!(snapshot.row_count(), 14);
        assert!(snapshot.baselines().entries().iter().all(|b| b.sum == 0));
    }
}
