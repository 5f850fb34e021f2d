//! Print the first sheet of a workbook as comma-delimited WRNX matrix text.
//! Usage: cargo run --bin matrix_from_xlsx -- path/to/matrix.xlsx > matrix.csv

use std::path::Path;

use amo::matrix::{read_workbook_matrix, MatrixSnapshot};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let path = std::env::args()
        .nth(1)
        .ok_or("Usage: matrix_from_xlsx <path-to.xlsx>")?;
    let path = Path::new(&path);
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }

    let matrix = read_workbook_matrix(path)?;
    let snapshot = MatrixSnapshot::from_matrix(matrix)?;
    eprintln!(
        "{}: {} types, {} rows",
        path.display(),
        snapshot.types().len(),
        snapshot.row_count()
    );
    println!("{}", snapshot.matrix().to_delimited_text());
    Ok(())
}
