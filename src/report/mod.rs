pub mod csv_export;
pub mod table;

pub use csv_export::{
    chart_csv_string, chart_header, chart_rows, write_chart_csv, write_chart_csv_file,
};
pub use table::{baseline_table, chart_table};
