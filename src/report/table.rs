//! Tab-separated tables for terminal output.

use std::fmt::Write as _;

use crate::engine::{BaseTypeSums, TripleFormChart};
use crate::report::csv_export::{chart_header, chart_rows};

pub fn chart_table(chart: &TripleFormChart) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", chart_header(chart).join("\t"));
    for row in chart_rows(chart) {
        let _ = writeln!(out, "{}", row.join("\t"));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "form\ttype\tcup_sum\tbase_sum\tdelta");
    for summary in &chart.summaries {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            summary.form, summary.type_name, summary.cup_sum, summary.base_sum, summary.delta
        );
    }
    out
}

pub fn baseline_table(baselines: &BaseTypeSums) -> String {
    let mut out = String::from("type\tbase_sum\n");
    for entry in baselines.entries() {
        let _ = writeln!(out, "{}\t{}", entry.type_name, entry.sum);
    }
    out
}
