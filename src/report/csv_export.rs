//! Triple-form chart → CSV download (one block of Cups/%/Reaction per form).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::engine::{Form, TripleFormChart};
use crate::error::{AmoError, Result};

pub const ATTACK_HEADER: &str = "Attack";

/// Header row: `Attack`, then per form `<title>`, `<Form> %`, `<Form> Reaction`,
/// with an empty spacer column between forms.
pub fn chart_header(chart: &TripleFormChart) -> Vec<String> {
    let mut header = vec![ATTACK_HEADER.to_string()];
    for (i, form) in Form::ALL.iter().enumerate() {
        if i > 0 {
            header.push(String::new());
        }
        header.push(chart.roles.title(*form));
        header.push(format!("{form} %"));
        header.push(format!("{form} Reaction"));
    }
    header
}

/// Data rows, one per attacking type, in matrix order.
pub fn chart_rows(chart: &TripleFormChart) -> Vec<Vec<String>> {
    let meso = chart.form(Form::Meso);
    (0..meso.len())
        .map(|i| {
            let mut row = vec![meso[i].attacker.clone()];
            for (n, form) in Form::ALL.iter().enumerate() {
                if n > 0 {
                    row.push(String::new());
                }
                match chart.form(*form).get(i) {
                    Some(form_row) => {
                        row.push(form_row.cups());
                        row.push(form_row.total.to_string());
                        row.push(form_row.reaction.label().to_string());
                    }
                    None => row.extend([String::new(), String::new(), String::new()]),
                }
            }
            row
        })
        .collect()
}

pub fn write_chart_csv<W: Write>(chart: &TripleFormChart, out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);
    writer.write_record(chart_header(chart))?;
    for row in chart_rows(chart) {
        writer.write_record(&row)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn chart_csv_string(chart: &TripleFormChart) -> Result<String> {
    let mut buf = Vec::new();
    write_chart_csv(chart, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn write_chart_csv_file(chart: &TripleFormChart, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| AmoError::io(path, e))?;
    write_chart_csv(chart, file)
}
