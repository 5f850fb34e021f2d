use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_amo")
}

fn fixture(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("matrices")
        .join(name)
        .display()
        .to_string()
}

/// Runs the binary with storage and config isolated under `home`.
fn run(home: &TempDir, args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .env("AMO_CONFIG", home.path().join("amo.yaml"))
        .env("AMO_STORAGE_DIR", home.path().join("data"))
        .env_remove("AMO_DEFAULT_MATRIX")
        .env("RUST_LOG", "warn")
        .output()
        .expect("amo should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn unknown_command_prints_usage() {
    let home = TempDir::new().expect("tempdir");
    let output = run(&home, &["optimize"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("usage: amo"));
}

#[test]
fn validate_reports_ok_and_failures() {
    let home = TempDir::new().expect("tempdir");

    let output = run(&home, &["validate", &fixture("elements.csv")]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).trim(), "matrix ok: 4 types, 4 rows");

    let output = run(&home, &["validate", &fixture("bad_header.csv")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("validation failed"));

    let output = run(&home, &["validate"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("usage: amo validate <path-to-matrix>"));
}

#[test]
fn compute_emits_chart_json() {
    let home = TempDir::new().expect("tempdir");
    let output = run(
        &home,
        &[
            "compute",
            "Fire",
            "Ice",
            "Wind",
            "--matrix",
            &fixture("elements.csv"),
            "--name",
            "Ember",
        ],
    );
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let payload: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("compute should emit json");
    assert_eq!(payload["name"], "Ember");
    assert_eq!(payload["forms"].as_array().map(Vec::len), Some(3));
    assert_eq!(payload["forms"][2]["rows"][3]["reaction"], "Immune");
    assert_eq!(payload["summaries"][2]["delta"], -75);
}

#[test]
fn compute_table_and_csv_outputs() {
    let home = TempDir::new().expect("tempdir");
    let csv_path: PathBuf = home.path().join("chart.csv");
    let output = run(
        &home,
        &[
            "compute",
            "Fire",
            "Ice",
            "Wind",
            "--matrix",
            &fixture("elements.tsv"),
            "--table",
            "--csv",
            csv_path.to_str().expect("utf-8 path"),
        ],
    );
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("Attack\t"));
    assert!(stderr(&output).contains("wrote"));

    let csv = fs::read_to_string(&csv_path).expect("csv written");
    assert!(csv.starts_with("Attack,Fire / Ice / Wind,Meso %,Meso Reaction,,"));
    assert_eq!(csv.lines().count(), 5);
}

#[test]
fn compute_without_selection_fails() {
    let home = TempDir::new().expect("tempdir");
    let output = run(&home, &["compute", "Fire", "--matrix", &fixture("elements.csv")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no Alpha type selected"));
}

#[test]
fn compute_without_any_matrix_fails() {
    let home = TempDir::new().expect("tempdir");
    let output = run(&home, &["compute", "Fire", "Ice", "Wind"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no matrix loaded"));
}

#[test]
fn remember_then_types_then_forget() {
    let home = TempDir::new().expect("tempdir");

    let output = run(&home, &["remember", &fixture("elements_semicolon.csv")]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("matrix stored: slot 'GE_matrix_csv'"));

    let output = run(&home, &["types"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output).lines().collect::<Vec<_>>(),
        vec!["Fire", "Ice", "Wind", "Earth"]
    );

    let output = run(&home, &["baseline"]);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("baseline json");
    assert_eq!(payload[3]["type_name"], "Earth");
    assert_eq!(payload[3]["sum"], 0);

    let output = run(&home, &["forget"]);
    assert_eq!(stdout(&output).trim(), "stored matrix cleared");
    let output = run(&home, &["forget"]);
    assert_eq!(stdout(&output).trim(), "no stored matrix");

    let output = run(&home, &["types"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn config_file_can_enable_sample_matrix() {
    let home = TempDir::new().expect("tempdir");
    fs::write(home.path().join("amo.yaml"), "use_sample_matrix: true\n").expect("write config");

    let output = run(&home, &["types"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).lines().count(), 14);
}

#[test]
fn remember_requires_a_path() {
    let home = TempDir::new().expect("tempdir");
    let output = run(&home, &["remember"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("usage: amo remember <path-to-matrix>"));
}
