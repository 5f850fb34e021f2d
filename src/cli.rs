use crate::config::{config_from_env, AppConfig};
use crate::engine::RoleAssignment;
use crate::error::AmoError;
use crate::matrix::MatrixSnapshot;
use crate::report::{baseline_table, chart_table, write_chart_csv_file};
use crate::server;
use crate::workbench::Workbench;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Compute,
    Baseline,
    Types,
    Validate,
    Remember,
    Forget,
}

const USAGE: &str = "usage: amo <serve|compute|baseline|types|validate|remember|forget>";

/// Flags that consume the following argument.
const VALUE_FLAGS: &[&str] = &["--matrix", "--name", "--csv"];

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("compute") => Some(Command::Compute),
        Some("baseline") => Some(Command::Baseline),
        Some("types") => Some(Command::Types),
        Some("validate") => Some(Command::Validate),
        Some("remember") => Some(Command::Remember),
        Some("forget") => Some(Command::Forget),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };
    let config = match config_from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return 1;
        }
    };

    match command {
        Command::Serve => handle_serve(config),
        Command::Compute => handle_compute(args, &config),
        Command::Baseline => handle_baseline(args, &config),
        Command::Types => handle_types(args, &config),
        Command::Validate => handle_validate(args),
        Command::Remember => handle_remember(args, &config),
        Command::Forget => handle_forget(&config),
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|arg| arg == flag)
}

/// Positional arguments after the command name, with flags and their values removed.
fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter().skip(2);
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            out.push(arg.as_str());
        }
    }
    out
}

/// `--matrix PATH` if given, otherwise the bootstrapped startup state.
fn workbench_for(args: &[String], config: &AppConfig) -> Result<Workbench, AmoError> {
    match flag_value(args, "--matrix") {
        Some(path) => {
            let mut workbench = Workbench::new();
            workbench.load_file(path)?;
            Ok(workbench)
        }
        None => Ok(Workbench::bootstrap(config, &config.store())),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize output: {err}");
            1
        }
    }
}

fn handle_serve(config: AppConfig) -> i32 {
    match server::run_server(config) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_compute(args: &[String], config: &AppConfig) -> i32 {
    let positional = positionals(args);
    let [meso, alpha, omega] = [0, 1, 2].map(|i| positional.get(i).copied().unwrap_or(""));
    let roles = RoleAssignment::new(meso, alpha, omega);
    let name = flag_value(args, "--name").unwrap_or(&config.chart_name);

    let chart = match workbench_for(args, config).and_then(|wb| wb.compute(&roles, name)) {
        Ok(chart) => chart,
        Err(err) => {
            eprintln!("compute failed: {err}");
            if matches!(err, AmoError::Selection { .. }) {
                eprintln!("usage: amo compute <meso> <alpha> <omega> [--matrix PATH] [--name NAME] [--csv PATH] [--table]");
            }
            return 1;
        }
    };

    if let Some(path) = flag_value(args, "--csv") {
        if let Err(err) = write_chart_csv_file(&chart, path) {
            eprintln!("failed to write csv: {err}");
            return 1;
        }
        eprintln!("wrote {path}");
    }

    if has_flag(args, "--table") {
        print!("{}", chart_table(&chart));
        0
    } else {
        print_json(&chart)
    }
}

fn handle_baseline(args: &[String], config: &AppConfig) -> i32 {
    let workbench = match workbench_for(args, config) {
        Ok(workbench) => workbench,
        Err(err) => {
            eprintln!("baseline failed: {err}");
            return 1;
        }
    };
    let snapshot = match workbench.snapshot() {
        Ok(snapshot) => snapshot,
        Err(err) => {
            eprintln!("baseline failed: {err}");
            return 1;
        }
    };

    if has_flag(args, "--table") {
        print!("{}", baseline_table(snapshot.baselines()));
        0
    } else {
        print_json(snapshot.baselines())
    }
}

fn handle_types(args: &[String], config: &AppConfig) -> i32 {
    let workbench = match workbench_for(args, config) {
        Ok(workbench) => workbench,
        Err(err) => {
            eprintln!("types failed: {err}");
            return 1;
        }
    };
    match workbench.snapshot() {
        Ok(snapshot) => {
            for name in snapshot.type_names() {
                println!("{name}");
            }
            0
        }
        Err(err) => {
            eprintln!("types failed: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let Some(path) = positionals(args).first().copied() else {
        eprintln!("usage: amo validate <path-to-matrix>");
        return 2;
    };

    match crate::matrix::load_matrix_file(path).and_then(MatrixSnapshot::from_matrix) {
        Ok(snapshot) => {
            println!(
                "matrix ok: {} types, {} rows",
                snapshot.types().len(),
                snapshot.row_count()
            );
            0
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}

fn handle_remember(args: &[String], config: &AppConfig) -> i32 {
    let Some(path) = positionals(args).first().copied() else {
        eprintln!("usage: amo remember <path-to-matrix>");
        return 2;
    };

    let mut workbench = Workbench::new();
    if let Err(err) = workbench.load_file(path) {
        eprintln!("remember failed: {err}");
        return 1;
    }
    match workbench.remember(&config.store()) {
        Ok(record) => {
            println!(
                "matrix stored: slot '{}' at {}",
                record.slot, record.saved_at
            );
            0
        }
        Err(err) => {
            eprintln!("remember failed: {err}");
            1
        }
    }
}

fn handle_forget(config: &AppConfig) -> i32 {
    match config.store().forget() {
        Ok(true) => {
            println!("stored matrix cleared");
            0
        }
        Ok(false) => {
            println!("no stored matrix");
            0
        }
        Err(err) => {
            eprintln!("forget failed: {err}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn positionals_skip_flag_values() {
        let argv = args(&[
            "amo", "compute", "Fire", "--matrix", "m.csv", "Ice", "--table", "Wind", "--name", "Ember",
        ]);
        assert_eq!(positionals(&argv), vec!["Fire", "Ice", "Wind"]);
        assert_eq!(flag_value(&argv, "--matrix"), Some("m.csv"));
        assert_eq!(flag_value(&argv, "--name"), Some("Ember"));
        assert_eq!(flag_value(&argv, "--csv"), None);
        assert!(has_flag(&argv, "--table"));
    }

    #[test]
    fn unknown_command_is_none() {
        assert_eq!(parse_command(&args(&["amo"])), None);
        assert_eq!(parse_command(&args(&["amo", "optimize"])), None);
        assert_eq!(parse_command(&args(&["amo", "compute"])), Some(Command::Compute));
    }
}
