use std::fs;

use amo::config::AppConfig;
use amo::matrix::{parse_matrix, MatrixSnapshot};
use amo::storage::{MatrixStore, RememberedMatrix};
use amo::workbench::{MatrixSource, Workbench};
use tempfile::TempDir;

const SEMICOLON: &str = "\u{feff}Attacker;Fire;Ice\r\nFire;n;w\r\nIce;r;\r\n";

fn config_in(dir: &TempDir) -> AppConfig {
    AppConfig {
        storage_dir: dir.path().join("data"),
        ..AppConfig::default()
    }
}

#[test]
fn remember_restore_and_forget_slot() {
    let dir = TempDir::new().expect("tempdir");
    let store = config_in(&dir).store();
    assert_eq!(store.restore().expect("empty slot"), None);

    let matrix = parse_matrix(SEMICOLON).expect("parse");
    let record = store.remember(&matrix).expect("remember");
    assert_eq!(record.slot, "GE_matrix_csv");
    assert!(record.saved_at.ends_with('Z'));
    assert_eq!(record.matrix_text, "Attacker;Fire;Ice\nFire;n;w\nIce;r;");
    assert!(store.path().ends_with("GE_matrix_csv.json"));

    let restored: RememberedMatrix = store.restore().expect("read").expect("present");
    assert_eq!(restored, record);
    let original = MatrixSnapshot::from_matrix(matrix).expect("snapshot");
    let reloaded = MatrixSnapshot::from_text(&restored.matrix_text).expect("snapshot");
    assert_eq!(original.lookup(), reloaded.lookup());

    assert!(store.forget().expect("forget"));
    assert!(!store.forget().expect("second forget"));
    assert_eq!(store.restore().expect("cleared"), None);
}

#[test]
fn remembering_again_overwrites_the_slot() {
    let dir = TempDir::new().expect("tempdir");
    let store = config_in(&dir).store();
    store
        .remember(&parse_matrix("Attacker,Fire\nFire,W").expect("parse"))
        .expect("first");
    store
        .remember(&parse_matrix("Attacker,Wind\nWind,X").expect("parse"))
        .expect("second");

    let restored = store.restore().expect("read").expect("present");
    assert_eq!(restored.matrix_text, "Attacker,Wind\nWind,X");
}

#[test]
fn separate_slots_do_not_collide() {
    let dir = TempDir::new().expect("tempdir");
    let a = MatrixStore::new(dir.path(), "alpha");
    let b = MatrixStore::new(dir.path(), "beta");
    a.remember(&parse_matrix("Attacker,Fire\nFire,W").expect("parse"))
        .expect("remember");
    assert!(b.restore().expect("read").is_none());
}

#[test]
fn bootstrap_prefers_stored_matrix_over_default_and_sample() {
    let dir = TempDir::new().expect("tempdir");
    let default_path = dir.path().join("default.csv");
    fs::write(&default_path, "Attacker,Earth\nEarth,R").expect("write default");

    let mut config = config_in(&dir);
    config.default_matrix = Some(default_path);
    config.use_sample_matrix = true;
    let store = config.store();

    let workbench = Workbench::bootstrap(&config, &store);
    assert!(matches!(workbench.source(), Some(MatrixSource::File(_))));

    store
        .remember(&parse_matrix("Attacker,Fire,Ice\nFire,N,W\nIce,R,N").expect("parse"))
        .expect("remember");
    let workbench = Workbench::bootstrap(&config, &store);
    assert_eq!(workbench.source(), Some(&MatrixSource::Storage));
    assert_eq!(
        workbench.snapshot().expect("loaded").type_names(),
        vec!["Fire", "Ice"]
    );

    config.default_matrix = Some(dir.path().join("missing.csv"));
    store.forget().expect("forget");
    let workbench = Workbench::bootstrap(&config, &store);
    assert_eq!(workbench.source(), Some(&MatrixSource::Sample));
}

#[test]
fn corrupt_or_invalid_slot_is_ignored_at_startup() {
    let dir = TempDir::new().expect("tempdir");
    let config = config_in(&dir);
    let store = config.store();
    fs::create_dir_all(dir.path().join("data")).expect("mkdir");

    fs::write(store.path(), "{ not json").expect("write");
    assert!(store.restore().is_err());
    assert!(!Workbench::bootstrap(&config, &store).is_loaded());

    let bad = RememberedMatrix {
        slot: store.slot().to_string(),
        saved_at: "2026-01-01T00:00:00Z".to_string(),
        matrix_text: "Type,Fire\nFire,W".to_string(),
    };
    fs::write(store.path(), serde_json::to_string(&bad).expect("json")).expect("write");
    assert!(!Workbench::bootstrap(&config, &store).is_loaded());
}
