//! Runs the built `emojimix` binary against throwaway databases.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run with config, data and log dirs all inside `home`.
fn emojimix(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_emojimix"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .output()
        .expect("failed to run emojimix")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn json_mixes(home: &Path, db: &str) -> Vec<serde_json::Value> {
    let output = emojimix(home, &["--json", "--db", db]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    value.as_array().cloned().unwrap()
}

#[test]
fn add_list_clear() {
    let home = TempDir::new().unwrap();
    let db = home.path().join("mixes.sqlite");
    let db = db.to_str().unwrap();

    let output = emojimix(home.path(), &["--db", db, "add", "3"]);
    assert!(output.status.success(), "{:?}", output);
    assert!(stdout(&output).ends_with("3 mix(es)\n"));

    let output = emojimix(home.path(), &["--db", db, "list"]);
    assert!(stdout(&output).ends_with("3 mix(es)\n"));

    let mixes = json_mixes(home.path(), db);
    assert_eq!(mixes.len(), 3);
    for mix in &mixes {
        let symbols = mix["symbols"].as_str().unwrap();
        assert_eq!(symbols.chars().filter(|c| *c != '\u{FE0F}').count(), 3);
        for channel in ["red", "green", "blue"] {
            let value = mix["color"][channel].as_f64().unwrap();
            assert!((0.25..0.75).contains(&value), "{} = {}", channel, value);
        }
    }

    let output = emojimix(home.path(), &["--db", db, "clear"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "(no mixes)\n");
    assert!(json_mixes(home.path(), db).is_empty());
}

#[test]
fn default_database_lives_in_the_data_dir() {
    let home = TempDir::new().unwrap();
    let output = emojimix(home.path(), &["add"]);
    assert!(output.status.success(), "{:?}", output);
    assert!(home.path().join("data").join("emojimix").join("mixes.sqlite").exists());
}

#[test]
fn configured_seed_repeats_mixes() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("config").join("emojimix");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[generator]\nseed = 1234\n").unwrap();

    let first = home.path().join("first.sqlite");
    let second = home.path().join("second.sqlite");
    for db in [&first, &second] {
        let output = emojimix(home.path(), &["--db", db.to_str().unwrap(), "add", "2"]);
        assert!(output.status.success());
    }

    let symbols = |db: &Path| -> Vec<String> {
        json_mixes(home.path(), db.to_str().unwrap())
            .iter()
            .map(|m| m["symbols"].as_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(symbols(&first), symbols(&second));
}

#[test]
fn bad_arguments_exit_with_usage() {
    let home = TempDir::new().unwrap();
    let output = emojimix(home.path(), &["shuffle"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage: emojimix"));
}
