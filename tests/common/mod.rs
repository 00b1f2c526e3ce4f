#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use assert_cmd::Command;
use chrono::NaiveDate;
use finance_tracker::{
    model::{FixedClock, Model},
    storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh data directory that outlives the test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// The CLI binary in script mode, keeping its data under `home`.
pub fn script_cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("finance_tracker_cli").expect("binary built");
    cmd.env("FINANCE_TRACKER_CLI_SCRIPT", "1")
        .env("FINANCE_TRACKER_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

/// Turns colours and decorations off so output can be matched literally.
pub fn write_plain_config(home: &Path) {
    std::fs::write(home.join("config.json"), r#"{ "plain_output": true }"#)
        .expect("write config");
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::on(
        NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date"),
    ))
}

/// Loads whatever the binary saved under `home`.
pub fn load_model(home: &Path) -> Model {
    let storage = JsonStorage::new(home).expect("open storage");
    Model::load(&storage, fixed_clock()).expect("load model")
}
