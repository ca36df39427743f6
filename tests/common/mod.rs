#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use kakeibo::storage::{JsonExpenseStore, SqliteExpenseStore};
use kakeibo_core::{ExpenseStore, InMemoryExpenseStore};
use once_cell::sync::Lazy;
use tempfile::TempDir;

pub const BIN_NAME: &str = "kakeibo_cli";

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Script-mode shell isolated under its own `KAKEIBO_HOME`.
pub fn script_command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("KAKEIBO_CLI_SCRIPT", "1")
        .env("KAKEIBO_HOME", home)
        .env_remove("RUST_LOG");
    cmd
}

/// Every backend the shell can be configured with, freshly opened.
pub fn all_stores() -> Vec<(&'static str, Box<dyn ExpenseStore>)> {
    vec![
        ("memory", Box::new(InMemoryExpenseStore::new())),
        (
            "json",
            Box::new(JsonExpenseStore::in_dir(&temp_dir()).expect("json store")),
        ),
        (
            "sqlite",
            Box::new(SqliteExpenseStore::in_dir(&temp_dir()).expect("sqlite store")),
        ),
    ]
}
