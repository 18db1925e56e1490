//! Shared E2E test helpers for the `atelier` binary.

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::Path;
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT: Duration = Duration::from_secs(10);

/// Variables that would leak the developer's environment into a test run.
const ISOLATED_VARS: &[&str] = &[
    "ATELIER_DEBUG",
    "ATELIER_VERBOSE",
    "ATELIER_ADMIN",
    "ATELIER_SIMULATE",
    "ATELIER_SIMULATION",
    "ATELIER_ROLE",
    "ATELIER_NAME",
    "ATELIER_SEED",
    "RUST_LOG",
];

/// Build a Command for the `atelier` binary inside a fresh temp directory.
///
/// The temp dir is both `HOME` (so no global config is picked up) and the
/// working directory (the project root). Keep the guard alive for the
/// test's duration.
pub fn atelier_cmd() -> (assert_cmd::Command, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("atelier");
    cmd.timeout(TIMEOUT);
    for var in ISOLATED_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", tmp.path());
    cmd.current_dir(tmp.path());
    (cmd, tmp)
}

/// Writes `<root>/.atelier/config.toml`.
pub fn write_project_config(root: &Path, content: &str) {
    let dir = root.join(".atelier");
    std::fs::create_dir_all(&dir).expect("create .atelier");
    std::fs::write(dir.join("config.toml"), content).expect("write config");
}
