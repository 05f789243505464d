//! Error reporting tests.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_error_exits_nonzero_with_hint() {
    let t = Test::new();

    t.cmd()
        .args(["load", "missing"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("✗ environment \"missing\" doesn't exist"))
        .stderr(predicate::str::contains("→ run: envman list"));
}

#[test]
fn test_completions() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("envman"));

    // Completions never touch the config.
    assert!(!t.config_path().exists());
}

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("load"))
        .stdout(predicate::str::contains("save"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("cleanup"));
}
