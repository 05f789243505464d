//! Tests for `envman list`.

use crate::support::*;

#[test]
fn test_list_environments() {
    let t = Test::with_env("prod", &[("ENVMAN_T_A", "1")]);
    assert_success(&t.save("dev", &[("ENVMAN_T_B", "2")]));

    let output = t.list(None);
    assert_success(&output);
    assert_eq!(lines(&output), vec!["dev", "prod"]);
}

#[test]
fn test_list_variables() {
    let t = Test::with_env("dev", &[("ENVMAN_T_Z", "1"), ("ENVMAN_T_A", "2")]);

    let output = t.list(Some("dev"));
    assert_success(&output);
    assert_eq!(lines(&output), vec!["ENVMAN_T_A", "ENVMAN_T_Z"]);
    // Values are never listed.
    assert!(!stdout(&output).contains('='));
}

#[test]
fn test_list_empty() {
    let t = Test::new();

    let output = t.list(None);
    assert_success(&output);
    assert_stdout_contains(&output, "no environments");
}

#[test]
fn test_list_alias() {
    let t = Test::with_env("dev", &[("ENVMAN_T_A", "1")]);

    let output = t.cmd().args(["ls", "dev"]).output().unwrap();
    assert_success(&output);
    assert_eq!(lines(&output), vec!["ENVMAN_T_A"]);
}

#[test]
fn test_list_unknown_environment() {
    let t = Test::new();

    let output = t.list(Some("nope"));
    assert_failure(&output);
    assert_stderr_contains(&output, "environment \"nope\" doesn't exist");
}
