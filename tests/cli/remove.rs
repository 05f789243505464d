//! Tests for `envman remove`.

use crate::support::*;

#[test]
fn test_remove_variables() {
    let t = Test::with_env("dev", &[("ENVMAN_T_A", "1"), ("ENVMAN_T_B", "2")]);

    let output = t.remove("dev", &["ENVMAN_T_A", "ENVMAN_T_MISSING"]);
    assert_success(&output);

    assert_eq!(lines(&t.list(Some("dev"))), vec!["ENVMAN_T_B"]);
}

#[test]
fn test_remove_environment() {
    let t = Test::with_env("dev", &[("ENVMAN_T_A", "1")]);
    assert_success(&t.save("prod", &[("ENVMAN_T_A", "1")]));

    let output = t.remove("dev", &[]);
    assert_success(&output);
    assert_stdout_contains(&output, "removed dev");

    assert_eq!(lines(&t.list(None)), vec!["prod"]);
}

#[test]
fn test_remove_alias() {
    let t = Test::with_env("dev", &[("ENVMAN_T_A", "1")]);

    let output = t.cmd().args(["rm", "dev"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&t.list(None), "no environments");
}

#[test]
fn test_remove_unknown_environment() {
    let t = Test::new();

    assert_failure(&t.remove("nope", &[]));
    assert_failure(&t.remove("nope", &["ENVMAN_T_A"]));
}
