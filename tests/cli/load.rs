//! Tests for `envman load`.

use crate::support::*;

#[cfg(unix)]
#[test]
fn test_load_writes_sh_script() {
    let t = Test::with_env(
        "dev",
        &[("ENVMAN_T_B", "with space"), ("ENVMAN_T_A", "it's")],
    );

    let output = t.load("dev");
    assert_success(&output);
    assert_stdout_contains(&output, "loadenv_dev.sh");

    assert_eq!(
        t.read("loadenv_dev.sh"),
        "export ENVMAN_T_A='it'\\''s'\nexport ENVMAN_T_B='with space'\n"
    );
}

#[cfg(unix)]
#[test]
fn test_loaded_script_restores_values() {
    let t = Test::with_env("dev", &[("ENVMAN_T_A", "a 'quoted' $value")]);
    assert_success(&t.load("dev"));

    let output = std::process::Command::new("sh")
        .arg("-c")
        .arg(". ./loadenv_dev.sh && printf %s \"$ENVMAN_T_A\"")
        .current_dir(t.dir.path())
        .output()
        .unwrap();

    assert_success(&output);
    assert_eq!(stdout(&output), "a 'quoted' $value");
}

#[cfg(windows)]
#[test]
fn test_load_writes_windows_scripts() {
    let t = Test::with_env("dev", &[("ENVMAN_T_A", "1")]);

    assert_success(&t.load("dev"));

    assert_eq!(t.read("loadenv_dev.bat"), "@echo off\r\nSET \"ENVMAN_T_A=1\"\r\n");
    assert_eq!(t.read("loadenv_dev.ps1"), "$env:ENVMAN_T_A='1'\n");
}

#[test]
fn test_load_alias() {
    let t = Test::with_env("dev", &[("ENVMAN_T_A", "1")]);

    let output = t.cmd().args(["l", "dev"]).output().unwrap();
    assert_success(&output);
}

#[test]
fn test_load_unknown_environment() {
    let t = Test::new();

    let output = t.load("nope");
    assert_failure(&output);
    assert_stderr_contains(&output, "doesn't exist");
    assert!(!t.dir.path().join("loadenv_nope.sh").exists());
}

#[test]
fn test_load_refuses_hand_edited_invalid_name() {
    let t = Test::new();
    t.write_config(
        "default_backend = \"local\"\n\n[local.environments.dev]\nENVMAN_T_A = \"1\"\n\"X=1; touch pwned; Y\" = \"v\"\n",
    );

    let output = t.load("dev");

    assert_failure(&output);
    assert_stderr_contains(&output, "invalid variable name");
    assert!(!t.dir.path().join("loadenv_dev.sh").exists());
    assert!(!t.dir.path().join("pwned").exists());
}
