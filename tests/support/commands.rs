//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create an envman command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - ENVMAN_CONFIG pointing at the test config file
    /// - Current directory set to the test working directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("envman").expect("failed to find envman binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("ENVMAN_CONFIG", self.config_path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("ENVMAN_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `envman save`, with the variables set in the child's
    /// environment.
    pub fn save(&self, env: &str, vars: &[(&str, &str)]) -> Output {
        let mut cmd = self.cmd();
        cmd.args(["save", env]);
        for (k, v) in vars {
            cmd.env(k, v).arg(k);
        }
        cmd.output().expect("failed to run envman save")
    }

    /// Shortcut for `envman list [env]`.
    pub fn list(&self, env: Option<&str>) -> Output {
        let mut cmd = self.cmd();
        cmd.arg("list");
        if let Some(env) = env {
            cmd.arg(env);
        }
        cmd.output().expect("failed to run envman list")
    }

    /// Shortcut for `envman load`.
    pub fn load(&self, env: &str) -> Output {
        self.cmd()
            .args(["load", env])
            .output()
            .expect("failed to run envman load")
    }

    /// Shortcut for `envman remove`.
    pub fn remove(&self, env: &str, vars: &[&str]) -> Output {
        self.cmd()
            .args(["remove", env])
            .args(vars)
            .output()
            .expect("failed to run envman remove")
    }

    /// Shortcut for `envman cleanup`.
    pub fn cleanup(&self) -> Output {
        self.cmd()
            .arg("cleanup")
            .output()
            .expect("failed to run envman cleanup")
    }
}
