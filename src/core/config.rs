//! Configuration file management.
//!
//! Handles reading and writing `~/.envman.toml`, which holds the default
//! backend, the environments of the local backend and the gist credential.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::core::constants;
use crate::core::types::{EnvName, Variables};
use crate::error::{ConfigError, Result};

/// User configuration stored in `~/.envman.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Backend used when `--backend` is not given
    #[serde(default = "default_backend")]
    pub default_backend: String,
    /// Local backend storage
    #[serde(default)]
    pub local: LocalConfig,
    /// GitHub Gist backend settings
    #[serde(default)]
    pub githubgist: GistConfig,
}

/// Environments kept by the local backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LocalConfig {
    #[serde(default)]
    pub environments: BTreeMap<EnvName, Variables>,
}

/// GitHub Gist backend settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GistConfig {
    /// Access token, written back after a successful login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// API root, e.g. `https://api.github.com` or a GitHub Enterprise host
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout; `0` disables it
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Check the gist revision before every write
    #[serde(default)]
    pub detect_conflicts: bool,
    /// Attempts for a conflict-checked write before giving up
    #[serde(default = "default_conflict_retries")]
    pub conflict_retries: u32,
}

fn default_backend() -> String {
    constants::DEFAULT_BACKEND.to_string()
}

fn default_api_url() -> String {
    constants::GITHUB_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    constants::DEFAULT_TIMEOUT_SECS
}

fn default_conflict_retries() -> u32 {
    constants::DEFAULT_CONFLICT_RETRIES
}

impl Default for GistConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            detect_conflicts: false,
            conflict_retries: default_conflict_retries(),
        }
    }
}

impl GistConfig {
    /// Request timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Config {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            default_backend: default_backend(),
            local: LocalConfig::default(),
            githubgist: GistConfig::default(),
        }
    }

    /// Path of the configuration file.
    ///
    /// `$ENVMAN_CONFIG` when set, otherwise `~/.envman.toml`.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(constants::CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::HomeDir)?;
        Ok(home.join(constants::CONFIG_FILE))
    }

    /// Load the configuration from its default location.
    ///
    /// A missing file is not an error: a fresh configuration is returned.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load the configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file exists but cannot be read,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            debug!("no config file, using defaults");
            return Ok(Self::new());
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(
            backend = %config.default_backend,
            local_environments = config.local.environments.len(),
            "config loaded"
        );

        Ok(config)
    }

    /// Save the configuration to its default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save the configuration to `path`.
    ///
    /// The file holds the access token, so it is created with mode 0600 on Unix.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "saving config");

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut file = std::fs::OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .mode(0o600)
                .open(path)
                .map_err(ConfigError::Write)?;
            file.write_all(contents.as_bytes())
                .map_err(ConfigError::Write)?;

            // Ensure secure permissions even when overwriting an existing file.
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .map_err(ConfigError::Write)?;
        }

        #[cfg(not(unix))]
        {
            std::fs::write(path, contents).map_err(ConfigError::Write)?;
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
