//! Constants used throughout envman.
//!
//! Centralizes magic strings and configuration values.

/// Configuration file name, relative to HOME (~/.envman.toml).
pub const CONFIG_FILE: &str = ".envman.toml";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "ENVMAN_CONFIG";

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "ENVMAN_LOG";

/// Backend used when none is configured.
pub const DEFAULT_BACKEND: &str = "local";

/// Name of the local backend.
pub const LOCAL_BACKEND: &str = "local";

/// Name of the GitHub Gist backend.
pub const GIST_BACKEND: &str = "githubgist";

/// GitHub REST API root.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Description marking the gist that holds every environment.
pub const GIST_DESCRIPTION: &str = "Envman Data";

/// Prefix of the authorization note; the hostname is appended.
pub const TOKEN_NOTE_PREFIX: &str = "Envman @ ";

/// Scopes requested for the access token.
pub const TOKEN_SCOPES: &[&str] = &["gist"];

/// Name of the bootstrap file. Forbidden as an environment name in any case.
pub const RESERVED_NAME: &str = "envman";

/// Page size used when listing gists.
pub const GIST_PAGE_SIZE: usize = 100;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts for a conflict-checked write.
pub const DEFAULT_CONFLICT_RETRIES: u32 = 3;

/// File name template for generated load scripts: `loadenv_<env>.<ext>`.
pub const SCRIPT_PREFIX: &str = "loadenv_";
