//! Error types.
//!
//! Every fallible operation returns [`Result`]. Errors are grouped by the
//! layer that produces them and flattened into [`Error`] with `?`.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("{0}")]
    Other(String),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to determine home directory")]
    HomeDir,

    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config: {0}")]
    Write(#[source] std::io::Error),
}

/// Errors talking to the remote document API.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Transport-level failure, including timeouts.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a status other than the one expected for the verb.
    #[error("invalid status code: {code} ({reason}), expected {expected}")]
    Status {
        code: u16,
        reason: String,
        expected: u16,
    },

    /// The credential was rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// No authorization carries this machine's note.
    #[error("no authorization found with note \"{note}\"")]
    AuthorizationNotFound { note: String },

    #[error("invalid response: {0}")]
    Decode(String),
}

/// Environment storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("environment \"{0}\" doesn't exist")]
    NotFound(String),

    #[error("{0} is a reserved name in all variations (lower/uppercase)")]
    ReservedName(String),

    #[error("environment \"{name}\" was modified concurrently ({attempts} attempts)")]
    Conflict { name: String, attempts: u32 },

    #[error("backend \"{0}\" not found, expected one of: local, githubgist")]
    UnknownBackend(String),
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("variable name cannot be empty")]
    EmptyKey,

    #[error("invalid variable name '{key}': {reason}")]
    InvalidKey { key: String, reason: String },
}

impl Error {
    /// True when the error is a rejected credential.
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Remote(RemoteError::Auth(_)))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
