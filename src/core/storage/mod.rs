//! Environment storage backends.
//!
//! A backend is selected once at startup from the configuration and used
//! through the [`Storage`] trait, so commands never know which one they
//! talk to.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Storage` trait
//! 2. Add the implementation in a new file (e.g., `s3.rs`)
//! 3. Select it by name in [`open`]

use tracing::debug;

use crate::core::config::Config;
use crate::core::constants;
use crate::core::remote::Prompt;
use crate::core::types::Variables;
use crate::error::{Result, StoreError};

pub mod gist;
mod local;

pub use gist::{ConflictPolicy, GistStore, Snapshot};
pub use local::Local;

/// Environment storage.
pub trait Storage {
    /// Environment names when `name` is empty, otherwise the variable
    /// names of that environment.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the environment doesn't exist.
    fn list(&self, name: &str) -> Result<Vec<String>>;

    /// All variables of an environment.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the environment doesn't exist.
    fn get(&self, name: &str) -> Result<Variables>;

    /// Overlay `vars` onto an environment, creating it if needed.
    fn update(&mut self, name: &str, vars: &Variables) -> Result<()>;

    /// Delete the listed variables, or the whole environment if `vars` is
    /// empty. Variables that don't exist are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the environment doesn't exist.
    fn delete(&mut self, name: &str, vars: &[String]) -> Result<()>;

    /// Remove everything the backend ever created.
    fn clean_up(&mut self) -> Result<()>;
}

/// Initialize the configured backend.
///
/// The local backend borrows its environments from `config`; the gist
/// backend writes a freshly created token back into it.
///
/// # Errors
///
/// Returns `StoreError::UnknownBackend` for an unrecognised backend name,
/// or any error raised while the backend initializes.
pub fn open<'a>(config: &'a mut Config, prompt: &dyn Prompt) -> Result<Box<dyn Storage + 'a>> {
    let backend = config.default_backend.clone();
    debug!(backend = %backend, "opening storage");

    match backend.as_str() {
        constants::LOCAL_BACKEND => Ok(Box::new(Local::new(&mut config.local.environments))),
        constants::GIST_BACKEND => Ok(Box::new(GistStore::init(&mut config.githubgist, prompt)?)),
        other => Err(StoreError::UnknownBackend(other.to_string()).into()),
    }
}
