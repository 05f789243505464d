//! Load command.
//!
//! Writes `loadenv_<env>` scripts; the shell has to source them, since a
//! child process cannot change its parent's environment.

use std::path::Path;
use tracing::info;

use crate::cli::output;
use crate::core::script;
use crate::core::storage::Storage;
use crate::error::Result;

/// Fetch `env` and write its load scripts into `dir`.
pub fn execute(storage: &dyn Storage, env: &str, dir: &Path) -> Result<()> {
    let vars = storage.get(env)?;
    let written = script::write_scripts(dir, env, &vars)?;
    info!(env = %env, vars = vars.len(), "environment loaded");

    for path in &written {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        output::success(&format!("wrote {}", output::path(&name)));
    }
    if let Some(first) = written.first() {
        output::hint(&format!("run: . {}", first.display()));
    }
    Ok(())
}
