//! List command.

use crate::cli::output;
use crate::core::storage::Storage;
use crate::error::Result;

/// Print environment names, or the variable names of `env`, one per line.
pub fn execute(storage: &dyn Storage, env: Option<&str>) -> Result<()> {
    let names = storage.list(env.unwrap_or(""))?;

    if names.is_empty() {
        match env {
            Some(env) => output::dimmed(&format!("no variables in {}", env)),
            None => output::dimmed("no environments"),
        }
        return Ok(());
    }

    for name in &names {
        output::data(name);
    }
    Ok(())
}
