//! Remove command.

use tracing::info;

use crate::cli::output;
use crate::core::storage::Storage;
use crate::error::Result;

/// Remove `env`, or only the listed variables of it.
pub fn execute(storage: &mut dyn Storage, env: &str, vars: &[String]) -> Result<()> {
    storage.delete(env, vars)?;

    if vars.is_empty() {
        info!(env = %env, "environment removed");
        output::success(&format!("removed {}", output::key(env)));
    } else {
        info!(env = %env, vars = vars.len(), "variables removed");
        let keys: Vec<String> = vars.iter().map(|v| output::key(v)).collect();
        output::success(&format!("removed {} from {}", keys.join(", "), output::key(env)));
    }
    Ok(())
}
