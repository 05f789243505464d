//! Save command.

use tracing::info;

use crate::cli::output;
use crate::core::storage::Storage;
use crate::core::types::Variables;
use crate::core::validation::validate_key;
use crate::error::Result;

/// Save the named variables of the process environment to `env`.
///
/// Variables that aren't set are skipped with a warning. Any name that isn't
/// a valid variable name fails the command before the backend is touched.
pub fn execute(storage: &mut dyn Storage, env: &str, names: &[String]) -> Result<()> {
    let vars = collect(names, |name| std::env::var(name).ok())?;
    storage.update(env, &vars)?;

    info!(env = %env, vars = vars.len(), "environment saved");
    output::success(&format!(
        "saved {} variable{} to {}",
        vars.len(),
        if vars.len() == 1 { "" } else { "s" },
        output::key(env)
    ));
    Ok(())
}

/// Validate every name, then look each up, warning about the ones that
/// aren't set.
fn collect(names: &[String], lookup: impl Fn(&str) -> Option<String>) -> Result<Variables> {
    names.iter().try_for_each(|name| validate_key(name))?;

    let mut vars = Variables::new();
    for name in names {
        match lookup(name) {
            Some(value) => {
                vars.insert(name.clone(), value);
            }
            None => output::warn(&format!("{} skipped, not set", output::key(name))),
        }
    }
    Ok(vars)
}
