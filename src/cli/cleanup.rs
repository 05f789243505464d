//! Cleanup command.

use crate::cli::output;
use crate::core::storage::Storage;
use crate::error::Result;

/// Remove everything the backend created.
pub fn execute(storage: &mut dyn Storage) -> Result<()> {
    storage.clean_up()?;
    output::success("backend cleaned up");
    Ok(())
}
