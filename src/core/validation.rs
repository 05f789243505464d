//! Variable name validation.
//!
//! Names end up unquoted on the left of `export NAME=`, `SET "NAME=` and
//! `$env:NAME=` in generated load scripts, so only plain identifiers are
//! accepted. Documents edited outside envman are checked again on the way
//! out.

use crate::core::types::Variables;
use crate::error::{Result, ValidationError};

/// Validate a variable name.
///
/// Variable names must be valid environment variable names:
/// - Only A-Z, a-z, 0-9, and underscore
/// - Cannot start with a digit
/// - Cannot be empty
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ValidationError::EmptyKey.into());
    }

    if key.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidKey {
            key: key.to_string(),
            reason: "cannot start with a digit".to_string(),
        }
        .into());
    }

    if let Some((i, ch)) = key
        .chars()
        .enumerate()
        .find(|(_, ch)| !ch.is_ascii_alphanumeric() && *ch != '_')
    {
        return Err(ValidationError::InvalidKey {
            key: key.to_string(),
            reason: format!(
                "invalid character '{}' at position {}, only letters, digits and underscore are allowed",
                ch.escape_default(),
                i + 1
            ),
        }
        .into());
    }

    Ok(())
}

/// Validate every name in `vars`.
pub fn validate_vars(vars: &Variables) -> Result<()> {
    vars.keys().try_for_each(|key| validate_key(key))
}
