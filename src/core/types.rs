//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

use std::collections::BTreeMap;

/// An environment name (e.g., dev, staging).
pub type EnvName = String;

/// A variable name (e.g., DATABASE_URL).
pub type VarName = String;

/// The variables of one environment.
///
/// Ordered so listings and generated scripts are deterministic.
pub type Variables = BTreeMap<VarName, String>;
