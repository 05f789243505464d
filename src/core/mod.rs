//! Core library components.
//!
//! Configuration, the storage backends and the GitHub client behind the
//! gist backend. Nothing here prints to the terminal.

pub mod config;
pub mod constants;
pub mod remote;
pub mod script;
pub mod storage;
pub mod types;
pub mod validation;
