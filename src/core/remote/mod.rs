//! Remote backend plumbing for GitHub Gists.
//!
//! Leaf first:
//!
//! - [`client`]: authenticated requests with per-verb status checks
//! - [`credentials`]: access token discovery, creation and revocation
//! - [`registry`]: find-or-create of the gist holding all environments
//! - [`types`]: wire types
//!
//! Nothing here retries. Multi-step sequences are not rolled back either:
//! a token created during login stays valid even if creating the gist
//! fails right after.

pub mod client;
pub mod credentials;
pub mod registry;
pub mod types;


pub use client::{Auth, Client, HttpTransport, Method, Request, Response, Transport};
pub use credentials::{token_note, CredentialManager, LoginReason, Prompt};
pub use registry::ContainerRegistry;
pub use types::{Authorization, Gist, GistFile, Revision};
