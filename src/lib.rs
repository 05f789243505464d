//! Envman - keep environment variables in sync across machines.
//!
//! Named sets of environment variables ("environments") are saved from the
//! current shell into a backend and later loaded back through a generated
//! shell script.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── list          # List environments or their variables
//! │   ├── load          # Write loadenv_<env> scripts
//! │   ├── save          # Save variables from the process environment
//! │   ├── remove        # Remove an environment or some variables
//! │   ├── cleanup       # Remove everything the backend created
//! │   ├── completions   # Shell completions
//! │   └── prompt        # Interactive GitHub login
//! └── core/             # Core library components
//!     ├── config        # ~/.envman.toml management
//!     ├── script        # Load script generation
//!     ├── validation    # Variable name rules
//!     ├── storage/      # Storage backends
//!     │   ├── mod       # Storage trait and backend selection
//!     │   ├── local     # Environments kept in the config file
//!     │   └── gist      # Environments kept in a private GitHub gist
//!     └── remote/       # GitHub API
//!         ├── client    # HTTP transport and status handling
//!         ├── credentials # Access token lifecycle
//!         └── registry  # Locating the envman gist
//! ```
//!
//! # Backends
//!
//! - `local`: environments live in the config file
//! - `githubgist`: environments live in one private gist, one file each

pub mod cli;
pub mod core;
pub mod error;
