//! Command-line interface.

pub mod cleanup;
pub mod completions;
pub mod list;
pub mod load;
pub mod output;
pub mod prompt;
pub mod remove;
pub mod save;

use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use crate::core::config::Config;
use crate::core::constants;
use crate::core::remote::Prompt;
use crate::core::storage::{self, Storage};
use crate::error::{Result, StoreError};

/// Envman - manage your environment variables.
#[derive(Parser)]
#[command(
    name = "envman",
    about = "Manage your environment variables",
    version,
    after_help = "Backends: local (config file), githubgist (private GitHub gist)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Use and set a different backend as default
    #[arg(short, long, global = true)]
    pub backend: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// List the environments or the variables in an environment
    #[command(visible_alias = "ls")]
    List {
        /// Environment name
        env: Option<String>,
    },

    /// Write a script that loads an environment into the current shell
    #[command(visible_alias = "l")]
    Load {
        /// Environment name
        env: String,
    },

    /// Save variables of the current shell to an environment
    #[command(visible_alias = "s")]
    Save {
        /// Environment name
        env: String,
        /// Variable names (e.g., DATABASE_URL)
        #[arg(required = true)]
        vars: Vec<String>,
    },

    /// Remove a full environment or just some of its variables
    #[command(visible_alias = "rm")]
    Remove {
        /// Environment name
        env: String,
        /// Variables to remove; the whole environment when omitted
        vars: Vec<String>,
    },

    /// Remove everything the backend created
    Cleanup,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Run a parsed command line.
///
/// Loads the config, opens the selected backend, executes the command and
/// saves the config. The config is saved even when the command fails so a
/// token obtained along the way is kept.
///
/// # Errors
///
/// The command's error, or the failure to save the config.
pub fn run(command: Command, backend: Option<String>) -> Result<()> {
    if let Command::Completions { shell } = command {
        return completions::execute(shell);
    }

    let path = Config::config_path()?;
    let mut config = Config::load_from(&path)?;

    if let Some(name) = backend {
        if name != constants::LOCAL_BACKEND && name != constants::GIST_BACKEND {
            return Err(StoreError::UnknownBackend(name).into());
        }
        debug!(backend = %name, "setting default backend");
        config.default_backend = name;
    }

    let result = dispatch(command, &mut config, &prompt::DialoguerPrompt);
    let saved = config.save_to(&path);

    match (result, saved) {
        (Err(e), Err(save)) => {
            warn!(error = %save, "failed to save config");
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), saved) => saved,
    }
}

/// Open the backend and execute `command` against it.
///
/// A successful gist cleanup revokes the stored token, so it is dropped from
/// the config rather than persisted dead.
fn dispatch(command: Command, config: &mut Config, prompt: &dyn Prompt) -> Result<()> {
    let cleanup = matches!(command, Command::Cleanup);
    {
        let mut storage = storage::open(config, prompt)?;
        execute(command, storage.as_mut())?;
    }

    if cleanup && config.default_backend == constants::GIST_BACKEND {
        debug!("forgetting revoked token");
        config.githubgist.token = None;
    }
    Ok(())
}

/// Execute a command against an opened backend.
pub fn execute(command: Command, storage: &mut dyn Storage) -> Result<()> {
    match command {
        Command::List { env } => list::execute(storage, env.as_deref()),
        Command::Load { env } => {
            let dir = std::env::current_dir()?;
            load::execute(storage, &env, &dir)
        }
        Command::Save { env, vars } => save::execute(storage, &env, &vars),
        Command::Remove { env, vars } => remove::execute(storage, &env, &vars),
        Command::Cleanup => cleanup::execute(storage),
        Command::Completions { shell } => completions::execute(shell),
    }
}
