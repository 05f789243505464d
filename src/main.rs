//! Envman - manage your environment variables.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use envman::cli::output;
use envman::cli::{run, Cli};
use envman::core::constants;
use envman::error::{Error, RemoteError, StoreError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("envman=debug")
        } else {
            EnvFilter::new("envman=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = run(cli.command, cli.backend) {
        // Format error with suggestion if available
        let suggestion = match &e {
            Error::Store(StoreError::NotFound(_)) => Some("run: envman list"),
            Error::Store(StoreError::UnknownBackend(_)) => Some("use: --backend local"),
            Error::Store(StoreError::Conflict { .. }) => {
                Some("another machine changed the gist, try again")
            }
            Error::Validation(_) => {
                Some("names may only use letters, digits and underscore")
            }
            Error::Remote(RemoteError::Auth(_)) => {
                Some("check your GitHub username and password")
            }
            Error::Remote(RemoteError::Network(_)) => {
                Some("check your connection or raise githubgist.timeout_secs")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
