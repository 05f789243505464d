//! Interactive GitHub login.

use dialoguer::{Input, Password};
use zeroize::Zeroizing;

use crate::cli::output;
use crate::core::remote::{LoginReason, Prompt};
use crate::error::Result;

/// Asks for GitHub credentials on the terminal.
pub struct DialoguerPrompt;

impl Prompt for DialoguerPrompt {
    fn credentials(&self, reason: LoginReason) -> Result<(String, Zeroizing<String>)> {
        match reason {
            LoginReason::MissingToken => {
                output::hint("log in to GitHub to create an access token for envman")
            }
            LoginReason::InvalidToken => {
                output::warn("stored GitHub token is no longer valid, log in again")
            }
        }

        let user: String = Input::new()
            .with_prompt("GitHub username")
            .interact_text()?;
        let password = Zeroizing::new(
            Password::new()
                .with_prompt("GitHub password")
                .interact()?,
        );

        Ok((user, password))
    }
}
