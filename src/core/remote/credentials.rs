//! Access token lifecycle.
//!
//! The token is an OAuth authorization labelled with a note unique to this
//! application and machine (`Envman @ <hostname>`). Its secret is only
//! returned when the authorization is created, so an existing authorization
//! with our note but no stored secret is revoked and created again.

use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use super::client::{Auth, Client, Method};
use super::types::{Authorization, NewAuthorization};
use crate::core::constants;
use crate::error::{RemoteError, Result};

/// Why the user is being asked to log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginReason {
    /// No token is stored yet.
    MissingToken,
    /// The stored token was rejected or could not be checked.
    InvalidToken,
}

/// Source of login credentials.
pub trait Prompt {
    /// Ask for a username and password.
    fn credentials(&self, reason: LoginReason) -> Result<(String, Zeroizing<String>)>;
}

/// Note identifying this application's authorization on this machine.
pub fn token_note() -> Result<String> {
    let hostname = whoami::fallible::hostname()?;
    Ok(format!("{}{}", constants::TOKEN_NOTE_PREFIX, hostname))
}

/// Obtains, validates and revokes the access token.
pub struct CredentialManager<'a> {
    client: &'a Client,
    note: String,
}

impl<'a> CredentialManager<'a> {
    /// Manager using this machine's note.
    pub fn new(client: &'a Client) -> Result<Self> {
        Ok(Self::with_note(client, token_note()?))
    }

    pub fn with_note(client: &'a Client, note: impl Into<String>) -> Self {
        Self {
            client,
            note: note.into(),
        }
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// Return a usable token.
    ///
    /// A stored token is checked first and reused when accepted. A missing,
    /// rejected or unverifiable token leads to exactly one login.
    ///
    /// # Errors
    ///
    /// Any failure while logging in or creating the token.
    pub fn ensure_token(&self, stored: Option<&str>, prompt: &dyn Prompt) -> Result<String> {
        let reason = match stored.filter(|t| !t.is_empty()) {
            Some(token) => match self.validate(token) {
                Ok(()) => {
                    debug!("stored token accepted");
                    return Ok(token.to_string());
                }
                Err(e) => {
                    warn!(error = %e, "stored token rejected, logging in again");
                    LoginReason::InvalidToken
                }
            },
            None => {
                info!("no token stored, logging in");
                LoginReason::MissingToken
            }
        };

        self.login(prompt, reason)
    }

    /// Probe a token with an authenticated read of the current user.
    pub fn validate(&self, token: &str) -> Result<()> {
        self.client
            .get_text(&self.client.endpoint("user"), &Auth::token(token))?;
        Ok(())
    }

    /// Ask for credentials and create a token with them.
    pub fn login(&self, prompt: &dyn Prompt, reason: LoginReason) -> Result<String> {
        let (user, password) = prompt.credentials(reason)?;
        self.create_token(&user, &password)
    }

    /// Create a fresh authorization and return its secret.
    ///
    /// An authorization already carrying our note is revoked first: its
    /// secret can never be read back, and the API refuses a second
    /// authorization with the same note.
    pub fn create_token(&self, user: &str, password: &str) -> Result<String> {
        let basic = Auth::basic(user, password);

        if let Some(existing) = self.find_authorization(&basic)? {
            info!(note = %self.note, "revoking previous authorization");
            self.revoke(&existing.url, &basic)?;
        }

        let body = NewAuthorization {
            scopes: constants::TOKEN_SCOPES,
            note: &self.note,
        };
        let created: Authorization = self.client.send_json(
            Method::Post,
            &self.client.endpoint("authorizations"),
            &body,
            &basic,
        )?;

        info!(note = %self.note, "created authorization");
        created
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RemoteError::Decode("authorization response has no token".into()).into())
    }

    /// The authorization carrying our note, if any.
    pub fn find_authorization(&self, auth: &Auth) -> Result<Option<Authorization>> {
        let authorizations: Vec<Authorization> = self
            .client
            .get_json(&self.client.endpoint("authorizations"), auth)?;

        Ok(authorizations
            .into_iter()
            .find(|a| a.note.as_deref() == Some(self.note.as_str())))
    }

    /// Delete the authorization at `url`.
    pub fn revoke(&self, url: &str, auth: &Auth) -> Result<()> {
        self.client.delete(url, auth)
    }

    /// Revoke our own authorization using the token itself.
    ///
    /// # Errors
    ///
    /// `RemoteError::AuthorizationNotFound` when no authorization carries our note.
    pub fn revoke_own(&self, token: &str) -> Result<()> {
        let auth = Auth::token(token);
        let own = self
            .find_authorization(&auth)?
            .ok_or_else(|| RemoteError::AuthorizationNotFound {
                note: self.note.clone(),
            })?;
        self.revoke(&own.url, &auth)?;
        info!(note = %self.note, "revoked authorization");
        Ok(())
    }
}
