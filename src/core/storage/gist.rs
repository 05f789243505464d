//! GitHub Gist backend.
//!
//! All environments live in one private gist. Each environment is a file
//! named after it whose content is a JSON object of variable name to value.
//! A bootstrap file named `envman` marks the gist and is never exposed.
//!
//! Every mutation is a read-modify-write: read the file, change it locally,
//! then PATCH the gist with only that file. The API leaves files missing
//! from a PATCH untouched and deletes files patched to `null`.
//!
//! By default nothing guards the window between read and write, so two
//! machines writing the same environment at once can lose an update. With
//! `detect_conflicts` the gist revision is compared before each write and
//! the operation retried a bounded number of times, failing with
//! `StoreError::Conflict` when the gist keeps moving. The check narrows the
//! window but the API offers no compare-and-set, so it cannot close it.

use std::collections::BTreeMap;
use tracing::{debug, info};
use zeroize::Zeroizing;

use super::Storage;
use crate::core::config::GistConfig;
use crate::core::constants;
use crate::core::remote::types::{FileContent, GistPatch};
use crate::core::remote::{
    token_note, Auth, Client, ContainerRegistry, CredentialManager, Gist, Method, Prompt,
    Revision,
};
use crate::core::types::Variables;
use crate::core::validation::validate_vars;
use crate::error::{RemoteError, Result, StoreError};

/// Variables of an environment together with the gist revision they were
/// read at.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub variables: Variables,
    pub revision: Option<Revision>,
}

/// How writes guard against concurrent modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictPolicy {
    /// Compare revisions before writing
    pub detect: bool,
    /// Attempts before giving up, at least one
    pub attempts: u32,
}

impl ConflictPolicy {
    pub fn from_config(config: &GistConfig) -> Self {
        Self {
            detect: config.detect_conflicts,
            attempts: config.conflict_retries.max(1),
        }
    }
}

/// A change applied to one environment.
enum Change<'v> {
    Merge(&'v Variables),
    Remove(&'v [String]),
    Drop,
}

/// Environments stored in a GitHub gist.
pub struct GistStore {
    client: Client,
    token: Zeroizing<String>,
    note: String,
    gist: Gist,
    policy: ConflictPolicy,
}

impl GistStore {
    /// Connect to GitHub with the settings in `config`.
    ///
    /// The token in use is written back to `config` before the gist is
    /// resolved, so a token created by a login survives a failure later on.
    pub fn init(config: &mut GistConfig, prompt: &dyn Prompt) -> Result<Self> {
        let client = Client::new(&config.api_url, config.timeout())?;
        Self::connect(client, config, prompt, token_note()?)
    }

    /// Connect over an existing client, identifying the token by `note`.
    pub fn connect(
        client: Client,
        config: &mut GistConfig,
        prompt: &dyn Prompt,
        note: String,
    ) -> Result<Self> {
        let token = CredentialManager::with_note(&client, note.clone())
            .ensure_token(config.token.as_deref(), prompt)?;
        config.token = Some(token.clone());

        let gist = ContainerRegistry::new(&client).get_or_create(&token)?;
        debug!(id = %gist.id, files = gist.files.len(), "gist storage ready");

        Ok(Self {
            client,
            token: Zeroizing::new(token),
            note,
            gist,
            policy: ConflictPolicy::from_config(config),
        })
    }

    /// Override the conflict policy.
    pub fn with_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The gist as last seen.
    pub fn gist(&self) -> &Gist {
        &self.gist
    }

    /// Read an environment from the current gist revision.
    ///
    /// The returned revision can be handed to [`update_expecting`] or
    /// [`delete_expecting`] to refuse the write if anything changed since.
    ///
    /// [`update_expecting`]: GistStore::update_expecting
    /// [`delete_expecting`]: GistStore::delete_expecting
    pub fn read(&mut self, name: &str) -> Result<Snapshot> {
        self.gist = self.fetch()?;
        let variables = self.read_file(&self.gist, name)?;
        Ok(Snapshot {
            variables,
            revision: self.gist.revision(),
        })
    }

    /// [`Storage::update`], failing with `StoreError::Conflict` if the gist
    /// is no longer at `expected`.
    pub fn update_expecting(
        &mut self,
        name: &str,
        vars: &Variables,
        expected: Option<&Revision>,
    ) -> Result<()> {
        validate_vars(vars)?;
        self.mutate(name, Change::Merge(vars), expected)
    }

    /// [`Storage::delete`], failing with `StoreError::Conflict` if the gist
    /// is no longer at `expected`.
    pub fn delete_expecting(
        &mut self,
        name: &str,
        vars: &[String],
        expected: Option<&Revision>,
    ) -> Result<()> {
        let change = if vars.is_empty() {
            Change::Drop
        } else {
            Change::Remove(vars)
        };
        self.mutate(name, change, expected)
    }

    fn auth(&self) -> Auth {
        Auth::token(&self.token)
    }

    /// Current state of the gist, including its revision history.
    fn fetch(&self) -> Result<Gist> {
        self.client.get_json(&self.gist.url, &self.auth())
    }

    /// Decode the environment `name` as stored in `gist`.
    fn read_file(&self, gist: &Gist, name: &str) -> Result<Variables> {
        let file = if is_reserved(name) {
            None
        } else {
            gist.files.get(name)
        };
        let file = file.ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        let content = match (&file.content, &file.raw_url) {
            (Some(content), _) if !file.truncated => content.clone(),
            (_, Some(raw_url)) => self.client.get_text(raw_url, &self.auth())?,
            _ => {
                return Err(RemoteError::Decode(format!(
                    "environment \"{name}\" has no content location"
                ))
                .into())
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            RemoteError::Decode(format!("environment \"{name}\" is not a variable map: {e}"))
                .into()
        })
    }

    /// Compute the new content of `name` in `gist`; `None` removes the file.
    fn apply(&self, gist: &Gist, name: &str, change: &Change<'_>) -> Result<Option<Variables>> {
        let exists = gist.files.contains_key(name);

        match change {
            Change::Merge(vars) => {
                let mut current = if exists {
                    self.read_file(gist, name)?
                } else {
                    Variables::new()
                };
                current.extend(vars.iter().map(|(k, v)| (k.clone(), v.clone())));
                Ok(Some(current))
            }
            Change::Remove(keys) => {
                let mut current = self.read_file(gist, name)?;
                for key in keys.iter() {
                    current.remove(key);
                }
                Ok(Some(current))
            }
            Change::Drop if exists => Ok(None),
            Change::Drop => Err(StoreError::NotFound(name.to_string()).into()),
        }
    }

    fn mutate(&mut self, name: &str, change: Change<'_>, expected: Option<&Revision>) -> Result<()> {
        check_name(name)?;

        if let Some(expected) = expected {
            let current = self.fetch()?;
            if current.revision().as_ref() != Some(expected) {
                self.gist = current;
                return Err(StoreError::Conflict {
                    name: name.to_string(),
                    attempts: 1,
                }
                .into());
            }
            let content = self.apply(&current, name, &change)?;
            self.gist = current;
            return self.write(name, content);
        }

        if !self.policy.detect {
            let content = self.apply(&self.gist, name, &change)?;
            return self.write(name, content);
        }

        for attempt in 1..=self.policy.attempts {
            let base = self.fetch()?;
            let content = self.apply(&base, name, &change)?;
            let latest = self.fetch()?;

            if latest.revision() == base.revision() {
                self.gist = latest;
                return self.write(name, content);
            }

            debug!(env = %name, attempt, "gist changed during update, retrying");
            self.gist = latest;
        }

        Err(StoreError::Conflict {
            name: name.to_string(),
            attempts: self.policy.attempts,
        }
        .into())
    }

    /// PATCH the gist with only `name`, replacing it or deleting it.
    fn write(&mut self, name: &str, content: Option<Variables>) -> Result<()> {
        let file = match content {
            Some(vars) => Some(FileContent {
                content: serde_json::to_string(&vars)?,
            }),
            None => None,
        };
        let deleting = file.is_none();

        let mut files = BTreeMap::new();
        files.insert(name, file);

        let updated: Gist = self.client.send_json(
            Method::Patch,
            &self.gist.url,
            &GistPatch { files },
            &self.auth(),
        )?;
        self.gist = updated;

        debug!(env = %name, deleted = deleting, "gist patched");
        Ok(())
    }
}

fn is_reserved(name: &str) -> bool {
    name.to_lowercase() == constants::RESERVED_NAME
}

fn check_name(name: &str) -> Result<()> {
    if is_reserved(name) {
        return Err(StoreError::ReservedName(constants::RESERVED_NAME.to_string()).into());
    }
    Ok(())
}

impl Storage for GistStore {
    fn list(&self, name: &str) -> Result<Vec<String>> {
        if name.is_empty() {
            return Ok(self
                .gist
                .files
                .keys()
                .filter(|n| !is_reserved(n))
                .cloned()
                .collect());
        }
        Ok(self.read_file(&self.gist, name)?.into_keys().collect())
    }

    fn get(&self, name: &str) -> Result<Variables> {
        self.read_file(&self.gist, name)
    }

    fn update(&mut self, name: &str, vars: &Variables) -> Result<()> {
        self.update_expecting(name, vars, None)
    }

    fn delete(&mut self, name: &str, vars: &[String]) -> Result<()> {
        self.delete_expecting(name, vars, None)
    }

    fn clean_up(&mut self) -> Result<()> {
        self.client.delete(&self.gist.url, &self.auth())?;
        info!(id = %self.gist.id, "deleted envman gist");

        CredentialManager::with_note(&self.client, self.note.clone()).revoke_own(&self.token)
    }
}
