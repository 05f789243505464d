//! Locates the gist holding every environment, creating it on first use.
//!
//! The gist is recognised by its description alone; no identifier is
//! persisted locally. Resolution walks the full, paginated gist listing on
//! every start, so its cost grows with the number of gists on the account.

use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::client::{Auth, Client, Method};
use super::types::{FileContent, Gist, NewGist};
use crate::core::constants;
use crate::error::Result;

/// Finds or creates the envman gist.
pub struct ContainerRegistry<'a> {
    client: &'a Client,
}

impl<'a> ContainerRegistry<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Every gist owned by the token, following pagination.
    pub fn list(&self, token: &str) -> Result<Vec<Gist>> {
        let auth = Auth::token(token);
        let mut all = Vec::new();

        for page in 1.. {
            let url = format!(
                "{}?per_page={}&page={}",
                self.client.endpoint("gists"),
                constants::GIST_PAGE_SIZE,
                page
            );
            let batch: Vec<Gist> = self.client.get_json(&url, &auth)?;
            let done = batch.len() < constants::GIST_PAGE_SIZE;
            all.extend(batch);
            if done {
                break;
            }
        }

        debug!(gists = all.len(), "listed gists");
        Ok(all)
    }

    /// The envman gist, created with only the bootstrap file if absent.
    ///
    /// Should the account hold several gists with the sentinel
    /// description, the first one in listing order wins.
    pub fn get_or_create(&self, token: &str) -> Result<Gist> {
        let mut matching = self
            .list(token)?
            .into_iter()
            .filter(|g| g.has_description(constants::GIST_DESCRIPTION));

        if let Some(gist) = matching.next() {
            let extra = matching.count();
            if extra > 0 {
                warn!(
                    id = %gist.id,
                    duplicates = extra,
                    "several envman gists found, using the first"
                );
            }
            debug!(id = %gist.id, "found envman gist");
            return Ok(gist);
        }

        self.create(token)
    }

    /// Create the envman gist holding only the bootstrap file.
    pub fn create(&self, token: &str) -> Result<Gist> {
        let created = serde_json::json!({ "created": chrono::Utc::now().to_rfc3339() });

        let mut files = BTreeMap::new();
        files.insert(
            constants::RESERVED_NAME,
            FileContent {
                content: created.to_string(),
            },
        );
        let body = NewGist {
            description: constants::GIST_DESCRIPTION,
            public: false,
            files,
        };

        let gist: Gist = self.client.send_json(
            Method::Post,
            &self.client.endpoint("gists"),
            &body,
            &Auth::token(token),
        )?;
        info!(id = %gist.id, "created envman gist");
        Ok(gist)
    }
}
