//! Wire types of the GitHub Gist and Authorization APIs.
//!
//! Only the fields envman reads or writes are modelled; everything else in
//! the responses is ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A gist: the container holding every environment of an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Gist {
    #[serde(default)]
    pub id: String,
    /// API URL of the gist, used for PATCH and DELETE
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub public: bool,
    /// Gists may have a null description
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub files: BTreeMap<String, GistFile>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Only present on the single-gist endpoint, newest first
    #[serde(default)]
    pub history: Vec<GistHistory>,
}

/// A file inside a gist: one environment, or the bootstrap file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GistFile {
    #[serde(default)]
    pub filename: Option<String>,
    /// Location of the file content pinned to the gist revision
    #[serde(default)]
    pub raw_url: Option<String>,
    /// Inline content, present on create/patch/single-gist responses
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub truncated: bool,
}

/// One entry of a gist's revision history.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GistHistory {
    pub version: String,
    #[serde(default)]
    pub committed_at: Option<String>,
}

/// Body of `POST /gists`.
#[derive(Debug, Serialize)]
pub struct NewGist<'a> {
    pub description: &'a str,
    pub public: bool,
    pub files: BTreeMap<&'a str, FileContent>,
}

/// Body of `PATCH /gists/:id`.
///
/// Files absent from the map are left untouched by the API; a `None` entry
/// serializes to `null`, which deletes that file.
#[derive(Debug, Serialize)]
pub struct GistPatch<'a> {
    pub files: BTreeMap<&'a str, Option<FileContent>>,
}

/// New content of a gist file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileContent {
    pub content: String,
}

/// An OAuth authorization (access token resource).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Authorization {
    /// URL of the authorization, used to revoke it
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    /// The secret; only returned once, when the authorization is created
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Body of `POST /authorizations`.
#[derive(Debug, Serialize)]
pub struct NewAuthorization<'a> {
    pub scopes: &'a [&'a str],
    pub note: &'a str,
}

/// Opaque marker of a gist revision.
///
/// Two reads that return the same revision saw the same content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Revision(String);

impl Revision {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Gist {
    /// Current revision: the newest history version, else `updated_at`.
    pub fn revision(&self) -> Option<Revision> {
        self.history
            .first()
            .map(|h| Revision::new(h.version.clone()))
            .or_else(|| self.updated_at.clone().map(Revision::new))
    }

    /// Whether this gist carries the given description.
    pub fn has_description(&self, description: &str) -> bool {
        self.description.as_deref() == Some(description)
    }
}
