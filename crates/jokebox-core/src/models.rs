//! Core data model shared by the collector, the sources and the stores.

use std::hash::{Hash, Hasher};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Maximum length of [`Joke::external_id`], matching the store's column constraint.
pub const MAX_EXTERNAL_ID_LEN: usize = 40;

/// Maximum length of [`Joke::source_url`], matching the store's column constraint.
pub const MAX_SOURCE_URL_LEN: usize = 1024;

/// A single joke as returned by the remote API and kept in the store.
///
/// Equality and hashing cover `external_id`, `source_url` and `text` only.
/// Two jokes that differ solely in `local_id` are the same joke: one was
/// fetched just now, the other came out of the database.
///
/// The field names on the wire are `id`, `url` and `value`; any other
/// fields the API sends along are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Joke {
    /// Identifier assigned by the remote source.
    #[serde(rename = "id")]
    pub external_id: String,
    /// Canonical URL of the joke on the remote source.
    #[serde(rename = "url")]
    pub source_url: String,
    /// The joke itself.
    #[serde(rename = "value")]
    pub text: String,
    /// Row id assigned by the store on insert. `None` until persisted.
    #[serde(skip)]
    pub local_id: Option<i64>,
}

impl Joke {
    pub fn new(
        external_id: impl Into<String>,
        source_url: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            source_url: source_url.into(),
            text: text.into(),
            local_id: None,
        }
    }

    /// Check the bounded fields against the store limits.
    ///
    /// Lengths are counted in characters, not bytes.
    pub fn check_lengths(&self) -> Result<()> {
        let id_len = self.external_id.chars().count();
        if id_len > MAX_EXTERNAL_ID_LEN {
            bail!(
                "joke id is {} characters long (max {})",
                id_len,
                MAX_EXTERNAL_ID_LEN
            );
        }
        let url_len = self.source_url.chars().count();
        if url_len > MAX_SOURCE_URL_LEN {
            bail!(
                "joke url is {} characters long (max {})",
                url_len,
                MAX_SOURCE_URL_LEN
            );
        }
        Ok(())
    }
}

impl PartialEq for Joke {
    fn eq(&self, other: &Self) -> bool {
        self.external_id == other.external_id
            && self.source_url == other.source_url
            && self.text == other.text
    }
}

impl Eq for Joke {}

impl Hash for Joke {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.external_id.hash(state);
        self.source_url.hash(state);
        self.text.hash(state);
    }
}
