//! HTTP joke source.
//!
//! Issues one `GET` against the configured endpoint per joke and decodes
//! the JSON body into a [`Joke`]. The default endpoint is the public Chuck
//! Norris API with explicit jokes filtered out:
//!
//! ```text
//! GET https://api.chucknorris.io/jokes/random?category!%3Dexplicit
//!
//! { "id": "...", "url": "https://api.chucknorris.io/jokes/...", "value": "...", ... }
//! ```
//!
//! Every failure (transport, non-2xx status, undecodable body, over-long
//! id or url) is returned as an error. There is no retry.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use jokebox_core::models::Joke;
use jokebox_core::source::JokeSource;

use crate::config::SourceConfig;

/// [`JokeSource`] backed by an HTTP endpoint.
pub struct HttpJokeSource {
    client: reqwest::Client,
    url: String,
}

impl HttpJokeSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl JokeSource for HttpJokeSource {
    async fn fetch_one(&self) -> Result<Joke> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            bail!("Joke API error {}: {}", status, body_text.trim());
        }

        let body = response.text().await?;
        let joke: Joke = serde_json::from_str(&body)
            .with_context(|| format!("Failed to decode joke from {}", self.url))?;
        joke.check_lengths()?;

        tracing::debug!(id = %joke.external_id, "fetched joke");
        Ok(joke)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
