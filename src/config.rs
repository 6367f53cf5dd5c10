//! TOML configuration.
//!
//! ```toml
//! [db]
//! path = "./data/jokes.sqlite"
//!
//! [source]
//! url = "https://api.chucknorris.io/jokes/random?category!%3Dexplicit"
//! timeout_secs = 30
//! user_agent = "jokebox/0.1.0"
//! ```
//!
//! Every key is optional; a missing section falls back to its defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Where the CLI looks for a config file when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "./config/jokebox.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub db: DbConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./data/jokes.sqlite")
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default = "default_source_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_source_url() -> String {
    "https://api.chucknorris.io/jokes/random?category!%3Dexplicit".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    format!("jokebox/{}", env!("CARGO_PKG_VERSION"))
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Load `path` if given; otherwise read [`DEFAULT_CONFIG_PATH`] when it
/// exists and fall back to built-in defaults when it does not.
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return load_config(path);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        load_config(default_path)
    } else {
        tracing::debug!("no config at {}, using defaults", DEFAULT_CONFIG_PATH);
        Ok(Config::default())
    }
}

fn validate(config: &Config) -> Result<()> {
    let url = reqwest::Url::parse(&config.source.url)
        .with_context(|| format!("source.url is not a valid URL: '{}'", config.source.url))?;
    match url.scheme() {
        "http" | "https" => {}
        other => anyhow::bail!("source.url must use http or https, got '{}'", other),
    }

    if config.source.timeout_secs == 0 {
        anyhow::bail!("source.timeout_secs must be > 0");
    }

    if config.db.path.as_os_str().is_empty() {
        anyhow::bail!("db.path must not be empty");
    }

    Ok(())
}
