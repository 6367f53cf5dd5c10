//! The remote joke source seam.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::Joke;

/// Something that hands out one joke per call.
///
/// The built-in implementation talks to the Chuck Norris joke API over
/// HTTP; tests use scripted in-memory sources. An `Err` is treated as a
/// transport failure and aborts the whole collection run.
///
/// # Example
///
/// ```rust
/// use anyhow::Result;
/// use async_trait::async_trait;
/// use jokebox_core::models::Joke;
/// use jokebox_core::source::JokeSource;
///
/// struct Constant;
///
/// #[async_trait]
/// impl JokeSource for Constant {
///     async fn fetch_one(&self) -> Result<Joke> {
///         Ok(Joke::new("c", "https://example.com/c", "Always the same."))
///     }
/// }
/// ```
#[async_trait]
pub trait JokeSource: Send + Sync {
    /// Fetch a single joke. Called strictly one at a time.
    async fn fetch_one(&self) -> Result<Joke>;

    /// Short label used in log output.
    fn describe(&self) -> String {
        "joke source".to_string()
    }
}
