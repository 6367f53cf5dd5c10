//! Storage abstraction for jokebox.
//!
//! The [`JokeStore`] trait covers the three operations a run needs: load
//! the known set, persist a batch, wipe everything. The binary uses the
//! SQLite implementation; [`memory::InMemoryStore`] backs tests.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::Joke;

/// Persistent home of the known jokes.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`get_all`](JokeStore::get_all) | Every stored joke, with `local_id` set |
/// | [`insert_all`](JokeStore::insert_all) | Persist a batch, skipping jokes already stored |
/// | [`clear_all`](JokeStore::clear_all) | Remove every joke |
#[async_trait]
pub trait JokeStore: Send + Sync {
    /// Load every stored joke in insertion order.
    async fn get_all(&self) -> Result<Vec<Joke>>;

    /// Persist `jokes`. Jokes equal to one already stored are skipped.
    ///
    /// Returns the number of jokes actually inserted.
    async fn insert_all(&self, jokes: &[Joke]) -> Result<u64>;

    /// Remove every stored joke. Returns the number removed.
    async fn clear_all(&self) -> Result<u64>;
}
