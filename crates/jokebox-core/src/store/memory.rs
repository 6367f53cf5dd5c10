//! In-memory [`JokeStore`] implementation for tests.
//!
//! Jokes live in a `Vec` behind `std::sync::RwLock`; local ids come from a
//! counter that keeps growing across clears, like a SQLite autoincrement.

use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::Joke;

use super::JokeStore;

struct Inner {
    jokes: Vec<Joke>,
    next_id: i64,
}

/// In-memory store for tests.
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                jokes: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JokeStore for InMemoryStore {
    async fn get_all(&self) -> Result<Vec<Joke>> {
        Ok(self.inner.read().unwrap().jokes.clone())
    }

    async fn insert_all(&self, jokes: &[Joke]) -> Result<u64> {
        let mut inner = self.inner.write().unwrap();
        let mut inserted = 0u64;
        for joke in jokes {
            if inner.jokes.contains(joke) {
                continue;
            }
            let mut stored = joke.clone();
            stored.local_id = Some(inner.next_id);
            inner.next_id += 1;
            inner.jokes.push(stored);
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn clear_all(&self) -> Result<u64> {
        let mut inner = self.inner.write().unwrap();
        let removed = inner.jokes.len() as u64;
        inner.jokes.clear();
        Ok(removed)
    }
}
