//! SQLite-backed [`JokeStore`] implementation.
//!
//! Works against the `jokes` table created by
//! [`run_migrations`](crate::migrate::run_migrations). Uniqueness of
//! `(external_id, source_url, text)` is enforced by the schema, so
//! [`insert_all`](JokeStore::insert_all) can simply skip conflicting rows.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use jokebox_core::models::Joke;
use jokebox_core::store::JokeStore;

use crate::config::Config;
use crate::db;
use crate::migrate;

/// SQLite implementation of the [`JokeStore`] trait.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to the configured database and make sure the schema exists.
    pub async fn open(config: &Config) -> Result<Self> {
        let pool = db::connect(config).await?;
        migrate::run_migrations(&pool)
            .await
            .context("Failed to prepare database schema")?;
        Ok(Self::new(pool))
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl JokeStore for SqliteStore {
    async fn get_all(&self) -> Result<Vec<Joke>> {
        let rows = sqlx::query("SELECT id, external_id, source_url, text FROM jokes ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let jokes = rows
            .iter()
            .map(|row| Joke {
                local_id: Some(row.get("id")),
                external_id: row.get("external_id"),
                source_url: row.get("source_url"),
                text: row.get("text"),
            })
            .collect::<Vec<_>>();

        tracing::debug!(count = jokes.len(), "loaded known jokes");
        Ok(jokes)
    }

    async fn insert_all(&self, jokes: &[Joke]) -> Result<u64> {
        let now = chrono::Utc::now().timestamp();
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;

        for joke in jokes {
            let result = sqlx::query(
                r#"
                INSERT INTO jokes (external_id, source_url, text, fetched_at)
                VALUES (?, ?, ?, ?)
                ON CONFLICT(external_id, source_url, text) DO NOTHING
                "#,
            )
            .bind(&joke.external_id)
            .bind(&joke.source_url)
            .bind(&joke.text)
            .bind(now)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert joke {}", joke.external_id))?;

            if result.rows_affected() == 0 {
                tracing::debug!(id = %joke.external_id, "joke already stored, skipped");
            }
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn clear_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM jokes").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
