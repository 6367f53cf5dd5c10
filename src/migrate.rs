use anyhow::Result;
use sqlx::SqlitePool;

/// Create the `jokes` table if it does not exist yet.
///
/// Idempotent; every command runs it before touching the store.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jokes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            external_id TEXT NOT NULL CHECK (length(external_id) <= 40),
            source_url TEXT NOT NULL CHECK (length(source_url) <= 1024),
            text TEXT NOT NULL,
            fetched_at INTEGER NOT NULL,
            UNIQUE(external_id, source_url, text)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_jokes_external_id ON jokes(external_id)")
        .execute(pool)
        .await?;

    Ok(())
}
