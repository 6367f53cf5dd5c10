//! Library-level tests for the SQLite store and the HTTP source, wired
//! together through the fetch pipeline.

mod common;

use jokebox::config::{Config, DbConfig, SourceConfig};
use jokebox::run::fetch_with;
use jokebox::source_api::HttpJokeSource;
use jokebox::sqlite_store::SqliteStore;
use jokebox_core::models::Joke;
use jokebox_core::source::JokeSource;
use jokebox_core::store::JokeStore;
use serde_json::json;
use tempfile::TempDir;

use common::{api_joke, jokes, spawn_stub};

fn test_config(tmp: &TempDir, url: &str) -> Config {
    Config {
        db: DbConfig {
            path: tmp.path().join("data").join("jokes.sqlite"),
        },
        source: SourceConfig {
            url: url.to_string(),
            timeout_secs: 5,
            ..SourceConfig::default()
        },
    }
}

fn joke(id: &str) -> Joke {
    Joke::new(id, format!("https://api.chucknorris.io/jokes/{}", id), format!("text {}", id))
}

#[tokio::test]
async fn test_sqlite_store_round_trip() {
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp, "http://127.0.0.1:1/unused");
    let store = SqliteStore::open(&cfg).await.unwrap();

    assert!(store.get_all().await.unwrap().is_empty());

    let inserted = store.insert_all(&[joke("a"), joke("b")]).await.unwrap();
    assert_eq!(inserted, 2);

    let all = store.get_all().await.unwrap();
    assert_eq!(all, vec![joke("a"), joke("b")]);
    assert!(all.iter().all(|j| j.local_id.is_some()));
    assert!(all[0].local_id < all[1].local_id);

    store.close().await;
}

#[tokio::test]
async fn test_sqlite_store_ignores_duplicates() {
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp, "http://127.0.0.1:1/unused");
    let store = SqliteStore::open(&cfg).await.unwrap();

    store.insert_all(&[joke("a")]).await.unwrap();
    let inserted = store.insert_all(&[joke("a"), joke("b")]).await.unwrap();
    assert_eq!(inserted, 1);
    assert_eq!(store.get_all().await.unwrap().len(), 2);

    // Same id and url but different text is a different joke.
    let mut edited = joke("a");
    edited.text = "an edited punchline".to_string();
    assert_eq!(store.insert_all(&[edited]).await.unwrap(), 1);

    store.close().await;
}

#[tokio::test]
async fn test_sqlite_store_clear_and_reopen() {
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp, "http://127.0.0.1:1/unused");

    let store = SqliteStore::open(&cfg).await.unwrap();
    store.insert_all(&[joke("a"), joke("b"), joke("c")]).await.unwrap();
    store.close().await;

    // Opening again must not fail on the existing schema.
    let store = SqliteStore::open(&cfg).await.unwrap();
    assert_eq!(store.get_all().await.unwrap().len(), 3);
    assert_eq!(store.clear_all().await.unwrap(), 3);
    assert!(store.get_all().await.unwrap().is_empty());
    store.close().await;
}

#[tokio::test]
async fn test_api_source_decodes_joke() {
    let stub = spawn_stub(vec![api_joke("Wd6hXlOfQxWqKvTm1SJLyw")]);
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp, &stub.random_url());

    let source = HttpJokeSource::new(&cfg.source).unwrap();
    let fetched = source.fetch_one().await.unwrap();

    assert_eq!(fetched.external_id, "Wd6hXlOfQxWqKvTm1SJLyw");
    assert_eq!(
        fetched.source_url,
        "https://api.chucknorris.io/jokes/Wd6hXlOfQxWqKvTm1SJLyw"
    );
    assert_eq!(fetched.text, "Chuck Norris joke number Wd6hXlOfQxWqKvTm1SJLyw.");
    assert_eq!(fetched.local_id, None);
    assert_eq!(stub.hits(), 1);
}

#[tokio::test]
async fn test_api_source_rejects_error_status() {
    let stub = spawn_stub(jokes(&["a"]));
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp, &stub.url("/broken"));

    let source = HttpJokeSource::new(&cfg.source).unwrap();
    let err = source.fetch_one().await.unwrap_err();
    assert!(err.to_string().contains("500"), "got: {}", err);
}

#[tokio::test]
async fn test_api_source_rejects_undecodable_body() {
    let stub = spawn_stub(jokes(&["a"]));
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp, &stub.url("/garbage"));

    let source = HttpJokeSource::new(&cfg.source).unwrap();
    let err = source.fetch_one().await.unwrap_err();
    assert!(err.to_string().contains("Failed to decode joke"), "got: {}", err);
}

#[tokio::test]
async fn test_api_source_rejects_overlong_id() {
    let long_id = "x".repeat(41);
    let stub = spawn_stub(vec![json!({
        "id": long_id,
        "url": "https://api.chucknorris.io/jokes/x",
        "value": "Too long.",
    })]);
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp, &stub.random_url());

    let source = HttpJokeSource::new(&cfg.source).unwrap();
    let err = source.fetch_one().await.unwrap_err();
    assert!(err.to_string().contains("max 40"), "got: {}", err);
}

#[tokio::test]
async fn test_pipeline_against_stub_and_sqlite() {
    let stub = spawn_stub(jokes(&["a", "b", "a", "c", "d", "e", "f"]));
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp, &stub.random_url());

    let source = HttpJokeSource::new(&cfg.source).unwrap();
    let store = SqliteStore::open(&cfg).await.unwrap();
    store.insert_all(&[Joke::new(
        "c",
        "https://api.chucknorris.io/jokes/c",
        "Chuck Norris joke number c.",
    )])
    .await
    .unwrap();

    let report = fetch_with(&source, &store, 5, false).await.unwrap();

    // a, b, (a again), c, d, e collected; c is known and replaced by f.
    let ids: Vec<&str> = report.jokes.iter().map(|j| j.external_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "f", "d", "e"]);
    assert_eq!(report.inserted, 5);
    assert!(!report.all_known_exhausted);
    assert_eq!(stub.hits(), 7);
    assert_eq!(store.get_all().await.unwrap().len(), 6);

    store.close().await;
}
