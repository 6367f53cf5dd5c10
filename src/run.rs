//! Command orchestration.
//!
//! A fetch run goes: collect a unique batch from the source, load the
//! known jokes from the store, reconcile the batch against them, persist
//! what is left and report. A clear run wipes the store.

use anyhow::Result;
use std::collections::HashSet;
use std::str::FromStr;

use jokebox_core::collector::{collect, reconcile, MAX_JOKES_PER_REQUEST};
use jokebox_core::error::CollectError;
use jokebox_core::models::Joke;
use jokebox_core::source::JokeSource;
use jokebox_core::store::JokeStore;

use crate::config::Config;
use crate::source_api::HttpJokeSource;
use crate::sqlite_store::SqliteStore;

/// Number of jokes fetched when no request is given.
pub const DEFAULT_JOKE_COUNT: usize = 5;

/// What the user asked for on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Remove every stored joke.
    Clear,
    /// Fetch this many new jokes.
    Fetch(usize),
}

impl Default for Request {
    fn default() -> Self {
        Request::Fetch(DEFAULT_JOKE_COUNT)
    }
}

impl FromStr for Request {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("clear") {
            return Ok(Request::Clear);
        }
        s.parse::<usize>()
            .map(Request::Fetch)
            .map_err(|_| format!("invalid request '{}': expected 'clear' or a joke count", s))
    }
}

/// Result of a fetch run.
#[derive(Debug, Clone)]
pub struct FetchReport {
    /// The reconciled batch handed to the store.
    pub jokes: Vec<Joke>,
    /// Jokes in the batch that were not stored before this run.
    pub new_jokes: usize,
    /// Rows actually written. Always 0 on a dry run.
    pub inserted: u64,
    /// The replacement budget ran out before every joke was checked.
    pub all_known_exhausted: bool,
}

/// Execute `request` against the configured API and database.
pub async fn run(config: &Config, request: Request, dry_run: bool) -> Result<()> {
    match request {
        Request::Clear => run_clear(config).await,
        Request::Fetch(count) => run_fetch(config, count, dry_run).await,
    }
}

pub async fn run_fetch(config: &Config, count: usize, dry_run: bool) -> Result<()> {
    // Reject before the database file gets created.
    if count > MAX_JOKES_PER_REQUEST {
        return Err(CollectError::TooManyRequested {
            requested: count,
            max: MAX_JOKES_PER_REQUEST,
        }
        .into());
    }

    let source = HttpJokeSource::new(&config.source)?;
    let store = SqliteStore::open(config).await?;

    let outcome = fetch_with(&source, &store, count, dry_run).await;
    store.close().await;
    let report = outcome?;

    if dry_run {
        println!("fetch (dry-run)");
        for joke in &report.jokes {
            println!("  {}  {}", joke.external_id, joke.text);
        }
        println!("  would insert: {}", report.new_jokes);
    } else {
        println!("{} joke(s) inserted", report.inserted);
    }

    if report.all_known_exhausted {
        println!("You got all jokes in your database");
    }

    Ok(())
}

/// The fetch pipeline over any source and store.
///
/// Nothing is written unless collection and reconciliation both succeed.
pub async fn fetch_with<S, D>(
    source: &S,
    store: &D,
    count: usize,
    dry_run: bool,
) -> Result<FetchReport>
where
    S: JokeSource + ?Sized,
    D: JokeStore + ?Sized,
{
    let candidates = collect(source, count).await?;
    let known = store.get_all().await?;
    let reconciled = reconcile(source, &known, candidates).await?;

    let known: HashSet<&Joke> = known.iter().collect();
    let new_jokes = reconciled
        .jokes
        .iter()
        .filter(|joke| !known.contains(joke))
        .collect::<HashSet<_>>()
        .len();

    let inserted = if dry_run {
        0
    } else {
        store.insert_all(&reconciled.jokes).await?
    };

    tracing::info!(
        requested = count,
        inserted,
        dry_run,
        all_known_exhausted = reconciled.all_known_exhausted,
        "fetch finished"
    );

    Ok(FetchReport {
        jokes: reconciled.jokes,
        new_jokes,
        inserted,
        all_known_exhausted: reconciled.all_known_exhausted,
    })
}

pub async fn run_clear(config: &Config) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    let removed = store.clear_all().await;
    store.close().await;
    let removed = removed?;

    tracing::info!(removed, "store cleared");
    println!("All jokes have been removed from the db.");
    Ok(())
}
