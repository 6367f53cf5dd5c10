//! Unique joke collection and reconciliation against the known set.
//!
//! Two separate loops live here, each with its own counter:
//!
//! - [`collect`] keeps fetching until it holds `count` mutually distinct
//!   jokes. Repeats inside the batch are discarded and counted in
//!   `in_batch_duplicates`; that loop has **no upper bound**, so a remote
//!   pool smaller than `count` never terminates.
//! - [`reconcile`] swaps out candidates that are already stored, spending
//!   at most [`KNOWN_REPLACEMENT_BUDGET`] replacement fetches per run.
//!
//! Any fetch failure ends the run with [`CollectError::FetchFailed`] and no
//! jokes.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::CollectError;
use crate::models::Joke;
use crate::source::JokeSource;

/// Largest batch a single request may ask for.
pub const MAX_JOKES_PER_REQUEST: usize = 10;

/// Replacement fetches allowed per run for candidates that are already stored.
pub const KNOWN_REPLACEMENT_BUDGET: usize = 10;

/// Outcome of [`reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// The batch after substitution, in candidate order.
    pub jokes: Vec<Joke>,
    /// `true` when the replacement budget ran out before every candidate
    /// was checked. Unchecked candidates are passed through unchanged and
    /// may still duplicate stored jokes.
    pub all_known_exhausted: bool,
}

/// Fetch `count` mutually distinct jokes from `source`.
///
/// Fails with [`CollectError::TooManyRequested`] before any network
/// activity when `count` exceeds [`MAX_JOKES_PER_REQUEST`].
pub async fn collect<S>(source: &S, count: usize) -> Result<Vec<Joke>, CollectError>
where
    S: JokeSource + ?Sized,
{
    if count > MAX_JOKES_PER_REQUEST {
        return Err(CollectError::TooManyRequested {
            requested: count,
            max: MAX_JOKES_PER_REQUEST,
        });
    }

    let mut jokes: Vec<Joke> = Vec::with_capacity(count);
    let mut remaining = count;
    let mut in_batch_duplicates = 0usize;

    while remaining > 0 {
        let joke = fetch(source).await?;

        if jokes.contains(&joke) {
            in_batch_duplicates += 1;
            debug!(
                id = %joke.external_id,
                in_batch_duplicates,
                "discarding joke already in this batch"
            );
            continue;
        }

        jokes.push(joke);
        remaining -= 1;
    }

    debug!(
        source = %source.describe(),
        collected = jokes.len(),
        in_batch_duplicates,
        "collection finished"
    );
    Ok(jokes)
}

/// Replace candidates that equal a `known` joke with fresh ones.
///
/// Builds a new sequence instead of editing `candidates` in place. Each
/// replacement lands in the slot of the joke it replaces and is checked
/// again: a replacement that is itself known, or that repeats another joke
/// of the batch, is replaced too. Candidates that are not known stay put,
/// even when they repeat each other. Every replacement fetch costs one
/// unit of [`KNOWN_REPLACEMENT_BUDGET`].
///
/// Once the budget is spent, the remaining candidates are returned as they
/// are and `all_known_exhausted` is set.
pub async fn reconcile<S>(
    source: &S,
    known: &[Joke],
    candidates: Vec<Joke>,
) -> Result<Reconciled, CollectError>
where
    S: JokeSource + ?Sized,
{
    let known: HashSet<&Joke> = known.iter().collect();
    let mut budget = KNOWN_REPLACEMENT_BUDGET;
    let mut jokes: Vec<Joke> = Vec::with_capacity(candidates.len());
    let mut all_known_exhausted = false;

    for (index, candidate) in candidates.iter().enumerate() {
        if all_known_exhausted || budget == 0 {
            all_known_exhausted = true;
            jokes.push(candidate.clone());
            continue;
        }

        let rest = &candidates[index + 1..];
        let mut slot = candidate.clone();
        let mut replaced = false;

        while is_rejected(&slot, replaced, &known, &jokes, rest) {
            if budget == 0 {
                warn!(
                    id = %slot.external_id,
                    "replacement budget spent, keeping remaining jokes as fetched"
                );
                all_known_exhausted = true;
                break;
            }

            info!(id = %slot.external_id, budget, "joke already known, fetching a replacement");
            slot = collect(source, 1)
                .await?
                .pop()
                .ok_or_else(|| CollectError::FetchFailed("source returned no joke".to_string()))?;
            replaced = true;
            budget -= 1;
        }

        jokes.push(slot);
    }

    debug!(
        replacements = KNOWN_REPLACEMENT_BUDGET - budget,
        all_known_exhausted, "reconciliation finished"
    );
    Ok(Reconciled {
        jokes,
        all_known_exhausted,
    })
}

/// Original candidates are only checked against the known set; fetched
/// replacements must also be new to the batch.
fn is_rejected(
    joke: &Joke,
    replaced: bool,
    known: &HashSet<&Joke>,
    accepted: &[Joke],
    rest: &[Joke],
) -> bool {
    known.contains(joke) || (replaced && (accepted.contains(joke) || rest.contains(joke)))
}

async fn fetch<S>(source: &S) -> Result<Joke, CollectError>
where
    S: JokeSource + ?Sized,
{
    source
        .fetch_one()
        .await
        .map_err(|e| CollectError::FetchFailed(format!("{:#}", e)))
}
