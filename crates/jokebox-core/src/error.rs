use thiserror::Error;

/// Failures of a collection or reconciliation run.
///
/// Both variants are terminal: the caller gets no jokes at all, never a
/// partial batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollectError {
    #[error("Requesting too many jokes at once (requested {requested}, max {max})")]
    TooManyRequested { requested: usize, max: usize },
    #[error("{0}")]
    FetchFailed(String),
}
