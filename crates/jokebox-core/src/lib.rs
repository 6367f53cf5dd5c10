//! # jokebox-core
//!
//! I/O-free building blocks of jokebox:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | The [`Joke`](models::Joke) record and its equality |
//! | [`source`] | [`JokeSource`](source::JokeSource), one joke per call |
//! | [`store`] | [`JokeStore`](store::JokeStore) trait and an in-memory store |
//! | [`collector`] | Unique collection and known-set reconciliation |
//! | [`error`] | [`CollectError`](error::CollectError) |

pub mod collector;
pub mod error;
pub mod models;
pub mod source;
pub mod store;
