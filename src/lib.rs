//! # jokebox
//!
//! Fetches unique Chuck Norris jokes from a public API and keeps them in a
//! local SQLite database.
//!
//! ## Data Flow
//!
//! ```text
//! ┌────────────┐  collect   ┌────────────┐ reconcile ┌──────────┐
//! │  Joke API  │──────────▶│   batch    │──────────▶│  SQLite   │
//! │ (one/call) │◀──────────│ (distinct) │◀──────────│ (known)   │
//! └────────────┘ replace   └────────────┘  get_all  └──────────┘
//! ```
//!
//! 1. [`source_api::HttpJokeSource`] fetches jokes one request at a time.
//! 2. `jokebox_core::collector::collect` assembles a batch of distinct jokes.
//! 3. `jokebox_core::collector::reconcile` swaps out jokes already stored,
//!    within a fixed replacement budget.
//! 4. [`sqlite_store::SqliteStore`] persists the batch.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema creation |
//! | [`sqlite_store`] | SQLite joke store |
//! | [`source_api`] | HTTP joke source |
//! | [`run`] | Command orchestration |

pub mod config;
pub mod db;
pub mod migrate;
pub mod run;
pub mod source_api;
pub mod sqlite_store;
