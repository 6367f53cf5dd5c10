//! # jokebox CLI
//!
//! Fetches unique Chuck Norris jokes and keeps them in a local SQLite
//! database.
//!
//! ## Usage
//!
//! ```bash
//! jokebox              # fetch 5 new jokes
//! jokebox 8            # fetch 8 new jokes (at most 10)
//! jokebox clear        # remove every stored joke
//! jokebox 3 --dry-run  # show what would be inserted
//! jokebox --config ./config/jokebox.toml 2
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `warn`); logs go to stderr.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use jokebox::config;
use jokebox::run::{self, Request};

/// jokebox: fetch unique jokes from a public API into a local database.
#[derive(Parser)]
#[command(
    name = "jokebox",
    version,
    about = "Fetch unique Chuck Norris jokes into a local SQLite database",
    long_about = "Fetches the requested number of jokes (default 5, at most 10), \
    skips jokes that are already stored, and inserts the rest. \
    Pass `clear` instead of a number to remove every stored joke."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/jokebox.toml` when that file exists, built-in
    /// defaults otherwise.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Collect and deduplicate jokes but print them instead of storing them.
    #[arg(long)]
    dry_run: bool,

    /// `clear` to remove every stored joke, or the number of jokes to fetch.
    #[arg(value_name = "clear|COUNT", value_parser = parse_request)]
    request: Option<Request>,
}

fn parse_request(s: &str) -> Result<Request, String> {
    s.parse()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let cfg = config::load_config_or_default(cli.config.as_deref())?;
    let request = cli.request.unwrap_or_default();

    run::run(&cfg, request, cli.dry_run).await
}
