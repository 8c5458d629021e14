//! # Ticker Headlines
//!
//! Fetches recent financial-news headlines for one stock ticker from several
//! outlets, normalizes and deduplicates them, and prints a single-column
//! table.
//!
//! ## Usage
//!
//! ```sh
//! ticker_headlines AAPL
//! ticker_headlines msft -s reuters -s cnbc -j ./reports
//! ```
//!
//! ## Architecture
//!
//! The run is a single pass:
//! 1. **Fetch**: each source builds its URL and issues one GET, one source at a time
//! 2. **Select**: matching elements are picked by tag and class
//! 3. **Extract**: element text is whitespace-collapsed into clean headlines
//! 4. **Tabulate**: headlines are normalized, duplicates dropped, and the table printed
//!
//! A failing source is logged and skipped; the rest of the run carries on.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod cli;
mod config;
mod error;
mod extract;
mod fetch;
mod models;
mod outputs;
mod scrapers;
mod utils;

use aggregate::build_table;
use cli::Cli;
use fetch::HttpFetcher;
use outputs::{json, table};
use utils::ensure_writable_dir;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("ticker_headlines starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // Early check: JSON output dir must be writable before any fetching
    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e.into());
        }
    }

    let config = config::resolve(&args).await?;
    let sources = scrapers::build_sources(&config.sources)?;
    let fetcher = HttpFetcher::new(config.timeout(), &config.user_agent)?;
    info!(
        ticker = %args.ticker,
        sources = ?config.sources,
        timeout_secs = config.timeout_secs,
        "Configuration resolved"
    );

    println!("{}", table::fetching_banner(args.ticker.as_str()));

    let run = build_table(&fetcher, &args.ticker, &sources).await;

    print!("{}", table::console(run.table.as_ref()));

    if let Some(dir) = &args.json_output_dir {
        let report = json::build_report(&args.ticker, &run, chrono::Local::now());
        if let Err(e) = json::write_report(&report, dir).await {
            error!(error = %e, "Failed to write JSON report");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        rows = run.table.as_ref().map_or(0, |t| t.len()),
        failed_sources = run.outcomes.iter().filter(|o| !o.succeeded()).count(),
        "Execution complete"
    );

    Ok(())
}
