//! Command-line interface definitions.
//!
//! The ticker can be given positionally or through `HEADLINES_TICKER`; every
//! other option has a default or lives in the optional YAML config file.

use crate::models::Ticker;
use crate::scrapers::SourceKind;
use clap::Parser;

/// Fetch recent news headlines for a stock ticker and print them as a table.
///
/// # Examples
///
/// ```sh
/// # Default sources, default ticker (AAPL)
/// ticker_headlines
///
/// # Another ticker, two sources only, with a JSON copy of the result
/// ticker_headlines msft -s reuters -s cnbc -j ./reports
///
/// # Settings from a file
/// ticker_headlines TSLA --config ./headlines.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Ticker symbol to fetch headlines for (case-insensitive)
    #[arg(env = "HEADLINES_TICKER", default_value = "AAPL")]
    pub ticker: Ticker,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Source to query; repeat to pick several, in order (default: all)
    #[arg(short = 's', long = "source", value_enum)]
    pub sources: Vec<SourceKind>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Directory to write a JSON report into
    #[arg(short, long)]
    pub json_output_dir: Option<String>,
}
