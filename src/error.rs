//! Error types for the headline pipeline.
//!
//! Only start-up problems (config, output directory) are allowed to stop the
//! program. Everything that goes wrong while talking to a news site is caught
//! per source by the aggregator and reported alongside the other sources'
//! results.

use thiserror::Error;

/// Errors that can occur while fetching, parsing, or writing headlines.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The ticker symbol is empty or contains characters no exchange uses.
    #[error("invalid ticker {ticker:?}: {reason}")]
    InvalidTicker {
        /// The rejected input.
        ticker: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A tag name could not be compiled into a CSS selector.
    #[error("invalid selector {selector:?}: {reason}")]
    Selector {
        /// The selector source text.
        selector: String,
        /// Parser message.
        reason: String,
    },

    /// A source URL could not be built from its template.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// Transport-level HTTP failure (DNS, TLS, timeout, body read).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Config file could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Config parsed but holds an unusable value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Filesystem failure while reading config or writing output.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
