//! Data models shared across the pipeline.
//!
//! - [`Ticker`]: validated, uppercase security symbol
//! - [`HeadlineTable`]: the final single-column, deduplicated table
//! - [`SourceOutcome`]: what one news source produced (or why it failed)
//! - [`HeadlineReport`]: JSON export of a whole run

use crate::error::ScrapeError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static TICKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9.\-^=]{1,16}$").unwrap());

/// A short uppercase symbol identifying a publicly traded security.
///
/// Input is trimmed and folded to uppercase. Index and class-share symbols
/// such as `^GSPC` or `BRK.B` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Validate and canonicalize a ticker symbol.
    ///
    /// # Arguments
    ///
    /// * `input` - Raw symbol as typed by the user; surrounding whitespace is ignored
    ///
    /// # Returns
    ///
    /// The uppercase ticker, or [`ScrapeError::InvalidTicker`] when the input is
    /// empty, longer than 16 characters, uses a character outside
    /// `A-Z 0-9 . - ^ =`, or has no letter or digit at all.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// assert_eq!(Ticker::parse(" brk.b ").unwrap().as_str(), "BRK.B");
    /// assert!(Ticker::parse("..").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ScrapeError> {
        let symbol = input.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(ScrapeError::InvalidTicker {
                ticker: input.to_string(),
                reason: "empty",
            });
        }
        if !TICKER_RE.is_match(&symbol) {
            return Err(ScrapeError::InvalidTicker {
                ticker: input.to_string(),
                reason: "expected at most 16 letters, digits, or . - ^ =",
            });
        }
        // Punctuation-only symbols like ".." would rewrite URL paths.
        if !symbol.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(ScrapeError::InvalidTicker {
                ticker: input.to_string(),
                reason: "must contain at least one letter or digit",
            });
        }
        Ok(Self(symbol))
    }

    /// Symbol as stored, uppercase.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form, used by sources whose URLs are case sensitive.
    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }

    /// Column title of the headline table for this ticker.
    pub fn table_title(&self) -> String {
        format!("Recent headlines for {}", self.0)
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = ScrapeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

/// One surviving row of the headline table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlineRow {
    /// Position of this headline in the combined sequence before dedup.
    pub index: usize,
    /// Normalized headline text.
    pub headline: String,
}

/// Single-column table of normalized headlines.
///
/// Rows whose text appears more than once have been removed entirely, so the
/// `index` values may have gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlineTable {
    /// Column name, `"Recent headlines for {TICKER}"`.
    pub title: String,
    pub rows: Vec<HeadlineRow>,
}

impl HeadlineTable {
    /// Number of surviving rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Headline texts in row order.
    pub fn headlines(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.headline.as_str()).collect()
    }
}

/// Result of running one source for one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceOutcome {
    /// Source name, e.g. `"reuters"`.
    pub source: String,
    /// URL that was requested, if one could be built.
    pub url: Option<String>,
    /// Clean headlines in page order. Empty on failure.
    pub headlines: Vec<String>,
    /// Failure message when the fetch or parse failed.
    pub error: Option<String>,
}

impl SourceOutcome {
    /// `true` when the source was fetched and parsed without error.
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-source line of a [`HeadlineReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSummary {
    pub source: String,
    pub url: Option<String>,
    pub count: usize,
    pub error: Option<String>,
}

impl From<&SourceOutcome> for SourceSummary {
    fn from(outcome: &SourceOutcome) -> Self {
        Self {
            source: outcome.source.clone(),
            url: outcome.url.clone(),
            count: outcome.headlines.len(),
            error: outcome.error.clone(),
        }
    }
}

/// Everything one run produced, as written by the JSON export.
#[derive(Debug, Serialize, Deserialize)]
pub struct HeadlineReport {
    pub ticker: Ticker,
    /// Local date in `YYYY-MM-DD` format.
    pub local_date: String,
    /// Local time in `HH:MM:SS` format.
    pub local_time: String,
    /// `None` when no source returned any headline.
    pub table: Option<HeadlineTable>,
    pub sources: Vec<SourceSummary>,
}
