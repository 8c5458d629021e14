//! News sources that publish headlines for a ticker.
//!
//! Each source knows three things: how to build its URL from a ticker, which
//! elements hold headlines, and how to read them. Fetching is done by the
//! aggregator through a [`PageFetcher`](crate::fetch::PageFetcher), so sources
//! stay free of I/O and can be tested against saved markup.
//!
//! # Supported Sources
//!
//! | Source | Module | Selector | Notes |
//! |--------|--------|----------|-------|
//! | CNBC | [`cnbc`] | `div.assets` → first `span` | Two-step selection |
//! | Reuters | [`reuters`] | `h3.search-result-title` | Search results |
//! | Morningstar | [`morningstar`] | `a.mdc-link…` | Ticker in URL path |
//! | USA Today | [`usatoday`] | `a.gnt_se_a…` | Search results |
//!
//! Adding an outlet means adding a module with a [`HeadlineSource`] impl and a
//! [`SourceKind`] variant; the aggregator does not change.

use crate::error::ScrapeError;
use crate::fetch::Page;
use crate::models::Ticker;
use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod cnbc;
pub mod morningstar;
pub mod reuters;
pub mod usatoday;

/// A site-specific headline adapter.
pub trait HeadlineSource {
    /// Short stable name used in logs, config, and reports.
    fn name(&self) -> &'static str;

    /// Page to fetch for `ticker`.
    fn url(&self, ticker: &Ticker) -> Result<String, ScrapeError>;

    /// Clean headlines found on a fetched page, in page order.
    ///
    /// Finding nothing is not an error; it yields an empty list.
    fn extract(&self, page: &Page) -> Vec<String>;
}

/// Built-in sources, selectable from config and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Cnbc,
    Reuters,
    Morningstar,
    #[serde(alias = "usa-today", alias = "usatoday")]
    UsaToday,
}

impl SourceKind {
    /// Default run order.
    pub const ALL: [SourceKind; 4] = [
        SourceKind::Cnbc,
        SourceKind::Reuters,
        SourceKind::Morningstar,
        SourceKind::UsaToday,
    ];

    /// Construct the adapter for this kind.
    ///
    /// # Returns
    ///
    /// A boxed [`HeadlineSource`], or the selector error raised while building it.
    pub fn build(self) -> Result<Box<dyn HeadlineSource>, ScrapeError> {
        let source: Box<dyn HeadlineSource> = match self {
            SourceKind::Cnbc => Box::new(cnbc::Cnbc::new()?),
            SourceKind::Reuters => Box::new(reuters::Reuters::new()?),
            SourceKind::Morningstar => Box::new(morningstar::Morningstar::new()?),
            SourceKind::UsaToday => Box::new(usatoday::UsaToday::new()?),
        };
        Ok(source)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Cnbc => cnbc::NAME,
            SourceKind::Reuters => reuters::NAME,
            SourceKind::Morningstar => morningstar::NAME,
            SourceKind::UsaToday => usatoday::NAME,
        };
        f.write_str(name)
    }
}

/// Build adapters in the given order, skipping repeated kinds.
///
/// # Arguments
///
/// * `kinds` - Requested sources in run order; later repeats are ignored
///
/// # Returns
///
/// One adapter per distinct kind, or the first construction error.
pub fn build_sources(kinds: &[SourceKind]) -> Result<Vec<Box<dyn HeadlineSource>>, ScrapeError> {
    kinds.iter().copied().unique().map(SourceKind::build).collect()
}
