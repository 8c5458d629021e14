//! CNBC quote page news scraper.
//!
//! The quote page's news tab lists stories in `div.assets` containers. The
//! headline text sits in the first `span` inside each container, so this
//! source selects in two steps. Containers without a `span` are skipped, which
//! keeps the source usable if CNBC changes part of its markup.
//!
//! # URL Pattern
//!
//! The lowercase ticker appears twice in the query string:
//! `https://www.cnbc.com/quotes/?symbol=aapl&qsearchterm=aapl&tab=news`.

use crate::error::ScrapeError;
use crate::extract::extract_nested;
use crate::fetch::{ClassSelector, Page};
use crate::models::Ticker;
use crate::scrapers::HeadlineSource;
use url::Url;

pub const NAME: &str = "cnbc";
const QUOTE_URL: &str = "https://www.cnbc.com/quotes/";

#[derive(Debug)]
pub struct Cnbc {
    container: ClassSelector,
    headline: ClassSelector,
}

impl Cnbc {
    /// Build the CNBC quote-page adapter, compiling `div.assets` containers and their first `span`.
    ///
    /// # Returns
    ///
    /// The adapter, or [`ScrapeError::Selector`] if a fixed selector fails to parse.
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            container: ClassSelector::new("div", "assets")?,
            headline: ClassSelector::tag("span")?,
        })
    }
}

impl HeadlineSource for Cnbc {
    fn name(&self) -> &'static str {
        NAME
    }

    fn url(&self, ticker: &Ticker) -> Result<String, ScrapeError> {
        let symbol = ticker.to_lowercase();
        let url = Url::parse_with_params(
            QUOTE_URL,
            &[
                ("symbol", symbol.as_str()),
                ("qsearchterm", symbol.as_str()),
                ("tab", "news"),
            ],
        )?;
        Ok(url.to_string())
    }

    fn extract(&self, page: &Page) -> Vec<String> {
        extract_nested(page.select(&self.container), &self.headline)
    }
}
