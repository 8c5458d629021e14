//! Morningstar stock news scraper.
//!
//! # URL Pattern
//!
//! The lowercase ticker is a path segment:
//! `https://www.morningstar.com/stocks/xnas/aapl/news`.

use crate::error::ScrapeError;
use crate::extract::extract;
use crate::fetch::{ClassSelector, Page};
use crate::models::Ticker;
use crate::scrapers::HeadlineSource;
use url::Url;

pub const NAME: &str = "morningstar";
const BASE_URL: &str = "https://www.morningstar.com/stocks/xnas";
const HEADLINE_CLASS: &str = "mdc-link mdc-news-module__headline mds-link mds-link--no-underline";

#[derive(Debug)]
pub struct Morningstar {
    headline: ClassSelector,
}

impl Morningstar {
    /// Build the Morningstar stock-news adapter, compiling the headline link selector.
    ///
    /// # Returns
    ///
    /// The adapter, or [`ScrapeError::Selector`] if a fixed selector fails to parse.
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            headline: ClassSelector::new("a", HEADLINE_CLASS)?,
        })
    }
}

impl HeadlineSource for Morningstar {
    fn name(&self) -> &'static str {
        NAME
    }

    fn url(&self, ticker: &Ticker) -> Result<String, ScrapeError> {
        let symbol = ticker.to_lowercase();
        let url = Url::parse(&format!(
            "{}/{}/news",
            BASE_URL,
            urlencoding::encode(&symbol)
        ))?;
        Ok(url.to_string())
    }

    fn extract(&self, page: &Page) -> Vec<String> {
        extract(page.select(&self.headline))
    }
}
