//! USA Today search scraper.
//!
//! Headlines come from the site search, `https://www.usatoday.com/search/?q=AAPL`.

use crate::error::ScrapeError;
use crate::extract::extract;
use crate::fetch::{ClassSelector, Page};
use crate::models::Ticker;
use crate::scrapers::HeadlineSource;
use url::Url;

pub const NAME: &str = "usa_today";
const SEARCH_URL: &str = "https://www.usatoday.com/search/";
const HEADLINE_CLASS: &str = "gnt_se_a gnt_se_a__hd gnt_se_a__hi";

#[derive(Debug)]
pub struct UsaToday {
    headline: ClassSelector,
}

impl UsaToday {
    /// Build the USA Today search adapter, compiling the headline link selector.
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

impl HeadlineSource for UsaToday {
    fn name(&self) -> &'static str {
        NAME
    }

    fn url(&self, ticker: &Ticker) -> Result<String, ScrapeError> {
        let url = Url::parse_with_params(SEARCH_URL, &[("q", ticker.as_str())])?;
        Ok(url.to_string())
    }

    fn extract(&self, page: &Page) -> Vec<String> {
        extract(page.select(&self.headline))
    }
}
