//! Reuters news search scraper.

use crate::error::ScrapeError;
use crate::extract::extract;
use crate::fetch::{ClassSelector, Page};
use crate::models::Ticker;
use crate::scrapers::HeadlineSource;
use url::Url;

pub const NAME: &str = "reuters";
const SEARCH_URL: &str = "https://www.reuters.com/search/news";

#[derive(Debug)]
pub struct Reuters {
    headline: ClassSelector,
}

impl Reuters {
    /// Build the Reuters search adapter, compiling the `h3.search-result-title` selector.
    ///
    /// # Returns
    ///
    /// The adapter, or [`ScrapeError::Selector`] if a fixed selector fails to parse.
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            headline: ClassSelector::new("h3", "search-result-title")?,
        })
    }
}

impl HeadlineSource for Reuters {
    fn name(&self) -> &'static str {
        NAME
    }

    fn url(&self, ticker: &Ticker) -> Result<String, ScrapeError> {
        let url = Url::parse_with_params(SEARCH_URL, &[("blob", ticker.as_str())])?;
        Ok(url.to_string())
    }

    fn extract(&self, page: &Page) -> Vec<String> {
        extract(page.select(&self.headline))
    }
}
