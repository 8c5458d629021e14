//! Page fetching and tag/class selection.
//!
//! A fetch is one HTTP GET followed by a lenient HTML parse. `scraper` (html5ever)
//! never rejects a document: malformed markup yields a best-effort tree, so
//! the only failures here are transport errors and non-success statuses.
//!
//! # Architecture
//!
//! - [`PageFetcher`]: the network seam. [`HttpFetcher`] is the real client;
//!   tests serve canned HTML through the same trait.
//! - [`Page`]: a parsed document that can be queried with a [`ClassSelector`].
//! - [`ClassSelector`]: a `(tag, class)` pair with BeautifulSoup-style class
//!   matching.

use crate::error::ScrapeError;
use scraper::{ElementRef, Html, Selector};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Retrieves the body of a URL as text.
pub trait PageFetcher {
    /// Perform one GET and return the response body.
    ///
    /// Non-success statuses must be reported as [`ScrapeError::Status`].
    async fn fetch_text(&self, url: &str) -> Result<String, ScrapeError>;
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client with a per-request timeout and a fixed user agent.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_text(&self, url: &str) -> Result<String, ScrapeError> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Non-success HTTP status"
            );
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}

/// Elements are matched by tag name and class attribute.
///
/// Class matching follows the `find_all(tag, class_=...)` convention:
/// - a single class token matches any element carrying that token
/// - several tokens match only when the element's class list is exactly those
///   tokens in that order (extra whitespace is ignored)
/// - an empty class matches every element with the tag
#[derive(Debug, Clone)]
pub struct ClassSelector {
    tag: String,
    classes: Vec<String>,
    selector: Selector,
}

impl ClassSelector {
    /// Compile a `(tag, class)` pair.
    ///
    /// # Arguments
    ///
    /// * `tag` - Element name, e.g. `"a"` or `"h3"`
    /// * `class` - Space-separated class tokens; empty means any element with the tag
    ///
    /// # Returns
    ///
    /// The selector, or [`ScrapeError::Selector`] when `tag` is not a valid
    /// CSS type selector.
    pub fn new(tag: &str, class: &str) -> Result<Self, ScrapeError> {
        let selector = Selector::parse(tag).map_err(|e| ScrapeError::Selector {
            selector: tag.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            tag: tag.to_string(),
            classes: class.split_whitespace().map(str::to_string).collect(),
            selector,
        })
    }

    /// Selector for a bare tag name, with no class constraint.
    pub fn tag(tag: &str) -> Result<Self, ScrapeError> {
        Self::new(tag, "")
    }

    /// Tag name this selector was built with.
    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    /// Class string this selector was built with, single-spaced.
    pub fn class(&self) -> String {
        self.classes.join(" ")
    }

    /// Whether `element` has this tag and satisfies the class rule described
    /// on [`ClassSelector`].
    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        if !element.value().name().eq_ignore_ascii_case(&self.tag) {
            return false;
        }
        if self.classes.is_empty() {
            return true;
        }
        let Some(attr) = element.value().attr("class") else {
            return false;
        };
        let tokens: Vec<&str> = attr.split_whitespace().collect();
        match self.classes.as_slice() {
            [single] => tokens.iter().any(|t| t == single),
            many => tokens.len() == many.len() && tokens.iter().zip(many).all(|(a, b)| a == b),
        }
    }

    /// First matching descendant of `element`, not counting `element` itself.
    pub fn first_within<'a>(&self, element: ElementRef<'a>) -> Option<ElementRef<'a>> {
        element.select(&self.selector).find(|e| self.matches(e))
    }
}

/// A parsed HTML document.
#[derive(Debug)]
pub struct Page {
    url: String,
    document: Html,
}

impl Page {
    /// Parse `html` leniently; this never fails.
    pub fn parse(url: &str, html: &str) -> Self {
        Self {
            url: url.to_string(),
            document: Html::parse_document(html),
        }
    }

    /// URL the page was fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Every element matching `selector`, in document order.
    pub fn select(&self, selector: &ClassSelector) -> Vec<ElementRef<'_>> {
        let matched: Vec<ElementRef<'_>> = self
            .document
            .select(&selector.selector)
            .filter(|e| selector.matches(e))
            .collect();
        debug!(
            url = %self.url,
            tag = selector.tag_name(),
            class = %selector.class(),
            matched = matched.len(),
            "Selected elements"
        );
        matched
    }
}

/// Fetch `url` once and parse the body.
#[instrument(level = "info", skip(fetcher))]
pub async fn fetch_page<F: PageFetcher>(fetcher: &F, url: &str) -> Result<Page, ScrapeError> {
    let body = fetcher.fetch_text(url).await?;
    let page = Page::parse(url, &body);
    debug!(bytes = body.len(), "Parsed page");
    Ok(page)
}

/// Full text content of an element, all descendant text nodes concatenated.
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect()
}
