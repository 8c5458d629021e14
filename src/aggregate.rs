//! Running every source for a ticker and tabulating the result.
//!
//! Sources run one after another, in the order given, each to completion
//! before the next starts. A source that fails (or panics) is recorded in its
//! [`SourceOutcome`] and contributes no headlines; the others are unaffected.
//!
//! # Deduplication
//!
//! After normalization, every headline that occurs more than once is removed
//! entirely: *all* copies go, not just the extras. A story syndicated to two
//! outlets therefore disappears from the table. This keep-none policy is
//! deliberate and covered by tests; do not switch it to keep-first.

use crate::error::ScrapeError;
use crate::fetch::{PageFetcher, fetch_page};
use crate::models::{HeadlineRow, HeadlineTable, SourceOutcome, Ticker};
use crate::scrapers::HeadlineSource;
use crate::utils::{normalize, truncate_for_log};
use futures::FutureExt;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

/// Everything one run of the pipeline produced.
#[derive(Debug)]
pub struct HeadlineRun {
    /// `None` when no source produced a single headline.
    pub table: Option<HeadlineTable>,
    /// One entry per source, in run order.
    pub outcomes: Vec<SourceOutcome>,
}

/// All clean headlines, concatenated in source order, plus per-source outcomes.
#[derive(Debug)]
pub struct Collected {
    pub headlines: Vec<String>,
    pub outcomes: Vec<SourceOutcome>,
}

/// Fetch one source's page for `ticker` and extract its headlines.
#[instrument(level = "info", skip_all, fields(source = source.name(), %ticker))]
pub async fn fetch_headlines<F: PageFetcher>(
    fetcher: &F,
    source: &dyn HeadlineSource,
    ticker: &Ticker,
) -> Result<Vec<String>, ScrapeError> {
    let url = source.url(ticker)?;
    let page = fetch_page(fetcher, &url).await?;
    let headlines = source.extract(&page);
    if headlines.is_empty() {
        warn!(url = page.url(), "No headlines matched on page");
    }
    Ok(headlines)
}

/// Run one source, folding any failure (or panic) into its outcome.
async fn run_source<F: PageFetcher>(
    fetcher: &F,
    source: &dyn HeadlineSource,
    ticker: &Ticker,
) -> SourceOutcome {
    let name = source.name();
    let url = source.url(ticker).ok();

    let t0 = Instant::now();
    let result = AssertUnwindSafe(fetch_headlines(fetcher, source, ticker))
        .catch_unwind()
        .await;
    let elapsed_ms = t0.elapsed().as_millis() as u64;

    let (headlines, error) = match result {
        Ok(Ok(headlines)) => {
            info!(source = name, count = headlines.len(), elapsed_ms, "Fetched headlines");
            debug!(source = name, headlines = ?headlines, "Headlines");
            (headlines, None)
        }
        Ok(Err(e)) => {
            error!(source = name, url = ?url, error = %e, elapsed_ms, "Source fetch failed; skipping");
            (Vec::new(), Some(e.to_string()))
        }
        Err(_) => {
            error!(source = name, url = ?url, elapsed_ms, "Source panicked; skipping");
            (Vec::new(), Some("source panicked".to_string()))
        }
    };

    SourceOutcome {
        source: name.to_string(),
        url,
        headlines,
        error,
    }
}

/// Run every source in order and concatenate their headlines.
#[instrument(level = "info", skip_all, fields(%ticker, sources = sources.len()))]
pub async fn collect_headlines<F: PageFetcher>(
    fetcher: &F,
    sources: &[Box<dyn HeadlineSource>],
    ticker: &Ticker,
) -> Collected {
    let outcomes: Vec<SourceOutcome> = stream::iter(sources.iter())
        .then(|source| run_source(fetcher, source.as_ref(), ticker))
        .collect()
        .await;

    let headlines: Vec<String> = outcomes
        .iter()
        .flat_map(|o| o.headlines.iter().cloned())
        .collect();

    let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
    info!(
        total = headlines.len(),
        failed_sources = failed,
        "Collected headlines from all sources"
    );

    Collected {
        headlines,
        outcomes,
    }
}

/// Normalize headlines and build the deduplicated table.
///
/// Returns `None` for an empty input. Otherwise every normalized headline
/// that occurs more than once is dropped, all copies included; the table can
/// therefore be empty even when the input was not.
pub fn tabulate(ticker: &Ticker, headlines: &[String]) -> Option<HeadlineTable> {
    if headlines.is_empty() {
        return None;
    }

    let normalized: Vec<String> = headlines.iter().map(|h| normalize(h)).collect();
    let counts = normalized.iter().counts();

    let rows: Vec<HeadlineRow> = normalized
        .iter()
        .enumerate()
        .filter(|(_, h)| counts.get(h).copied() == Some(1))
        .map(|(index, h)| HeadlineRow {
            index,
            headline: h.clone(),
        })
        .collect();

    let removed = normalized.len() - rows.len();
    if removed > 0 {
        let duplicated: Vec<&String> = counts
            .iter()
            .filter(|&(_, &n)| n > 1)
            .map(|(h, _)| *h)
            .collect();
        debug!(
            removed,
            duplicated = %truncate_for_log(&format!("{duplicated:?}"), 300),
            "Dropped duplicated headlines"
        );
    }

    Some(HeadlineTable {
        title: ticker.table_title(),
        rows,
    })
}

/// Run all sources for `ticker` and tabulate what they return.
#[instrument(level = "info", skip_all, fields(%ticker))]
pub async fn build_table<F: PageFetcher>(
    fetcher: &F,
    ticker: &Ticker,
    sources: &[Box<dyn HeadlineSource>],
) -> HeadlineRun {
    let Collected {
        headlines,
        outcomes,
    } = collect_headlines(fetcher, sources, ticker).await;

    let table = tabulate(ticker, &headlines);
    match &table {
        Some(t) if t.is_empty() => {
            warn!(collected = headlines.len(), "Every headline was duplicated; table is empty")
        }
        Some(t) => {
            info!(rows = t.len(), collected = headlines.len(), "Built headline table");
            debug!(rows = ?t.headlines(), "Table rows");
        }
        None => warn!("No headlines from any source"),
    }

    HeadlineRun { table, outcomes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::Page;
    use crate::fetch::testing::StaticFetcher;
    use crate::scrapers::cnbc::Cnbc;
    use crate::scrapers::morningstar::Morningstar;
    use crate::scrapers::reuters::Reuters;
    use crate::scrapers::usatoday::UsaToday;

    /// Source with a fixed URL that ignores page content.
    struct FixedSource {
        name: &'static str,
        url: &'static str,
        headlines: Vec<&'static str>,
    }

    impl HeadlineSource for FixedSource {
        fn name(&self) -> &'static str {
            self.name
        }

        fn url(&self, _ticker: &Ticker) -> Result<String, ScrapeError> {
            Ok(self.url.to_string())
        }

        fn extract(&self, _page: &Page) -> Vec<String> {
            self.headlines.iter().map(|h| h.to_string()).collect()
        }
    }

    struct PanickingSource;

    impl HeadlineSource for PanickingSource {
        fn name(&self) -> &'static str {
            "panicky"
        }

        fn url(&self, _ticker: &Ticker) -> Result<String, ScrapeError> {
            Ok("https://panicky.test/".to_string())
        }

        fn extract(&self, _page: &Page) -> Vec<String> {
            panic!("markup changed")
        }
    }

    fn fixed(name: &'static str, headlines: Vec<&'static str>) -> Box<dyn HeadlineSource> {
        let url = match name {
            "a" => "https://a.test/",
            "b" => "https://b.test/",
            "c" => "https://c.test/",
            _ => "https://d.test/",
        };
        Box::new(FixedSource {
            name,
            url,
            headlines,
        })
    }

    fn aapl() -> Ticker {
        Ticker::parse("AAPL").unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tabulate_removes_every_copy_of_a_duplicate() {
        let table = tabulate(&aapl(), &strings(&["foo", "bar", "foo"])).unwrap();
        assert_eq!(table.headlines(), vec!["bar"]);
        assert_eq!(table.rows[0].index, 1);
    }

    #[test]
    fn test_tabulate_dedupes_after_normalization() {
        let table = tabulate(
            &aapl(),
            &strings(&["Apple (AAPL) rallies.", "apple aapl rallies", "Other story"]),
        )
        .unwrap();
        assert_eq!(table.headlines(), vec!["other story"]);
        assert_eq!(table.rows[0].index, 2);
    }

    #[test]
    fn test_tabulate_empty_input_builds_nothing() {
        assert!(tabulate(&aapl(), &[]).is_none());
    }

    #[test]
    fn test_tabulate_all_duplicates_gives_empty_table() {
        let table = tabulate(&aapl(), &strings(&["Same", "same."])).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.title, "Recent headlines for AAPL");
    }

    #[test]
    fn test_tabulate_keeps_headline_that_normalizes_to_empty() {
        let table = tabulate(&aapl(), &strings(&["...", "Real news"])).unwrap();
        assert_eq!(table.headlines(), vec!["", "real news"]);
    }

    #[tokio::test]
    async fn test_end_to_end_with_real_adapters() {
        let morningstar_html = r#"<a class="mdc-link mdc-news-module__headline mds-link mds-link--no-underline">Apple hits $150 on strong earnings.</a>"#;
        let reuters_html =
            r#"<h3 class="search-result-title"><a>AAPL: strong earnings report</a></h3>"#;
        let fetcher = StaticFetcher::new()
            .with_page(
                "https://www.morningstar.com/stocks/xnas/aapl/news",
                morningstar_html,
            )
            .with_page("https://www.usatoday.com/search/?q=AAPL", "<html></html>")
            .with_page("https://www.reuters.com/search/news?blob=AAPL", reuters_html)
            .with_page(
                "https://www.cnbc.com/quotes/?symbol=aapl&qsearchterm=aapl&tab=news",
                "<div class=\"assets\"></div>",
            );
        let sources: Vec<Box<dyn HeadlineSource>> = vec![
            Box::new(Morningstar::new().unwrap()),
            Box::new(UsaToday::new().unwrap()),
            Box::new(Reuters::new().unwrap()),
            Box::new(Cnbc::new().unwrap()),
        ];

        let run = build_table(&fetcher, &aapl(), &sources).await;
        let table = run.table.unwrap();
        assert_eq!(table.title, "Recent headlines for AAPL");
        assert_eq!(
            table.headlines(),
            vec![
                "apple hits 150 on strong earnings",
                "aapl strong earnings report"
            ]
        );
        assert_eq!(table.len(), 2);
        assert!(run.outcomes.iter().all(|o| o.succeeded()));
        assert_eq!(fetcher.requested().len(), 4);
    }

    #[tokio::test]
    async fn test_all_sources_empty_builds_no_table() {
        let fetcher = StaticFetcher::new()
            .with_page("https://a.test/", "")
            .with_page("https://b.test/", "")
            .with_page("https://c.test/", "")
            .with_page("https://d.test/", "");
        let sources = vec![
            fixed("a", vec![]),
            fixed("b", vec![]),
            fixed("c", vec![]),
            fixed("d", vec![]),
        ];
        let run = build_table(&fetcher, &aapl(), &sources).await;
        assert!(run.table.is_none());
        assert_eq!(
            crate::outputs::table::console(run.table.as_ref()),
            "Invalid ticker or no headlines available.\n"
        );
        assert_eq!(run.outcomes.len(), 4);
    }

    #[tokio::test]
    async fn test_failing_source_does_not_affect_others() {
        // b.test is not served, so source "b" gets a 404
        let fetcher = StaticFetcher::new()
            .with_page("https://a.test/", "")
            .with_page("https://c.test/", "")
            .with_page("https://d.test/", "");
        let sources = vec![
            fixed("a", vec!["From A"]),
            fixed("b", vec!["From B"]),
            fixed("c", vec!["From C"]),
            fixed("d", vec!["From D"]),
        ];
        let run = build_table(&fetcher, &aapl(), &sources).await;

        let table = run.table.unwrap();
        assert_eq!(table.headlines(), vec!["from a", "from c", "from d"]);
        let failed: Vec<&str> = run
            .outcomes
            .iter()
            .filter(|o| !o.succeeded())
            .map(|o| o.source.as_str())
            .collect();
        assert_eq!(failed, vec!["b"]);
        assert!(run.outcomes[1].headlines.is_empty());
    }

    #[tokio::test]
    async fn test_panicking_source_is_isolated() {
        let fetcher = StaticFetcher::new()
            .with_page("https://a.test/", "")
            .with_page("https://panicky.test/", "");
        let sources: Vec<Box<dyn HeadlineSource>> =
            vec![Box::new(PanickingSource), fixed("a", vec!["Survivor"])];
        let run = build_table(&fetcher, &aapl(), &sources).await;
        assert_eq!(run.table.unwrap().headlines(), vec!["survivor"]);
        assert_eq!(
            run.outcomes[0].error.as_deref(),
            Some("source panicked")
        );
    }

    #[tokio::test]
    async fn test_sources_run_in_given_order() {
        let fetcher = StaticFetcher::new()
            .with_page("https://a.test/", "")
            .with_page("https://b.test/", "")
            .with_page("https://c.test/", "");
        let sources = vec![
            fixed("c", vec!["three"]),
            fixed("a", vec!["one", "uno"]),
            fixed("b", vec!["two"]),
        ];
        let collected = collect_headlines(&fetcher, &sources, &aapl()).await;
        assert_eq!(collected.headlines, vec!["three", "one", "uno", "two"]);
        assert_eq!(
            fetcher.requested(),
            vec!["https://c.test/", "https://a.test/", "https://b.test/"]
        );
    }

    #[tokio::test]
    async fn test_fetch_headlines_single_source() {
        let fetcher = StaticFetcher::new().with_page(
            "https://www.reuters.com/search/news?blob=AAPL",
            r#"<h3 class="search-result-title">  Apple
                 news </h3>"#,
        );
        let source = Reuters::new().unwrap();
        let headlines = fetch_headlines(&fetcher, &source, &aapl()).await.unwrap();
        assert_eq!(headlines, vec!["Apple news"]);
    }
}
