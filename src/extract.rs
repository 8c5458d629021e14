//! Turning matched elements into clean headlines.
//!
//! A clean headline is the element's text with every whitespace run folded
//! into one space. Elements without text contribute nothing; there is no
//! deduplication at this stage.

use crate::fetch::{ClassSelector, element_text};
use crate::utils::collapse_whitespace;
use scraper::ElementRef;
use tracing::debug;

/// Clean raw text fragments, keeping order and dropping blanks.
///
/// Fragments that are empty, or that contain nothing but whitespace, are
/// skipped rather than kept as empty entries.
pub fn clean_texts<I, S>(texts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .filter_map(|raw| {
            let raw = raw.as_ref();
            if raw.is_empty() {
                return None;
            }
            let clean = collapse_whitespace(raw);
            (!clean.is_empty()).then_some(clean)
        })
        .collect()
}

/// Clean headlines from the full text of each element.
pub fn extract<'a, I>(elements: I) -> Vec<String>
where
    I: IntoIterator<Item = ElementRef<'a>>,
{
    clean_texts(elements.into_iter().map(|e| element_text(&e)))
}

/// Clean headlines from the first `inner` descendant of each container.
///
/// Containers with no such descendant are skipped.
pub fn extract_nested<'a, I>(containers: I, inner: &ClassSelector) -> Vec<String>
where
    I: IntoIterator<Item = ElementRef<'a>>,
{
    let mut missing = 0usize;
    let texts: Vec<String> = containers
        .into_iter()
        .filter_map(|container| match inner.first_within(container) {
            Some(found) => Some(element_text(&found)),
            None => {
                missing += 1;
                None
            }
        })
        .collect();
    if missing > 0 {
        debug!(
            missing,
            inner = inner.tag_name(),
            "Containers without a nested headline element"
        );
    }
    clean_texts(texts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::Page;

    #[test]
    fn test_clean_texts_collapses_whitespace() {
        assert_eq!(
            clean_texts(["Apple\n\tReports   Earnings"]),
            vec!["Apple Reports Earnings"]
        );
    }

    #[test]
    fn test_clean_texts_skips_empty_and_blank() {
        let input = ["", "  Tesla  recalls ", "\n\t", "Nvidia"];
        let out = clean_texts(input);
        assert_eq!(out, vec!["Tesla recalls", "Nvidia"]);
        assert!(out.len() <= input.len());
    }

    #[test]
    fn test_clean_texts_keeps_duplicates_and_order() {
        assert_eq!(clean_texts(["b", "a", "b"]), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_extract_reads_nested_text() {
        let page = Page::parse(
            "https://example.com",
            r#"<h3 class="search-result-title"><a>Apple <b>beats</b>
                 estimates</a></h3>
               <h3 class="search-result-title"></h3>
               <h3 class="search-result-title">Second</h3>"#,
        );
        let sel = ClassSelector::new("h3", "search-result-title").unwrap();
        assert_eq!(
            extract(page.select(&sel)),
            vec!["Apple beats estimates", "Second"]
        );
    }

    #[test]
    fn test_extract_nested_first_descendant_only() {
        let page = Page::parse(
            "https://example.com",
            r#"<div class="assets"><span> Apple   event </span><span>ignored</span></div>
               <div class="assets"><a>no span here</a></div>
               <div class="assets"><span></span></div>
               <div class="assets"><a><span>Deep span</span></a></div>"#,
        );
        let containers = page.select(&ClassSelector::new("div", "assets").unwrap());
        let span = ClassSelector::tag("span").unwrap();
        assert_eq!(
            extract_nested(containers, &span),
            vec!["Apple event", "Deep span"]
        );
    }
}
