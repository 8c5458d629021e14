//! Text helpers and file system checks.
//!
//! - [`normalize`] turns a clean headline into the form stored in the table
//! - [`collapse_whitespace`] folds tab/newline/space runs into single spaces
//! - [`truncate_for_log`] keeps log lines short
//! - [`ensure_writable_dir`] validates the JSON export directory up front

use crate::error::ScrapeError;
use itertools::Itertools;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Characters removed by [`normalize`], wherever they occur.
///
/// `$` is included so that prices like `$150` normalize to `150`. A literal
/// backslash is deleted as well, matching the established headline format.
pub const DELETABLE: &[char] = &[
    '-', '(', ')', '"', '#', '/', '@', ';', ':', '<', '>', '{', '}', '=', '~', '|', '.', '?',
    ',', '$', '\\',
];

/// Strip the [`DELETABLE`] punctuation from a line and lowercase it.
///
/// Pure character-class deletion: no context, no escaping. A line made only of
/// deletable characters normalizes to the empty string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize("AAPL: strong earnings report"), "aapl strong earnings report");
/// assert_eq!(normalize("--()--"), "");
/// ```
pub fn normalize(line: &str) -> String {
    line.chars()
        .filter(|c| !DELETABLE.contains(c))
        .collect::<String>()
        .to_lowercase()
}

/// Split on runs of whitespace and rejoin with single spaces.
///
/// Leading and trailing whitespace disappears as a consequence.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().join(" ")
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at the last char boundary at or before `max` bytes and
/// get `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and removes a probe file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), ScrapeError> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
