//! Console rendering of the headline table.
//!
//! Layout is a two-column listing: the row index (position before
//! deduplication) followed by the headline, under the table title.
//!
//! ```text
//!    Recent headlines for AAPL
//! 0  apple hits 150 on strong earnings
//! 2  aapl strong earnings report
//! ```

use crate::models::HeadlineTable;
use std::fmt::Write;

/// Printed instead of a table when no source returned any headline.
pub const NO_HEADLINES: &str = "Invalid ticker or no headlines available.";

/// Status line printed before any source is fetched.
pub fn fetching_banner(ticker: &str) -> String {
    format!("Fetching headlines for {ticker}...")
}

/// Console output for a finished run.
///
/// # Arguments
///
/// * `table` - The tabulated headlines, `None` when no source returned any
///
/// # Returns
///
/// The rendered table, or [`NO_HEADLINES`] alone when there is no table.
/// Always ends with a newline.
pub fn console(table: Option<&HeadlineTable>) -> String {
    match table {
        Some(table) => render(table),
        None => format!("{NO_HEADLINES}\n"),
    }
}

/// Render `table` as plain text, one row per line.
pub fn render(table: &HeadlineTable) -> String {
    let width = table
        .rows
        .iter()
        .map(|r| r.index.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    let _ = writeln!(out, "{:width$}  {}", "", table.title);
    for row in &table.rows {
        let _ = writeln!(out, "{:>width$}  {}", row.index, row.headline);
    }
    out
}
