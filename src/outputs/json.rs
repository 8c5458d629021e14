//! JSON export of a run.
//!
//! Reports are grouped by local date, one file per ticker:
//! `{json_output_dir}/{YYYY-MM-DD}/{TICKER}.json`. Running the same ticker
//! twice on one day overwrites the earlier report.

use crate::aggregate::HeadlineRun;
use crate::error::ScrapeError;
use crate::models::{HeadlineReport, SourceSummary, Ticker};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Assemble the serializable report for a run finished at `at`.
pub fn build_report(ticker: &Ticker, run: &HeadlineRun, at: DateTime<Local>) -> HeadlineReport {
    HeadlineReport {
        ticker: ticker.clone(),
        local_date: at.format("%Y-%m-%d").to_string(),
        local_time: at.format("%H:%M:%S").to_string(),
        table: run.table.clone(),
        sources: run.outcomes.iter().map(SourceSummary::from).collect(),
    }
}

/// Write `report` below `json_output_dir` and return the file path.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir, ticker = %report.ticker))]
pub async fn write_report(
    report: &HeadlineReport,
    json_output_dir: &str,
) -> Result<PathBuf, ScrapeError> {
    let json = serde_json::to_string_pretty(report)?;

    let full_json_dir = Path::new(json_output_dir).join(&report.local_date);
    info!(dir = %full_json_dir.display(), "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(dir = %full_json_dir.display(), error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = full_json_dir.join(format!("{}.json", report.ticker));
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON report");
    Ok(path)
}
