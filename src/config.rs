//! Run configuration.
//!
//! Settings come from three layers, later ones winning: built-in defaults, an
//! optional YAML file (`--config`), and command-line flags.
//!
//! ```yaml
//! timeout_secs: 20
//! user_agent: "Mozilla/5.0 ..."
//! sources: [cnbc, reuters, morningstar, usa_today]
//! ```
//!
//! Every field is optional in the file.

use crate::cli::Cli;
use crate::error::ScrapeError;
use crate::scrapers::SourceKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, instrument};

pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScraperConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header sent to every source.
    pub user_agent: String,
    /// Sources to query, in run order.
    pub sources: Vec<SourceKind>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            sources: SourceKind::ALL.to_vec(),
        }
    }
}

impl ScraperConfig {
    /// Parse a config document; missing keys take their defaults.
    ///
    /// # Returns
    ///
    /// The validated config, or [`ScrapeError::Config`] /
    /// [`ScrapeError::InvalidConfig`] on malformed or unusable input.
    pub fn from_yaml(yaml: &str) -> Result<Self, ScrapeError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Override file/default values with flags given on the command line.
    pub fn apply_cli(&mut self, cli: &Cli) -> Result<(), ScrapeError> {
        if let Some(secs) = cli.timeout_secs {
            self.timeout_secs = secs;
        }
        if !cli.sources.is_empty() {
            self.sources = cli.sources.clone();
        }
        self.validate()
    }

    /// Per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<(), ScrapeError> {
        if self.timeout_secs == 0 {
            return Err(ScrapeError::InvalidConfig(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.sources.is_empty() {
            return Err(ScrapeError::InvalidConfig(
                "at least one source is required".to_string(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ScrapeError::InvalidConfig(
                "user_agent must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Read and validate a YAML config file.
#[instrument(level = "info")]
pub async fn load_config(path: &str) -> Result<ScraperConfig, ScrapeError> {
    let yaml = fs::read_to_string(path).await?;
    let config = ScraperConfig::from_yaml(&yaml)?;
    info!(
        timeout_secs = config.timeout_secs,
        sources = ?config.sources,
        "Loaded configuration"
    );
    Ok(config)
}

/// Resolve the effective configuration for this run.
pub async fn resolve(cli: &Cli) -> Result<ScraperConfig, ScrapeError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path).await?,
        None => ScraperConfig::default(),
    };
    config.apply_cli(cli)?;
    debug!(?config, "Effective configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = ScraperConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(20));
        assert_eq!(config.sources, SourceKind::ALL.to_vec());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = ScraperConfig::from_yaml("timeout_secs: 5\n").unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.sources.len(), 4);
    }

    #[test]
    fn test_yaml_sources_order_preserved() {
        let config = ScraperConfig::from_yaml("sources: [usa_today, cnbc]\n").unwrap();
        assert_eq!(config.sources, vec![SourceKind::UsaToday, SourceKind::Cnbc]);
    }

    #[test]
    fn test_yaml_rejects_unknown_fields_and_bad_values() {
        assert!(matches!(
            ScraperConfig::from_yaml("retries: 3\n"),
            Err(ScrapeError::Config(_))
        ));
        assert!(matches!(
            ScraperConfig::from_yaml("timeout_secs: 0\n"),
            Err(ScrapeError::InvalidConfig(_))
        ));
        assert!(matches!(
            ScraperConfig::from_yaml("sources: []\n"),
            Err(ScrapeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = ScraperConfig::from_yaml("timeout_secs: 5\nsources: [cnbc]\n").unwrap();
        let cli = Cli::parse_from([
            "ticker_headlines",
            "MSFT",
            "--timeout-secs",
            "9",
            "--source",
            "reuters",
            "--source",
            "usa-today",
        ]);
        config.apply_cli(&cli).unwrap();
        assert_eq!(config.timeout_secs, 9);
        assert_eq!(
            config.sources,
            vec![SourceKind::Reuters, SourceKind::UsaToday]
        );
    }

    #[tokio::test]
    async fn test_resolve_without_config_file() {
        let cli = Cli::parse_from(["ticker_headlines", "AAPL"]);
        let config = resolve(&cli).await.unwrap();
        assert_eq!(config, ScraperConfig::default());
    }

    #[tokio::test]
    async fn test_load_config_missing_file_is_io_error() {
        let err = load_config("/definitely/not/here.yaml").await.unwrap_err();
        assert!(matches!(err, ScrapeError::Io(_)));
    }
}
