pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{Result, ScraperError};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_URL: &str = "https://fakestoreapi.com/products";
pub const DEFAULT_OUTPUT: &str = "products.csv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_DELAY_SECS: f64 = 1.0;
pub const DEFAULT_LOG_FILE: &str = "scraper.log";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "product-scraper", version)]
#[command(about = "🕷️ Fetch a JSON product list and export it to CSV")]
#[command(after_help = "Examples:
  product-scraper
  product-scraper --output data.csv
  product-scraper --url https://api.example.com/products --timeout 60
  product-scraper --retries 5 --delay 2")]
pub struct CliConfig {
    /// API URL to scrape
    #[arg(short, long)]
    pub url: Option<String>,

    /// Output CSV filename
    #[arg(short, long)]
    pub output: Option<String>,

    /// Request timeout (seconds)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Number of attempts before giving up
    #[arg(short, long)]
    pub retries: Option<u32>,

    /// Delay between retries (seconds)
    #[arg(short, long)]
    pub delay: Option<f64>,

    /// Disable statistics display
    #[arg(long)]
    pub no_stats: bool,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Effective settings after merging CLI flags, the TOML file and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ScraperSettings {
    pub url: String,
    pub output: String,
    pub timeout_secs: u64,
    pub retries: u32,
    pub delay_secs: f64,
    pub show_stats: bool,
    pub log_file: String,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            output: DEFAULT_OUTPUT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retries: DEFAULT_RETRIES,
            delay_secs: DEFAULT_DELAY_SECS,
            show_stats: true,
            log_file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl CliConfig {
    /// Loads the TOML file named by `--config`, if any, and resolves settings.
    pub fn resolve(&self) -> Result<ScraperSettings> {
        let file = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };
        Ok(self.merge(file.as_ref()))
    }

    /// 優先順序: 命令列 > TOML > 預設值
    pub fn merge(&self, file: Option<&TomlConfig>) -> ScraperSettings {
        let defaults = ScraperSettings::default();
        let source = file.and_then(|f| f.source.as_ref());
        let load = file.and_then(|f| f.load.as_ref());
        let report = file.and_then(|f| f.report.as_ref());

        ScraperSettings {
            url: self
                .url
                .clone()
                .or_else(|| source.and_then(|s| s.endpoint.clone()))
                .unwrap_or(defaults.url),
            output: self
                .output
                .clone()
                .or_else(|| load.and_then(|l| l.output_path.clone()))
                .unwrap_or(defaults.output),
            timeout_secs: self
                .timeout
                .or_else(|| source.and_then(|s| s.timeout_seconds))
                .unwrap_or(defaults.timeout_secs),
            retries: self
                .retries
                .or_else(|| source.and_then(|s| s.retry_attempts))
                .unwrap_or(defaults.retries),
            delay_secs: self
                .delay
                .or_else(|| source.and_then(|s| s.retry_delay_seconds))
                .unwrap_or(defaults.delay_secs),
            show_stats: if self.no_stats {
                false
            } else {
                report.and_then(|r| r.show_stats).unwrap_or(defaults.show_stats)
            },
            log_file: self
                .log_file
                .clone()
                .or_else(|| report.and_then(|r| r.log_file.clone()))
                .unwrap_or(defaults.log_file),
        }
    }
}

impl Validate for ScraperSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("--url", &self.url)?;
        validation::validate_path("--output", &self.output)?;
        validation::validate_path("--log-file", &self.log_file)?;
        validation::validate_positive_number("--timeout", self.timeout_secs as usize, 1)?;
        validation::validate_positive_number("--retries", self.retries as usize, 1)?;

        // 負數、NaN 與超出 Duration 範圍的值都會被拒絕
        if Duration::try_from_secs_f64(self.delay_secs).is_err() {
            return Err(ScraperError::InvalidConfigValueError {
                field: "--delay".to_string(),
                value: self.delay_secs.to_string(),
                reason: "Delay must be a non-negative number of seconds".to_string(),
            });
        }
        Ok(())
    }
}

impl ConfigProvider for ScraperSettings {
    fn api_endpoint(&self) -> &str {
        &self.url
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn retry_attempts(&self) -> u32 {
        self.retries
    }

    fn retry_delay(&self) -> Duration {
        // validate() 已確認 delay 可轉為 Duration
        Duration::try_from_secs_f64(self.delay_secs).unwrap_or(Duration::ZERO)
    }
}
