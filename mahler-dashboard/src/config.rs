//! Dashboard configuration.
//!
//! Every section has defaults matching the reference dashboard, so a TOML
//! file only needs the keys it overrides:
//!
//! ```toml
//! [news]
//! keywords = ["Fed", "CPI"]
//!
//! [scoring]
//! expected_move_threshold = 6.0
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Quote symbols for each indicator family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolConfig {
    /// Short-end yield (2Y proxy).
    pub short_yield: String,
    /// 5Y yield.
    pub mid_yield: String,
    /// 10Y yield.
    pub long_yield: String,
    /// Spot volatility index.
    pub vix: String,
    /// 9-day volatility index.
    pub vix9d: String,
    /// Underlying for the ATM straddle.
    pub options_underlying: String,
    /// Near-dated index future.
    pub future: String,
    /// Cash index matching the future.
    pub cash_index: String,
}

impl Default for SymbolConfig {
    fn default() -> Self {
        Self {
            short_yield: "^IRX".to_string(),
            mid_yield: "^FVX".to_string(),
            long_yield: "^TNX".to_string(),
            vix: "^VIX".to_string(),
            vix9d: "^VIX9D".to_string(),
            options_underlying: "SPY".to_string(),
            future: "ES=F".to_string(),
            cash_index: "^GSPC".to_string(),
        }
    }
}

/// News feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// Listing page to scrape.
    pub url: String,
    /// CSS selector for headline nodes.
    pub selector: String,
    /// Case-sensitive keywords; a headline needs at least one.
    pub keywords: Vec<String>,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            url: "https://finance.yahoo.com/".to_string(),
            selector: "h3".to_string(),
            keywords: [
                "Fed",
                "CPI",
                "Jobs",
                "Powell",
                "inflation",
                "unemployment",
                "GDP",
            ]
            .iter()
            .map(|k| k.to_string())
            .collect(),
        }
    }
}

/// HTTP client settings shared by all feeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Quote API base URL.
    pub quote_base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            quote_base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 8,
            user_agent: concat!("mahler-dashboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Risk scoring thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Straddle premium below this is read as calm (currency units).
    pub expected_move_threshold: Decimal,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            expected_move_threshold: Decimal::from(5),
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory the HTML report is written to.
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

/// Complete dashboard configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub symbols: SymbolConfig,
    pub news: NewsConfig,
    pub http: HttpConfig,
    pub scoring: ScoringConfig,
    pub report: ReportConfig,
}

impl DashboardConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
