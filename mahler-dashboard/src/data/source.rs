//! Market data source seam.
//!
//! Each quote family is one independent, all-or-nothing query. A family
//! either yields its whole tuple or a `SourceError`; the snapshot builder
//! decides what a failure means for the run.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{Headline, OptionsChain};

/// Errors raised by a market data source.
///
/// Every variant means the requested family is unavailable for this run.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("No data available for {symbol}")]
    NoData { symbol: String },

    #[error("Empty options chain for {symbol}")]
    EmptyOptionsChain { symbol: String },

    #[error("No {side} quote for {symbol} at strike {strike}")]
    NoQuoteAtStrike {
        symbol: String,
        side: &'static str,
        strike: Decimal,
    },
}

/// Yield curve spreads in percentage points (short minus long).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSpreads {
    pub spread_2s5s: f64,
    pub spread_2s10s: f64,
}

impl RateSpreads {
    /// Spreads from the three quoted yields.
    pub fn from_yields(y2: f64, y5: f64, y10: f64) -> Self {
        Self {
            spread_2s5s: y2 - y5,
            spread_2s10s: y2 - y10,
        }
    }
}

/// Spot and 9-day volatility index levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolStructure {
    pub vix: f64,
    pub vix9d: f64,
}

impl VolStructure {
    /// 9-day minus spot volatility.
    pub fn term_structure(&self) -> f64 {
        self.vix9d - self.vix
    }
}

/// ATM straddle premium and the strike it was priced at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedMove {
    pub expected_move: Decimal,
    pub atm_strike: Decimal,
}

impl ExpectedMove {
    /// Price the ATM straddle of `chain` around `underlying_price`.
    pub fn from_chain(
        symbol: &str,
        chain: &OptionsChain,
        underlying_price: Decimal,
    ) -> Result<Self, SourceError> {
        let strike = chain
            .nearest_strike(underlying_price)
            .ok_or_else(|| SourceError::EmptyOptionsChain {
                symbol: symbol.to_string(),
            })?;

        let call = chain
            .call_at_strike(strike)
            .ok_or_else(|| SourceError::NoQuoteAtStrike {
                symbol: symbol.to_string(),
                side: "call",
                strike,
            })?;
        let put = chain
            .put_at_strike(strike)
            .ok_or_else(|| SourceError::NoQuoteAtStrike {
                symbol: symbol.to_string(),
                side: "put",
                strike,
            })?;

        Ok(Self {
            expected_move: call.last_price + put.last_price,
            atm_strike: strike,
        })
    }
}

/// Upstream market data.
///
/// Calls share no state and may run in any order.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// 2s5s and 2s10s yield spreads from the latest session closes.
    async fn fetch_rate_spreads(&self) -> Result<RateSpreads, SourceError>;

    /// Latest spot and 9-day volatility index closes.
    async fn fetch_vol_structure(&self) -> Result<VolStructure, SourceError>;

    /// Expected move from the nearest-expiry ATM straddle.
    async fn fetch_expected_move(&self) -> Result<ExpectedMove, SourceError>;

    /// Latest index future close minus latest cash index close.
    async fn fetch_futures_basis(&self) -> Result<Decimal, SourceError>;

    /// Headlines containing at least one of `keywords`.
    ///
    /// Never fails: a broken feed yields no headlines.
    async fn fetch_headlines(&self, keywords: &[String]) -> Vec<Headline>;
}
