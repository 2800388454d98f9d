//! Yahoo Finance client for quote history, option chains and headlines.
//!
//! Endpoints:
//! - Chart: `/v8/finance/chart/{symbol}?range=5d&interval=1d`
//! - Options: `/v7/finance/options/{symbol}` (nearest expiry first)
//!
//! The five-day range means a prior session close is used when the
//! current session has not printed yet.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use super::news::{extract_headlines, filter_headlines, NewsError};
use super::source::{ExpectedMove, MarketDataSource, RateSpreads, SourceError, VolStructure};
use super::types::{DailyClose, Headline, OptionQuote, OptionType, OptionsChain};
use crate::config::{DashboardConfig, NewsConfig, SymbolConfig};

/// Lookback range for daily closes.
const CHART_RANGE: &str = "5d";

/// API error body, present on unknown symbols.
#[derive(Debug, Clone, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl ApiError {
    fn message(&self) -> String {
        format!(
            "{}: {}",
            self.code.as_deref().unwrap_or("error"),
            self.description.as_deref().unwrap_or("no description")
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<QuoteIndicator>,
}

#[derive(Debug, Clone, Deserialize)]
struct QuoteIndicator {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionsEnvelope {
    option_chain: OptionChainBody,
}

#[derive(Debug, Clone, Deserialize)]
struct OptionChainBody {
    #[serde(default)]
    result: Option<Vec<OptionChainResult>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Clone, Deserialize)]
struct OptionChainResult {
    #[serde(default)]
    quote: Option<RawQuote>,
    #[serde(default)]
    options: Vec<RawExpiry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuote {
    #[serde(default)]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExpiry {
    #[serde(default)]
    expiration_date: Option<i64>,
    #[serde(default)]
    calls: Vec<RawContract>,
    #[serde(default)]
    puts: Vec<RawContract>,
}

/// One contract row from the options endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContract {
    strike: f64,
    #[serde(default)]
    last_price: Option<f64>,
}

impl RawContract {
    /// Convert to an `OptionQuote`; contracts that never traded are dropped.
    fn to_quote(&self, option_type: OptionType) -> Option<OptionQuote> {
        Some(OptionQuote {
            strike: Decimal::try_from(self.strike).ok()?,
            option_type,
            last_price: Decimal::try_from(self.last_price?).ok()?,
        })
    }
}

fn timestamp_date(ts: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}

/// Most recent non-null close in a chart response.
pub fn parse_latest_close(symbol: &str, body: &str) -> Result<DailyClose, SourceError> {
    let envelope: ChartEnvelope = serde_json::from_str(body).map_err(|e| {
        SourceError::InvalidResponse(format!("Failed to parse chart for {}: {}", symbol, e))
    })?;

    if let Some(err) = envelope.chart.error {
        return Err(SourceError::InvalidResponse(format!(
            "{} chart: {}",
            symbol,
            err.message()
        )));
    }

    let result = envelope
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| SourceError::NoData {
            symbol: symbol.to_string(),
        })?;

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    closes
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, close)| {
            close.filter(|c| c.is_finite()).map(|c| DailyClose {
                date: result.timestamp.get(i).copied().and_then(timestamp_date),
                close: c,
            })
        })
        .ok_or_else(|| SourceError::NoData {
            symbol: symbol.to_string(),
        })
}

/// Nearest-expiry chain and the underlying's last traded price, if quoted.
pub fn parse_options_chain(
    symbol: &str,
    body: &str,
) -> Result<(OptionsChain, Option<Decimal>), SourceError> {
    let envelope: OptionsEnvelope = serde_json::from_str(body).map_err(|e| {
        SourceError::InvalidResponse(format!("Failed to parse options for {}: {}", symbol, e))
    })?;

    if let Some(err) = envelope.option_chain.error {
        return Err(SourceError::InvalidResponse(format!(
            "{} options: {}",
            symbol,
            err.message()
        )));
    }

    let result = envelope
        .option_chain
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| SourceError::EmptyOptionsChain {
            symbol: symbol.to_string(),
        })?;

    let underlying_price = result
        .quote
        .and_then(|q| q.regular_market_price)
        .and_then(|p| Decimal::try_from(p).ok());

    let expiry = result
        .options
        .into_iter()
        .next()
        .ok_or_else(|| SourceError::EmptyOptionsChain {
            symbol: symbol.to_string(),
        })?;

    let mut chain = OptionsChain::new(expiry.expiration_date.and_then(timestamp_date));
    for quote in expiry.calls.iter().filter_map(|c| c.to_quote(OptionType::Call)) {
        chain.add_quote(quote);
    }
    for quote in expiry.puts.iter().filter_map(|c| c.to_quote(OptionType::Put)) {
        chain.add_quote(quote);
    }

    if chain.is_empty() {
        return Err(SourceError::EmptyOptionsChain {
            symbol: symbol.to_string(),
        });
    }

    Ok((chain, underlying_price))
}

/// Percent-encode the characters index and futures symbols carry.
fn encode_symbol(symbol: &str) -> String {
    symbol.replace('^', "%5E").replace('=', "%3D")
}

/// Yahoo Finance backed market data source.
pub struct YahooClient {
    client: Client,
    base_url: String,
    symbols: SymbolConfig,
    news: NewsConfig,
}

impl YahooClient {
    /// Create a client with the configured timeout and user agent.
    pub fn new(config: &DashboardConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .user_agent(config.http.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.http.quote_base_url.trim_end_matches('/').to_string(),
            symbols: config.symbols.clone(),
            news: config.news.clone(),
        })
    }

    async fn get_text(&self, url: &str, params: &[(&str, &str)]) -> Result<String, SourceError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    /// Latest daily close for `symbol`.
    pub async fn latest_close(&self, symbol: &str) -> Result<DailyClose, SourceError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, encode_symbol(symbol));
        let body = self
            .get_text(&url, &[("range", CHART_RANGE), ("interval", "1d")])
            .await?;
        let close = parse_latest_close(symbol, &body)?;
        debug!("{} close {} ({:?})", symbol, close.close, close.date);
        Ok(close)
    }

    /// Latest close as a `Decimal`.
    async fn latest_price(&self, symbol: &str) -> Result<Decimal, SourceError> {
        let close = self.latest_close(symbol).await?;
        close.close_decimal().ok_or_else(|| {
            SourceError::InvalidResponse(format!("{} close {} is not a price", symbol, close.close))
        })
    }

    /// Nearest-expiry options chain for `symbol`.
    pub async fn options_chain(
        &self,
        symbol: &str,
    ) -> Result<(OptionsChain, Option<Decimal>), SourceError> {
        let url = format!("{}/v7/finance/options/{}", self.base_url, encode_symbol(symbol));
        let body = self.get_text(&url, &[]).await?;
        parse_options_chain(symbol, &body)
    }

    async fn fetch_news_page(&self) -> Result<String, NewsError> {
        let response = self
            .client
            .get(&self.news.url)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl MarketDataSource for YahooClient {
    async fn fetch_rate_spreads(&self) -> Result<RateSpreads, SourceError> {
        let short = self.latest_close(&self.symbols.short_yield).await?;
        let mid = self.latest_close(&self.symbols.mid_yield).await?;
        let long = self.latest_close(&self.symbols.long_yield).await?;
        Ok(RateSpreads::from_yields(short.close, mid.close, long.close))
    }

    async fn fetch_vol_structure(&self) -> Result<VolStructure, SourceError> {
        let vix = self.latest_close(&self.symbols.vix).await?;
        let vix9d = self.latest_close(&self.symbols.vix9d).await?;
        Ok(VolStructure {
            vix: vix.close,
            vix9d: vix9d.close,
        })
    }

    async fn fetch_expected_move(&self) -> Result<ExpectedMove, SourceError> {
        let symbol = &self.symbols.options_underlying;
        let (chain, quoted_price) = self.options_chain(symbol).await?;

        let underlying_price = match quoted_price {
            Some(price) => price,
            None => self.latest_price(symbol).await?,
        };
        debug!(
            "{} chain {:?}: {} calls, {} puts, underlying {}",
            symbol,
            chain.expiration,
            chain.calls.len(),
            chain.puts.len(),
            underlying_price
        );

        ExpectedMove::from_chain(symbol, &chain, underlying_price)
    }

    async fn fetch_futures_basis(&self) -> Result<Decimal, SourceError> {
        let future = self.latest_price(&self.symbols.future).await?;
        let cash = self.latest_price(&self.symbols.cash_index).await?;
        Ok(future - cash)
    }

    async fn fetch_headlines(&self, keywords: &[String]) -> Vec<Headline> {
        let page = match self.fetch_news_page().await {
            Ok(page) => page,
            Err(e) => {
                warn!("Headlines unavailable: {}", e);
                return Vec::new();
            }
        };

        match extract_headlines(&page, &self.news.selector) {
            Ok(headlines) => filter_headlines(headlines, keywords),
            Err(e) => {
                warn!("Headlines unavailable: {}", e);
                Vec::new()
            }
        }
    }
}
