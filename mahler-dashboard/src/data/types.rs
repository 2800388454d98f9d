//! Core data types for the dashboard feeds.
//!
//! Prices, strikes and premiums are carried as `Decimal`; yields and
//! volatility index levels stay `f64` since they are quoted rates.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

/// Last traded quote for one option contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Strike price
    pub strike: Decimal,

    /// Option type (call or put)
    pub option_type: OptionType,

    /// Last traded premium
    pub last_price: Decimal,
}

/// All options for a single expiration date.
#[derive(Debug, Clone, Default)]
pub struct OptionsChain {
    /// Expiration date for this chain
    pub expiration: Option<NaiveDate>,

    /// Call options
    pub calls: Vec<OptionQuote>,

    /// Put options
    pub puts: Vec<OptionQuote>,
}

impl OptionsChain {
    /// Create a new empty chain.
    pub fn new(expiration: Option<NaiveDate>) -> Self {
        Self {
            expiration,
            calls: Vec::new(),
            puts: Vec::new(),
        }
    }

    /// Add a quote to the appropriate side.
    pub fn add_quote(&mut self, quote: OptionQuote) {
        match quote.option_type {
            OptionType::Call => self.calls.push(quote),
            OptionType::Put => self.puts.push(quote),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.puts.is_empty()
    }

    /// Call strikes in ascending order.
    pub fn call_strikes(&self) -> Vec<Decimal> {
        let mut strikes: Vec<_> = self.calls.iter().map(|q| q.strike).collect();
        strikes.sort();
        strikes.dedup();
        strikes
    }

    /// Find a call at a specific strike.
    pub fn call_at_strike(&self, strike: Decimal) -> Option<&OptionQuote> {
        self.calls.iter().find(|q| q.strike == strike)
    }

    /// Find a put at a specific strike.
    pub fn put_at_strike(&self, strike: Decimal) -> Option<&OptionQuote> {
        self.puts.iter().find(|q| q.strike == strike)
    }

    /// Call strike closest to `price`.
    ///
    /// Strikes are scanned in ascending order and only a strictly closer
    /// strike replaces the current pick, so an exact tie resolves to the
    /// lower strike.
    pub fn nearest_strike(&self, price: Decimal) -> Option<Decimal> {
        let mut best: Option<(Decimal, Decimal)> = None;
        for strike in self.call_strikes() {
            let distance = (strike - price).abs();
            match best {
                Some((_, d)) if distance >= d => {}
                _ => best = Some((strike, distance)),
            }
        }
        best.map(|(strike, _)| strike)
    }
}

/// Most recent daily close of a quoted symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyClose {
    /// Session date of the close, if the feed reported one
    pub date: Option<NaiveDate>,
    pub close: f64,
}

impl DailyClose {
    /// Close as a `Decimal`, for price arithmetic.
    pub fn close_decimal(&self) -> Option<Decimal> {
        Decimal::try_from(self.close).ok()
    }
}

/// A news headline, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headline {
    pub text: String,
}

impl Headline {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Whether the headline contains any of `keywords` (case-sensitive
    /// substring). An empty keyword is a substring of every headline.
    pub fn matches_any(&self, keywords: &[String]) -> bool {
        keywords.iter().any(|k| self.text.contains(k.as_str()))
    }
}
