//! Market snapshot assembly.
//!
//! Runs each quote family once, in a fixed order:
//! 1. Yield curve spreads
//! 2. Volatility term structure
//! 3. Expected move (ATM straddle)
//! 4. Futures basis
//!
//! A failing family leaves its fields missing and the run continues.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::data::{ExpectedMove, MarketDataSource, RateSpreads, SourceError, VolStructure};

/// Snapshot fields that can be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotField {
    #[serde(rename = "rate_spread_2s5s")]
    RateSpread2s5s,
    #[serde(rename = "rate_spread_2s10s")]
    RateSpread2s10s,
    Vix,
    Vix9d,
    VolTermStructure,
    ExpectedMove,
    AtmStrike,
    FuturesBasis,
}

impl SnapshotField {
    pub const RATE_SPREADS: [Self; 2] = [Self::RateSpread2s5s, Self::RateSpread2s10s];
    pub const VOL_STRUCTURE: [Self; 3] = [Self::Vix, Self::Vix9d, Self::VolTermStructure];
    pub const EXPECTED_MOVE: [Self; 2] = [Self::ExpectedMove, Self::AtmStrike];
    pub const FUTURES_BASIS: [Self; 1] = [Self::FuturesBasis];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RateSpread2s5s => "rate_spread_2s5s",
            Self::RateSpread2s10s => "rate_spread_2s10s",
            Self::Vix => "vix",
            Self::Vix9d => "vix9d",
            Self::VolTermStructure => "vol_term_structure",
            Self::ExpectedMove => "expected_move",
            Self::AtmStrike => "atm_strike",
            Self::FuturesBasis => "futures_basis",
        }
    }
}

impl fmt::Display for SnapshotField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of every indicator for one run.
///
/// Built once and read-only afterwards. A missing reading is `None` and
/// its field is listed in `field_errors`.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    as_of: NaiveDate,
    rates: Option<RateSpreads>,
    vol: Option<VolStructure>,
    expected_move: Option<ExpectedMove>,
    futures_basis: Option<Decimal>,
    field_errors: BTreeSet<SnapshotField>,
}

impl MarketSnapshot {
    /// Assemble a snapshot from per-family results.
    ///
    /// `field_errors` is derived from whichever families are `None`.
    pub fn from_parts(
        as_of: NaiveDate,
        rates: Option<RateSpreads>,
        vol: Option<VolStructure>,
        expected_move: Option<ExpectedMove>,
        futures_basis: Option<Decimal>,
    ) -> Self {
        let mut field_errors = BTreeSet::new();
        if rates.is_none() {
            field_errors.extend(SnapshotField::RATE_SPREADS);
        }
        if vol.is_none() {
            field_errors.extend(SnapshotField::VOL_STRUCTURE);
        }
        if expected_move.is_none() {
            field_errors.extend(SnapshotField::EXPECTED_MOVE);
        }
        if futures_basis.is_none() {
            field_errors.extend(SnapshotField::FUTURES_BASIS);
        }

        Self {
            as_of,
            rates,
            vol,
            expected_move,
            futures_basis,
            field_errors,
        }
    }

    /// Snapshot with every field missing.
    pub fn unavailable(as_of: NaiveDate) -> Self {
        Self::from_parts(as_of, None, None, None, None)
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn rate_spread_2s5s(&self) -> Option<f64> {
        self.rates.map(|r| r.spread_2s5s)
    }

    pub fn rate_spread_2s10s(&self) -> Option<f64> {
        self.rates.map(|r| r.spread_2s10s)
    }

    pub fn vix(&self) -> Option<f64> {
        self.vol.map(|v| v.vix)
    }

    pub fn vix9d(&self) -> Option<f64> {
        self.vol.map(|v| v.vix9d)
    }

    /// `vix9d - vix`; missing unless both legs are present.
    pub fn vol_term_structure(&self) -> Option<f64> {
        self.vol.map(|v| v.term_structure())
    }

    pub fn expected_move(&self) -> Option<Decimal> {
        self.expected_move.map(|e| e.expected_move)
    }

    pub fn atm_strike(&self) -> Option<Decimal> {
        self.expected_move.map(|e| e.atm_strike)
    }

    pub fn futures_basis(&self) -> Option<Decimal> {
        self.futures_basis
    }

    pub fn field_errors(&self) -> &BTreeSet<SnapshotField> {
        &self.field_errors
    }

    pub fn is_missing(&self, field: SnapshotField) -> bool {
        self.field_errors.contains(&field)
    }

    /// Whether every indicator was fetched.
    pub fn is_complete(&self) -> bool {
        self.field_errors.is_empty()
    }
}

/// Builds a `MarketSnapshot` from a market data source.
pub struct SnapshotBuilder<S> {
    source: S,
}

impl<S: MarketDataSource> SnapshotBuilder<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Underlying data source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch every family and assemble the snapshot. Never fails.
    pub async fn build(&self, today: NaiveDate) -> MarketSnapshot {
        let rates = absorb("rate spreads", self.source.fetch_rate_spreads().await);
        let vol = absorb("vol structure", self.source.fetch_vol_structure().await);
        let expected_move = absorb("expected move", self.source.fetch_expected_move().await);
        let futures_basis = absorb("futures basis", self.source.fetch_futures_basis().await);

        let snapshot = MarketSnapshot::from_parts(today, rates, vol, expected_move, futures_basis);

        if snapshot.is_complete() {
            info!("Snapshot for {} complete", today);
        } else {
            info!(
                "Snapshot for {} missing {} field(s)",
                today,
                snapshot.field_errors().len()
            );
        }

        snapshot
    }
}

/// Turn a family failure into a missing value.
fn absorb<T>(family: &str, result: Result<T, SourceError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{} unavailable: {}", family, e);
            None
        }
    }
}
