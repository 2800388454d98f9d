//! Report sinks.
//!
//! A `DashboardReport` is the finished run: snapshot readings, the risk
//! assessment and filtered headlines. Sinks render it:
//! - Console transcript
//! - Static HTML file, named by run date
//! - Pretty JSON

pub mod console;
pub mod html;
pub mod json;

use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::Headline;
use crate::regime::{RiskAssessment, RiskClassification, SignalReading};
use crate::snapshot::{MarketSnapshot, SnapshotField};

pub use console::{render_console, ConsoleSink};
pub use html::{render_html, report_file_name, HtmlSink};
pub use json::JsonSink;

/// Placeholder for a reading that could not be fetched.
pub const UNAVAILABLE: &str = "unavailable";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to format report: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("Failed to render HTML report: {0}")]
    Template(#[from] askama::Error),
}

/// Everything a sink needs to render one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub as_of: NaiveDate,
    pub rate_spread_2s5s: Option<f64>,
    pub rate_spread_2s10s: Option<f64>,
    pub vix: Option<f64>,
    pub vix9d: Option<f64>,
    pub vol_term_structure: Option<f64>,
    pub expected_move: Option<Decimal>,
    pub atm_strike: Option<Decimal>,
    pub futures_basis: Option<Decimal>,
    pub field_errors: Vec<SnapshotField>,
    pub score: i32,
    pub classification: RiskClassification,
    pub signals: Vec<SignalReading>,
    pub headlines: Vec<Headline>,
}

impl DashboardReport {
    pub fn new(
        snapshot: &MarketSnapshot,
        assessment: &RiskAssessment,
        headlines: Vec<Headline>,
    ) -> Self {
        Self {
            as_of: snapshot.as_of(),
            rate_spread_2s5s: snapshot.rate_spread_2s5s(),
            rate_spread_2s10s: snapshot.rate_spread_2s10s(),
            vix: snapshot.vix(),
            vix9d: snapshot.vix9d(),
            vol_term_structure: snapshot.vol_term_structure(),
            expected_move: snapshot.expected_move(),
            atm_strike: snapshot.atm_strike(),
            futures_basis: snapshot.futures_basis(),
            field_errors: snapshot.field_errors().iter().copied().collect(),
            score: assessment.score,
            classification: assessment.classification,
            signals: assessment.signals.clone(),
            headlines,
        }
    }
}

/// Something that consumes a finished report.
pub trait ReportSink {
    fn emit(&self, report: &DashboardReport) -> Result<(), ReportError>;
}

/// Two-decimal reading with an optional suffix.
pub(crate) fn fmt_reading<T: std::fmt::Display>(value: Option<T>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{:.2}{}", v, suffix),
        None => UNAVAILABLE.to_string(),
    }
}

/// Currency reading, `$x.xx`.
pub(crate) fn fmt_currency(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("${:.2}", v),
        None => UNAVAILABLE.to_string(),
    }
}
