//! Market risk regime scoring.
//!
//! Combines the snapshot's yield curve, volatility term structure,
//! expected move and futures basis into one risk-on/risk-off call:
//! - Risk-On: composite score > 0
//! - Risk-Off: composite score <= 0

pub mod scorer;

pub use scorer::{
    RiskAssessment, RiskClassification, RiskScorer, Signal, SignalReading, SignalVote,
};
