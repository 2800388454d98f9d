//! Composite risk-on/risk-off scorer.
//!
//! Four independent signals each vote +1, -1 or abstain:
//! - Yield curve: 2s10s spread positive -> +1
//! - Vol term structure: VIX9D - VIX positive -> +1
//! - Expected move: ATM straddle below threshold -> +1
//! - Futures basis: future above cash -> +1
//!
//! A signal abstains when its snapshot field is missing. The score is the
//! plain sum; anything above zero is risk-on.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::snapshot::{MarketSnapshot, SnapshotField};

/// Risk classification of a scored snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskClassification {
    RiskOn,
    RiskOff,
}

impl RiskClassification {
    /// Classification for a composite score.
    ///
    /// A score of exactly zero is risk-off.
    pub fn from_score(score: i32) -> Self {
        if score > 0 {
            Self::RiskOn
        } else {
            Self::RiskOff
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::RiskOn => "Risk-On",
            Self::RiskOff => "Risk-Off",
        }
    }
}

impl fmt::Display for RiskClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scored sub-signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    YieldCurve,
    VolTermStructure,
    ExpectedMove,
    FuturesBasis,
}

impl Signal {
    pub const ALL: [Self; 4] = [
        Self::YieldCurve,
        Self::VolTermStructure,
        Self::ExpectedMove,
        Self::FuturesBasis,
    ];

    /// Snapshot field the signal reads.
    pub fn field(&self) -> SnapshotField {
        match self {
            Self::YieldCurve => SnapshotField::RateSpread2s10s,
            Self::VolTermStructure => SnapshotField::VolTermStructure,
            Self::ExpectedMove => SnapshotField::ExpectedMove,
            Self::FuturesBasis => SnapshotField::FuturesBasis,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::YieldCurve => "Yield curve (2s10s)",
            Self::VolTermStructure => "VIX term structure",
            Self::ExpectedMove => "Expected move",
            Self::FuturesBasis => "ES futures basis",
        }
    }
}

/// One signal's contribution to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalVote {
    RiskOn,
    RiskOff,
    /// Input missing; contributes nothing.
    Abstain,
}

impl SignalVote {
    fn from_condition(risk_on: bool) -> Self {
        if risk_on {
            Self::RiskOn
        } else {
            Self::RiskOff
        }
    }

    pub fn points(&self) -> i32 {
        match self {
            Self::RiskOn => 1,
            Self::RiskOff => -1,
            Self::Abstain => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalReading {
    pub signal: Signal,
    pub vote: SignalVote,
}

/// Scored snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Sum of signal votes, in [-4, 4].
    pub score: i32,
    pub classification: RiskClassification,
    /// Per-signal votes in `Signal::ALL` order.
    pub signals: Vec<SignalReading>,
}

impl RiskAssessment {
    fn from_readings(signals: Vec<SignalReading>) -> Self {
        let score = signals.iter().map(|r| r.vote.points()).sum();
        Self {
            score,
            classification: RiskClassification::from_score(score),
            signals,
        }
    }

    /// Vote cast by `signal`.
    pub fn vote(&self, signal: Signal) -> SignalVote {
        self.signals
            .iter()
            .find(|r| r.signal == signal)
            .map(|r| r.vote)
            .unwrap_or(SignalVote::Abstain)
    }

    /// Number of signals that voted.
    pub fn evaluated(&self) -> usize {
        self.signals
            .iter()
            .filter(|r| r.vote != SignalVote::Abstain)
            .count()
    }
}

/// Stateless composite scorer.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    config: ScoringConfig,
}

impl RiskScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score a snapshot.
    pub fn score(&self, snapshot: &MarketSnapshot) -> RiskAssessment {
        let signals = Signal::ALL
            .iter()
            .map(|&signal| SignalReading {
                signal,
                vote: self.vote(signal, snapshot),
            })
            .collect();

        RiskAssessment::from_readings(signals)
    }

    fn vote(&self, signal: Signal, snapshot: &MarketSnapshot) -> SignalVote {
        if snapshot.is_missing(signal.field()) {
            return SignalVote::Abstain;
        }

        let risk_on = match signal {
            Signal::YieldCurve => snapshot.rate_spread_2s10s().map(|s| s > 0.0),
            Signal::VolTermStructure => snapshot.vol_term_structure().map(|t| t > 0.0),
            Signal::ExpectedMove => snapshot
                .expected_move()
                .map(|m| m < self.config.expected_move_threshold),
            Signal::FuturesBasis => snapshot.futures_basis().map(|b| b > Decimal::ZERO),
        };

        risk_on
            .map(SignalVote::from_condition)
            .unwrap_or(SignalVote::Abstain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ExpectedMove, RateSpreads, VolStructure};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    fn rates(spread_2s10s: f64) -> Option<RateSpreads> {
        Some(RateSpreads {
            spread_2s5s: 0.0,
            spread_2s10s,
        })
    }

    fn vol(term_structure: f64) -> Option<VolStructure> {
        Some(VolStructure {
            vix: 15.0,
            vix9d: 15.0 + term_structure,
        })
    }

    fn em(expected_move: Decimal) -> Option<ExpectedMove> {
        Some(ExpectedMove {
            expected_move,
            atm_strike: dec!(450),
        })
    }

    #[test]
    fn test_scenario_all_risk_on() {
        let snapshot =
            MarketSnapshot::from_parts(date(), rates(0.15), vol(0.8), em(dec!(4.20)), Some(dec!(1.5)));
        let assessment = RiskScorer::default().score(&snapshot);

        assert_eq!(assessment.score, 4);
        assert_eq!(assessment.classification, RiskClassification::RiskOn);
        assert_eq!(assessment.evaluated(), 4);
    }

    #[test]
    fn test_scenario_all_risk_off() {
        let snapshot =
            MarketSnapshot::from_parts(date(), rates(-0.40), vol(-1.1), em(dec!(7.0)), Some(dec!(-0.3)));
        let assessment = RiskScorer::default().score(&snapshot);

        assert_eq!(assessment.score, -4);
        assert_eq!(assessment.classification, RiskClassification::RiskOff);
    }

    #[test]
    fn test_scenario_options_missing() {
        let snapshot = MarketSnapshot::from_parts(date(), rates(0.15), vol(0.8), None, Some(dec!(1.5)));
        let assessment = RiskScorer::default().score(&snapshot);

        assert_eq!(assessment.score, 3);
        assert_eq!(assessment.classification, RiskClassification::RiskOn);
        assert_eq!(assessment.vote(Signal::ExpectedMove), SignalVote::Abstain);
        assert_eq!(assessment.evaluated(), 3);
    }

    #[test]
    fn test_scenario_everything_missing() {
        let assessment = RiskScorer::default().score(&MarketSnapshot::unavailable(date()));

        assert_eq!(assessment.score, 0);
        assert_eq!(assessment.classification, RiskClassification::RiskOff);
        assert_eq!(assessment.evaluated(), 0);
    }

    #[test]
    fn test_boundaries_are_risk_off() {
        // Zero spreads and a move exactly at threshold all vote risk-off
        let snapshot =
            MarketSnapshot::from_parts(date(), rates(0.0), vol(0.0), em(dec!(5)), Some(Decimal::ZERO));
        let assessment = RiskScorer::default().score(&snapshot);

        for signal in Signal::ALL {
            assert_eq!(assessment.vote(signal), SignalVote::RiskOff, "{:?}", signal);
        }
        assert_eq!(assessment.score, -4);
    }

    #[test]
    fn test_zero_score_is_risk_off() {
        let snapshot =
            MarketSnapshot::from_parts(date(), rates(0.15), vol(-0.5), None, None);
        let assessment = RiskScorer::default().score(&snapshot);

        assert_eq!(assessment.score, 0);
        assert_eq!(assessment.classification, RiskClassification::RiskOff);
    }

    #[test]
    fn test_configured_threshold() {
        let scorer = RiskScorer::new(ScoringConfig {
            expected_move_threshold: dec!(8),
        });
        let snapshot = MarketSnapshot::from_parts(date(), None, None, em(dec!(7.0)), None);

        assert_eq!(scorer.score(&snapshot).vote(Signal::ExpectedMove), SignalVote::RiskOn);
    }

    #[test]
    fn test_score_is_idempotent_and_bounded() {
        let scorer = RiskScorer::default();
        let spreads = [-0.4, 0.0, 0.15];
        let moves = [dec!(3), dec!(5), dec!(9)];

        for &s in &spreads {
            for &m in &moves {
                for basis in [None, Some(dec!(-1)), Some(dec!(2))] {
                    let snapshot = MarketSnapshot::from_parts(date(), rates(s), vol(s), em(m), basis);
                    let first = scorer.score(&snapshot);
                    let second = scorer.score(&snapshot);

                    assert_eq!(first, second);
                    assert!((-4..=4).contains(&first.score));
                    assert_eq!(first.signals.len(), 4);
                    assert_eq!(
                        first.classification == RiskClassification::RiskOn,
                        first.score > 0
                    );
                }
            }
        }
    }

    #[test]
    fn test_classification_labels() {
        assert_eq!(RiskClassification::from_score(1).label(), "Risk-On");
        assert_eq!(RiskClassification::from_score(0).to_string(), "Risk-Off");
        assert_eq!(RiskClassification::from_score(-3), RiskClassification::RiskOff);
    }
}
