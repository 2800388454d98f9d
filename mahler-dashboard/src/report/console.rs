//! Console transcript.

use std::fmt::{self, Write};

use super::{fmt_currency, fmt_reading, DashboardReport, ReportError, ReportSink};
use crate::regime::SignalVote;

const SEPARATOR: &str = "==============================";

/// Render the console transcript.
pub fn render_console(report: &DashboardReport) -> Result<String, ReportError> {
    let mut out = String::new();
    write_transcript(&mut out, report)?;
    Ok(out)
}

fn write_transcript(out: &mut impl Write, report: &DashboardReport) -> fmt::Result {
    writeln!(out, "\nFINANCIAL DASHBOARD - {}", report.as_of)?;
    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out, "2s5s Spread: {}", fmt_reading(report.rate_spread_2s5s, "%"))?;
    writeln!(out, "2s10s Spread: {}", fmt_reading(report.rate_spread_2s10s, "%"))?;
    writeln!(out, "VIX: {}", fmt_reading(report.vix, ""))?;
    writeln!(out, "VIX9D: {}", fmt_reading(report.vix9d, ""))?;
    writeln!(
        out,
        "VIX Term Structure: {}",
        fmt_reading(report.vol_term_structure, "")
    )?;
    writeln!(
        out,
        "Expected Move (ATM Straddle): {}",
        fmt_currency(report.expected_move)
    )?;
    writeln!(
        out,
        "ES Futures Premium/Discount: {}",
        fmt_reading(report.futures_basis, "")
    )?;

    writeln!(out, "\nRisk Score: {} ({})", report.score, report.classification)?;
    for reading in &report.signals {
        let vote = match reading.vote {
            SignalVote::Abstain => "n/a".to_string(),
            v => format!("{:+}", v.points()),
        };
        writeln!(out, "  {}: {}", reading.signal.label(), vote)?;
    }

    writeln!(out, "\nHigh Impact News:")?;
    for headline in &report.headlines {
        writeln!(out, " - {}", headline.text)?;
    }

    Ok(())
}

/// Prints the transcript to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn emit(&self, report: &DashboardReport) -> Result<(), ReportError> {
        print!("{}", render_console(report)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;

    #[test]
    fn test_console_full_report() {
        let text = render_console(&fixtures::full_report()).unwrap();

        assert!(text.contains("FINANCIAL DASHBOARD - 2024-06-03"));
        assert!(text.contains("2s5s Spread: 0.10%"));
        assert!(text.contains("2s10s Spread: 0.15%"));
        assert!(text.contains("VIX: 14.20"));
        assert!(text.contains("VIX9D: 15.00"));
        assert!(text.contains("VIX Term Structure: 0.80"));
        assert!(text.contains("Expected Move (ATM Straddle): $4.20"));
        assert!(text.contains("ES Futures Premium/Discount: 1.50"));
        assert!(text.contains("Risk Score: 4 (Risk-On)"));
        assert!(text.contains("  Yield curve (2s10s): +1"));
        assert!(text.contains(" - Powell says Fed in no hurry"));
        assert!(!text.contains(super::super::UNAVAILABLE));
    }

    #[test]
    fn test_console_marks_missing_fields() {
        let text = render_console(&fixtures::options_missing_report()).unwrap();

        assert!(text.contains("Expected Move (ATM Straddle): unavailable"));
        assert!(text.contains("  Expected move: n/a"));
        assert!(text.contains("Risk Score: 3 (Risk-On)"));
        assert!(text.ends_with("High Impact News:\n"));
    }
}
