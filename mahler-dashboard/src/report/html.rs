//! Static HTML report.

use std::fs;
use std::path::PathBuf;

use askama::Template;
use chrono::NaiveDate;
use tracing::info;

use super::{fmt_currency, fmt_reading, DashboardReport, ReportError, ReportSink, UNAVAILABLE};
use crate::data::Headline;
use crate::regime::{RiskClassification, SignalVote};

/// Report file name for a run date.
pub fn report_file_name(as_of: NaiveDate) -> String {
    format!("dashboard_report_{}.html", as_of.format("%Y-%m-%d"))
}

struct SignalLine {
    label: &'static str,
    vote: String,
}

#[derive(Template)]
#[template(path = "dashboard_report.html")]
struct DashboardPage<'a> {
    as_of: NaiveDate,
    spread_2s5s: String,
    spread_2s10s: String,
    vix: String,
    vix9d: String,
    vol_term_structure: String,
    expected_move: String,
    atm_strike: String,
    futures_basis: String,
    score: i32,
    classification: RiskClassification,
    signals: Vec<SignalLine>,
    headlines: &'a [Headline],
}

impl<'a> DashboardPage<'a> {
    fn new(report: &'a DashboardReport) -> Self {
        let signals = report
            .signals
            .iter()
            .map(|r| SignalLine {
                label: r.signal.label(),
                vote: match r.vote {
                    SignalVote::Abstain => "n/a".to_string(),
                    v => format!("{:+}", v.points()),
                },
            })
            .collect();

        Self {
            as_of: report.as_of,
            spread_2s5s: fmt_reading(report.rate_spread_2s5s, "%"),
            spread_2s10s: fmt_reading(report.rate_spread_2s10s, "%"),
            vix: fmt_reading(report.vix, ""),
            vix9d: fmt_reading(report.vix9d, ""),
            vol_term_structure: fmt_reading(report.vol_term_structure, ""),
            expected_move: fmt_currency(report.expected_move),
            atm_strike: report
                .atm_strike
                .map_or_else(|| UNAVAILABLE.to_string(), |s| s.to_string()),
            futures_basis: fmt_reading(report.futures_basis, ""),
            score: report.score,
            classification: report.classification,
            signals,
            headlines: &report.headlines,
        }
    }
}

/// Render the full HTML document. Headline text is escaped by the template.
pub fn render_html(report: &DashboardReport) -> Result<String, ReportError> {
    Ok(DashboardPage::new(report).render()?)
}

/// Writes the HTML report into a directory.
#[derive(Debug, Clone)]
pub struct HtmlSink {
    output_dir: PathBuf,
}

impl HtmlSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Path the report for `as_of` is written to.
    pub fn report_path(&self, as_of: NaiveDate) -> PathBuf {
        self.output_dir.join(report_file_name(as_of))
    }

    /// Write the report, returning its path.
    pub fn write(&self, report: &DashboardReport) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ReportError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let html = render_html(report)?;
        let path = self.report_path(report.as_of);
        fs::write(&path, html).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;

        info!("Wrote HTML report to {}", path.display());
        Ok(path)
    }
}

impl ReportSink for HtmlSink {
    fn emit(&self, report: &DashboardReport) -> Result<(), ReportError> {
        self.write(report).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_report_file_name() {
        assert_eq!(
            report_file_name(fixtures::date()),
            "dashboard_report_2024-06-03.html"
        );
    }

    #[test]
    fn test_html_sections_and_escaping() {
        let html = render_html(&fixtures::full_report()).unwrap();

        for heading in [
            "<h2>Macro Overview</h2>",
            "<h2>Volatility</h2>",
            "<h2>Market Position</h2>",
            "<h2>Risk Meter</h2>",
            "<h2>High Impact News</h2>",
        ] {
            assert!(html.contains(heading), "missing {}", heading);
        }
        assert!(html.contains("<title>Financial Dashboard Report - 2024-06-03</title>"));
        assert!(html.contains("<li>Expected Move (ATM Straddle): $4.20 (Strike: 450)</li>"));
        assert!(html.contains("<strong>Risk Score: 4</strong> (Risk-On)"));
        assert!(html.contains("<li>CPI &lt;hot&gt; &amp; sticky</li>"));
        assert!(!html.contains("<hot>"));
        assert!(html.contains("<li>Yield curve (2s10s): +1</li>"));
    }

    #[test]
    fn test_html_lists_each_headline_once_in_order() {
        let html = render_html(&fixtures::full_report()).unwrap();
        let first = html.find("Powell says Fed in no hurry").unwrap();
        let second = html.find("CPI &lt;hot&gt;").unwrap();
        assert!(first < second);
        assert_eq!(html.matches("Powell says Fed in no hurry").count(), 1);
    }

    #[test]
    fn test_html_marks_missing_fields() {
        let html = render_html(&fixtures::options_missing_report()).unwrap();
        assert!(html.contains("Expected Move (ATM Straddle): unavailable (Strike: unavailable)"));
        assert!(html.contains("<li>ES Futures Premium/Discount: 1.50</li>"));
    }

    #[test]
    fn test_sink_writes_dated_file() {
        let tmp = TempDir::new().unwrap();
        let sink = HtmlSink::new(tmp.path().join("reports"));
        let report = fixtures::full_report();

        let path = sink.write(&report).unwrap();
        assert_eq!(path, tmp.path().join("reports").join("dashboard_report_2024-06-03.html"));

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_html(&report).unwrap());
    }
}
