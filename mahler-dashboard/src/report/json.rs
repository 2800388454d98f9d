//! JSON report output.

use super::{DashboardReport, ReportError, ReportSink};

/// Prints the report as pretty JSON on stdout.
///
/// Missing readings serialize as `null`; `field_errors` names them.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSink;

impl JsonSink {
    pub fn render(report: &DashboardReport) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

impl ReportSink for JsonSink {
    fn emit(&self, report: &DashboardReport) -> Result<(), ReportError> {
        println!("{}", Self::render(report)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_json_missing_fields_are_null() {
        let text = JsonSink::render(&fixtures::options_missing_report()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["as_of"], "2024-06-03");
        assert!(value["expected_move"].is_null());
        assert!(value["atm_strike"].is_null());
        assert_eq!(value["score"], 3);
        assert_eq!(value["classification"], "RiskOn");
        assert_eq!(
            value["field_errors"],
            serde_json::json!(["expected_move", "atm_strike"])
        );
        assert_eq!(value["signals"][2]["vote"], "abstain");
    }

    #[test]
    fn test_json_headlines_are_plain_strings() {
        let text = JsonSink::render(&fixtures::full_report()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["headlines"][0], "Powell says Fed in no hurry");
        assert!(value["field_errors"].as_array().unwrap().is_empty());
    }
}
