//! JSON reporter for benchmark reports

use super::MetricsReport;
use anyhow::Result;

/// JSON format reporter
pub struct JsonReporter;

impl JsonReporter {
    /// Format a benchmark report as JSON
    ///
    /// # Arguments
    ///
    /// * `report` - The report to format
    /// * `pretty` - Whether to pretty-print the JSON
    pub fn format(report: &MetricsReport, pretty: bool) -> Result<String> {
        let output = if pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::test_support::sample_report;
    use serde_json::Value;

    #[test]
    fn test_json_format_compact() {
        let output = JsonReporter::format(&sample_report(), false).unwrap();

        // Compact JSON should not have newlines
        assert!(!output.contains('\n'));
        assert!(output.contains("\"label\":\"Optimized\""));
    }

    #[test]
    fn test_json_format_pretty() {
        let output = JsonReporter::format(&sample_report(), true).unwrap();

        assert!(output.contains('\n'));
        assert!(output.contains("  "));
    }

    #[test]
    fn test_json_structure() {
        let json = JsonReporter::format(&sample_report(), false).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["performance"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["opt_iteration_timings"][1]["value"], 0.3);
        assert_eq!(parsed["result_stability"]["consistent"], true);
        assert_eq!(
            parsed["distribution"]["histogram"]["buckets"]
                .as_array()
                .unwrap()
                .len(),
            20
        );

        let dimension = parsed["table"]
            .as_array()
            .unwrap()
            .iter()
            .find(|row| row["metric"] == "dimension")
            .unwrap();
        assert_eq!(dimension["value"], "1024.0000");
        assert_eq!(dimension["description"], "Array dimension size");
    }
}
