//! Metric table rows

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::format::{format_bounded, format_full_decimal};
use crate::metrics::{AggregatedMetrics, MetricKey, MetricValue};

pub const NO_DESCRIPTION: &str = "No description available";

lazy_static! {
    // Raw per-iteration entries, e.g. `opt_time_3` or `unopt_result_12`
    static ref PER_ITERATION_KEY: Regex =
        Regex::new(r"^(opt|unopt)_(time|result)_\d+$").unwrap();
}

/// One displayed metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricRow {
    pub metric: String,
    pub value: String,
    pub description: String,
}

/// A result value spelled out in full for digit-by-digit comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceValue {
    pub label: &'static str,
    pub value: String,
}

/// Flatten aggregated metrics into display rows.
///
/// Rows follow the record's iteration order. Raw per-iteration keys are left
/// out; everything else, including keys without a known description, is
/// kept. Numbers use the bounded display form.
pub fn tableize(metrics: &AggregatedMetrics) -> Vec<MetricRow> {
    metrics
        .record()
        .iter()
        .filter(|(key, _)| !PER_ITERATION_KEY.is_match(key))
        .map(|(key, value)| MetricRow {
            metric: key.to_string(),
            value: display_value(value),
            description: MetricKey::from_key(key)
                .map(|known| known.description())
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
        })
        .collect()
}

/// The run's result values at full precision, where present.
pub fn reference_values(metrics: &AggregatedMetrics) -> Vec<ReferenceValue> {
    [
        ("MPFR", MetricKey::MpfrValue),
        ("Unoptimized", MetricKey::UnoptValue),
        ("Optimized", MetricKey::OptValue),
        ("Optimized (mean)", MetricKey::OptMeanResult),
    ]
    .into_iter()
    .filter_map(|(label, key)| {
        metrics.record().number(key).map(|value| ReferenceValue {
            label,
            value: format_full_decimal(value),
        })
    })
    .collect()
}

fn display_value(value: &MetricValue) -> String {
    match value {
        MetricValue::Number(number) => format_bounded(*number),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{aggregate, parse_metrics_csv};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tableize_formats_and_describes() {
        let base = parse_metrics_csv(
            "metric,value,description\n\
             opt_time,0.00005,x\n\
             include_negatives,true,x\n\
             float_type,double,x\n\
             custom_metric,12,x\n",
        );
        let rows = tableize(&aggregate(&base, None, None, None));

        assert_eq!(
            rows,
            vec![
                MetricRow {
                    metric: "float_type".to_string(),
                    value: "double".to_string(),
                    description: "Type of floating point values".to_string(),
                },
                MetricRow {
                    metric: "include_negatives".to_string(),
                    value: "true".to_string(),
                    description: "Whether negative values were included".to_string(),
                },
                MetricRow {
                    metric: "opt_time".to_string(),
                    value: "5.0000e-5".to_string(),
                    description: "Optimized execution time (seconds)".to_string(),
                },
                MetricRow {
                    metric: "custom_metric".to_string(),
                    value: "12.0000".to_string(),
                    description: NO_DESCRIPTION.to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_tableize_drops_per_iteration_keys() {
        let base = parse_metrics_csv(
            "metric,value\n\
             opt_time_0,1\n\
             unopt_result_17,2\n\
             opt_time_total,3\n",
        );
        let rows = tableize(&aggregate(&base, None, None, None));

        let names: Vec<&str> = rows.iter().map(|row| row.metric.as_str()).collect();
        assert_eq!(names, vec!["opt_time_total"]);
    }

    #[test]
    fn test_tableize_includes_aggregated_keys() {
        let base = parse_metrics_csv("metric,value\nopt_time,1\n");
        let rows = tableize(&aggregate(&base, Some("i,t\n0,2\n1,4\n"), None, None));

        let mean = rows
            .iter()
            .find(|row| row.metric == "opt_mean_time")
            .unwrap();
        assert_eq!(mean.value, "3.0000");
    }

    #[test]
    fn test_reference_values_full_precision() {
        let base = parse_metrics_csv(
            "metric,value\n\
             mpfr_value,0.30000000000000004\n\
             opt_value,1.23e-7\n",
        );
        let values = reference_values(&aggregate(&base, None, None, None));

        assert_eq!(
            values,
            vec![
                ReferenceValue {
                    label: "MPFR",
                    value: "0.30000000000000004".to_string(),
                },
                ReferenceValue {
                    label: "Optimized",
                    value: "0.000000123".to_string(),
                },
            ]
        );
    }
}
