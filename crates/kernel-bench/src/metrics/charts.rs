//! Chart-ready views of aggregated metrics.
//!
//! Each builder reads an [`AggregatedMetrics`] and returns plain records for
//! the rendering layer. Missing metrics render as `0` bars or an absent
//! section, never as an error.

use serde::Serialize;

use super::aggregate::{AggregatedMetrics, Variant};
use super::record::{MetricKey, MetricsRecord};
use crate::config::AnalysisConfig;
use crate::stats::{compare_distributions, DistributionComparison};

const UNOPT_VS_REFERENCE: &str = "Unoptimized vs MPFR";
const OPT_VS_REFERENCE: &str = "Optimized vs MPFR";

/// One labelled bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: &'static str,
    pub value: f64,
}

/// One point of a per-iteration line or scatter chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IterationPoint {
    pub iteration: usize,
    pub value: f64,
}

/// Spread of the optimized kernel's results across iterations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultStability {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Every iteration produced the same result
    pub consistent: bool,
}

/// Execution time per variant, preferring multi-run means.
pub fn performance_chart(metrics: &AggregatedMetrics) -> Vec<ChartBar> {
    [Variant::Unoptimized, Variant::Optimized]
        .into_iter()
        .map(|variant| ChartBar {
            label: variant.label(),
            value: metrics.effective_time(variant).unwrap_or(0.0),
        })
        .collect()
}

/// ULP distance of each variant from the reference.
pub fn ulps_chart(metrics: &AggregatedMetrics) -> Vec<ChartBar> {
    let record = metrics.record();
    vec![
        ChartBar {
            label: UNOPT_VS_REFERENCE,
            value: first_number(record, &[MetricKey::UlpsUnoptMpfr]),
        },
        ChartBar {
            label: OPT_VS_REFERENCE,
            value: first_number(record, &[MetricKey::UlpsOptMpfr]),
        },
    ]
}

/// Relative error of each variant against the reference.
///
/// The dedicated error metric is preferred. When it is missing or exactly
/// zero the single-run relative difference is shown instead.
pub fn relative_error_chart(metrics: &AggregatedMetrics) -> Vec<ChartBar> {
    let record = metrics.record();
    vec![
        ChartBar {
            label: UNOPT_VS_REFERENCE,
            value: first_number(
                record,
                &[MetricKey::UnoptRelError, MetricKey::RelDiffUnoptMpfr],
            ),
        },
        ChartBar {
            label: OPT_VS_REFERENCE,
            value: first_number(
                record,
                &[MetricKey::OptMeanRelError, MetricKey::RelDiffOptMpfr],
            ),
        },
    ]
}

/// Absolute difference of each variant from the reference.
pub fn absolute_difference_chart(metrics: &AggregatedMetrics) -> Vec<ChartBar> {
    let record = metrics.record();
    vec![
        ChartBar {
            label: UNOPT_VS_REFERENCE,
            value: first_number(record, &[MetricKey::AbsDiffUnoptMpfr]),
        },
        ChartBar {
            label: OPT_VS_REFERENCE,
            value: first_number(record, &[MetricKey::AbsDiffOptMpfr]),
        },
    ]
}

/// Per-iteration timings for one variant, indexed by position.
pub fn iteration_timings(metrics: &AggregatedMetrics, variant: Variant) -> Vec<IterationPoint> {
    indexed(metrics.times(variant))
}

/// Per-iteration optimized results, indexed by position.
pub fn iteration_results(metrics: &AggregatedMetrics) -> Vec<IterationPoint> {
    indexed(metrics.opt_results())
}

/// Stability of the optimized results; `None` when no results were recorded.
pub fn result_stability(metrics: &AggregatedMetrics) -> Option<ResultStability> {
    metrics.opt_result_stats().map(|stats| ResultStability {
        count: stats.count,
        min: stats.min,
        max: stats.max,
        mean: stats.mean,
        consistent: stats.min == stats.max,
    })
}

/// Outlier-filtered timing distributions on a shared axis.
///
/// Series A is the optimized variant, series B the unoptimized one.
pub fn timing_distribution(
    metrics: &AggregatedMetrics,
    analysis: &AnalysisConfig,
) -> DistributionComparison {
    compare_distributions(
        metrics.opt_times(),
        metrics.unopt_times(),
        analysis.histogram_buckets,
        analysis.iqr_multiplier,
    )
}

/// First non-zero value among `keys`, or `0` when none is.
fn first_number(record: &MetricsRecord, keys: &[MetricKey]) -> f64 {
    keys.iter()
        .filter_map(|&key| record.number(key))
        .find(|&value| value != 0.0)
        .unwrap_or(0.0)
}

fn indexed(values: &[f64]) -> Vec<IterationPoint> {
    values
        .iter()
        .enumerate()
        .map(|(iteration, &value)| IterationPoint { iteration, value })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{aggregate, parse_metrics_csv};

    fn base() -> MetricsRecord {
        parse_metrics_csv(
            "metric,value\n\
             opt_time,0.5\n\
             unopt_time,2.0\n\
             ulps_opt_mpfr,3\n\
             rel_diff_unopt_mpfr,1e-9\n\
             rel_diff_opt_mpfr,2e-9\n\
             opt_mean_rel_error,5e-10\n\
             abs_diff_unopt_mpfr,1e-6\n",
        )
    }

    #[test]
    fn test_performance_chart_single_run_fallback() {
        let metrics = aggregate(&base(), None, None, None);
        let chart = performance_chart(&metrics);

        assert_eq!(
            chart[0],
            ChartBar {
                label: "Unoptimized",
                value: 2.0
            }
        );
        assert_eq!(
            chart[1],
            ChartBar {
                label: "Optimized",
                value: 0.5
            }
        );
    }

    #[test]
    fn test_performance_chart_prefers_means() {
        let metrics = aggregate(&base(), Some("i,t\n0,0.1\n"), Some("i,t\n0,0.9\n"), None);
        let chart = performance_chart(&metrics);

        assert_eq!(chart[0].value, 0.9);
        assert_eq!(chart[1].value, 0.1);
    }

    #[test]
    fn test_performance_chart_missing_times() {
        let metrics = aggregate(&MetricsRecord::new(), None, None, None);
        let chart = performance_chart(&metrics);
        assert!(chart.iter().all(|bar| bar.value == 0.0));
    }

    #[test]
    fn test_accuracy_charts_with_fallbacks() {
        let metrics = aggregate(&base(), None, None, None);

        let ulps = ulps_chart(&metrics);
        assert_eq!(ulps[0].value, 0.0);
        assert_eq!(ulps[1].value, 3.0);

        let rel = relative_error_chart(&metrics);
        assert_eq!(rel[0].value, 1e-9);
        assert_eq!(rel[1].value, 5e-10);

        let abs = absolute_difference_chart(&metrics);
        assert_eq!(abs[0].value, 1e-6);
        assert_eq!(abs[1].value, 0.0);
    }

    #[test]
    fn test_relative_error_zero_falls_back() {
        let record = parse_metrics_csv(
            "metric,value\n\
             unopt_rel_error,0\n\
             rel_diff_unopt_mpfr,1e-9\n\
             opt_mean_rel_error,0\n",
        );
        let rel = relative_error_chart(&aggregate(&record, None, None, None));

        assert_eq!(rel[0].value, 1e-9);
        assert_eq!(rel[1].value, 0.0);
    }

    #[test]
    fn test_iteration_points() {
        let timings = "i,t\n5,0.1\n9,0.2\n";
        let metrics = aggregate(&base(), Some(timings), None, Some("i,r\n0,1.0\n"));

        let opt = iteration_timings(&metrics, Variant::Optimized);
        assert_eq!(
            opt[1],
            IterationPoint {
                iteration: 1,
                value: 0.2
            }
        );
        assert!(iteration_timings(&metrics, Variant::Unoptimized).is_empty());
        assert_eq!(iteration_results(&metrics).len(), 1);
    }

    #[test]
    fn test_result_stability() {
        let consistent = aggregate(&base(), None, None, Some("i,r\n0,4.0\n1,4.0\n"));
        let stability = result_stability(&consistent).unwrap();
        assert!(stability.consistent);
        assert_eq!(stability.count, 2);

        let varying = aggregate(&base(), None, None, Some("i,r\n0,4.0\n1,5.0\n"));
        let stability = result_stability(&varying).unwrap();
        assert!(!stability.consistent);
        assert_eq!(stability.mean, 4.5);

        let single_run = aggregate(&base(), None, None, None);
        assert!(result_stability(&single_run).is_none());
    }

    #[test]
    fn test_timing_distribution_uses_config() {
        let metrics = aggregate(
            &base(),
            Some("i,t\n0,1.0\n1,2.0\n2,3.0\n3,4.0\n4,5.0\n5,100.0\n"),
            Some("i,t\n0,2.0\n1,3.0\n"),
            None,
        );
        let analysis = AnalysisConfig {
            histogram_buckets: 4,
            ..AnalysisConfig::default()
        };
        let cmp = timing_distribution(&metrics, &analysis);

        let hist = cmp.histogram.unwrap();
        assert_eq!(hist.buckets.len(), 4);
        assert_eq!(hist.total_a(), 5);
        assert_eq!(hist.total_b(), 2);
    }
}
