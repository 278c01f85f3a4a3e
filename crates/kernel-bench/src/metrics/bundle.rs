//! Picking a run's metric reports out of an output listing.

use tracing::{debug, info};

use super::aggregate::{aggregate, AggregatedMetrics};
use super::record::parse_metrics_csv;
use crate::config::MetricsFileNames;

/// The metric reports of one benchmark run, borrowed from a file listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsBundle<'a> {
    pub metrics: Option<&'a str>,
    pub opt_timings: Option<&'a str>,
    pub unopt_timings: Option<&'a str>,
    pub opt_results: Option<&'a str>,
}

impl<'a> MetricsBundle<'a> {
    /// Match `(path, content)` pairs against the configured report names.
    ///
    /// A path matches when it ends with the report name, so prefixed outputs
    /// such as `sum_metrics.csv` are found too. The first match wins.
    pub fn from_files<I>(files: I, names: &MetricsFileNames) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut bundle = Self::default();
        for (path, content) in files {
            let slot = if path.ends_with(names.metrics.as_str()) {
                &mut bundle.metrics
            } else if path.ends_with(names.opt_timings.as_str()) {
                &mut bundle.opt_timings
            } else if path.ends_with(names.unopt_timings.as_str()) {
                &mut bundle.unopt_timings
            } else if path.ends_with(names.opt_results.as_str()) {
                &mut bundle.opt_results
            } else {
                continue;
            };
            if slot.is_none() {
                debug!(path, "Matched metrics report");
                *slot = Some(content);
            }
        }
        bundle
    }

    /// Parse and aggregate the bundle.
    ///
    /// Returns `None` when the run has no summary report.
    pub fn aggregate(&self) -> Option<AggregatedMetrics> {
        let Some(metrics) = self.metrics else {
            info!("No summary metrics report found; skipping aggregation");
            return None;
        };
        let base = parse_metrics_csv(metrics);
        Some(aggregate(
            &base,
            self.opt_timings,
            self.unopt_timings,
            self.opt_results,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricKey;

    #[test]
    fn test_matches_reports_by_suffix() {
        let files = vec![
            ("out/driver_compare.c", "int main() {}"),
            ("out/sum_metrics_unopt_timings.csv", "i,t\n0,2.0\n"),
            ("out/sum_metrics.csv", "metric,value\nopt_time,1.0\n"),
            ("out/sum_metrics_opt_timings.csv", "i,t\n0,1.0\n"),
        ];
        let bundle = MetricsBundle::from_files(files, &MetricsFileNames::default());

        assert_eq!(bundle.metrics, Some("metric,value\nopt_time,1.0\n"));
        assert_eq!(bundle.opt_timings, Some("i,t\n0,1.0\n"));
        assert_eq!(bundle.unopt_timings, Some("i,t\n0,2.0\n"));
        assert_eq!(bundle.opt_results, None);

        let metrics = bundle.aggregate().unwrap();
        assert_eq!(metrics.record().number(MetricKey::UnoptMeanTime), Some(2.0));
        assert_eq!(metrics.record().number(MetricKey::OptTime), Some(1.0));
    }

    #[test]
    fn test_first_match_wins() {
        let files = vec![
            ("a/metrics.csv", "metric,value\nopt_time,1\n"),
            ("b/metrics.csv", "metric,value\nopt_time,2\n"),
        ];
        let bundle = MetricsBundle::from_files(files, &MetricsFileNames::default());
        assert_eq!(bundle.metrics, Some("metric,value\nopt_time,1\n"));
    }

    #[test]
    fn test_no_summary_means_no_aggregation() {
        let files = vec![("metrics_opt_timings.csv", "i,t\n0,1.0\n")];
        let bundle = MetricsBundle::from_files(files, &MetricsFileNames::default());

        assert!(bundle.opt_timings.is_some());
        assert!(bundle.aggregate().is_none());
    }
}
