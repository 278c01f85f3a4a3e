//! Merging single-run metrics with multi-run series
//!
//! A benchmark run yields a single-run summary plus up to three per-iteration
//! series. [`aggregate`] folds the series statistics into a copy of the
//! summary. Multi-run statistics replace single-run values of the same key;
//! every series is independently optional.

use serde::Serialize;
use tracing::{debug, instrument};

use super::record::{MetricKey, MetricsRecord};
use super::series::BenchmarkSeries;
use crate::stats::SeriesStats;

/// Which kernel variant a measurement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Variant {
    Unoptimized,
    Optimized,
}

impl Variant {
    pub fn label(&self) -> &'static str {
        match self {
            Variant::Unoptimized => "Unoptimized",
            Variant::Optimized => "Optimized",
        }
    }
}

/// Keys written for one aggregated series.
struct DerivedKeys {
    mean: MetricKey,
    median: MetricKey,
    min: MetricKey,
    max: MetricKey,
}

const OPT_TIME_KEYS: DerivedKeys = DerivedKeys {
    mean: MetricKey::OptMeanTime,
    median: MetricKey::OptMedianTime,
    min: MetricKey::OptMinTime,
    max: MetricKey::OptMaxTime,
};

const UNOPT_TIME_KEYS: DerivedKeys = DerivedKeys {
    mean: MetricKey::UnoptMeanTime,
    median: MetricKey::UnoptMedianTime,
    min: MetricKey::UnoptMinTime,
    max: MetricKey::UnoptMaxTime,
};

const OPT_RESULT_KEYS: DerivedKeys = DerivedKeys {
    mean: MetricKey::OptMeanResult,
    median: MetricKey::OptMedianResult,
    min: MetricKey::OptMinResult,
    max: MetricKey::OptMaxResult,
};

/// Single-run metrics merged with multi-run series statistics.
///
/// Built fresh by [`aggregate`] and read-only afterwards. A `*_stats` field is
/// `Some` exactly when the matching series is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatedMetrics {
    record: MetricsRecord,
    opt_times: Vec<f64>,
    unopt_times: Vec<f64>,
    opt_results: Vec<f64>,
    opt_time_stats: Option<SeriesStats>,
    unopt_time_stats: Option<SeriesStats>,
    opt_result_stats: Option<SeriesStats>,
}

impl AggregatedMetrics {
    pub fn record(&self) -> &MetricsRecord {
        &self.record
    }

    pub fn opt_times(&self) -> &[f64] {
        &self.opt_times
    }

    pub fn unopt_times(&self) -> &[f64] {
        &self.unopt_times
    }

    pub fn opt_results(&self) -> &[f64] {
        &self.opt_results
    }

    pub fn opt_time_stats(&self) -> Option<&SeriesStats> {
        self.opt_time_stats.as_ref()
    }

    pub fn unopt_time_stats(&self) -> Option<&SeriesStats> {
        self.unopt_time_stats.as_ref()
    }

    pub fn opt_result_stats(&self) -> Option<&SeriesStats> {
        self.opt_result_stats.as_ref()
    }

    pub fn times(&self, variant: Variant) -> &[f64] {
        match variant {
            Variant::Unoptimized => &self.unopt_times,
            Variant::Optimized => &self.opt_times,
        }
    }

    pub fn time_stats(&self, variant: Variant) -> Option<&SeriesStats> {
        match variant {
            Variant::Unoptimized => self.unopt_time_stats.as_ref(),
            Variant::Optimized => self.opt_time_stats.as_ref(),
        }
    }

    /// Best available execution time for `variant`.
    ///
    /// The multi-run mean wins over the single-run time; the single run is
    /// only a fallback when no mean exists.
    pub fn effective_time(&self, variant: Variant) -> Option<f64> {
        let (mean, single) = match variant {
            Variant::Unoptimized => (MetricKey::UnoptMeanTime, MetricKey::UnoptTime),
            Variant::Optimized => (MetricKey::OptMeanTime, MetricKey::OptTime),
        };
        self.record
            .number(mean)
            .or_else(|| self.record.number(single))
    }

    /// Ratio of unoptimized to optimized effective time.
    pub fn speedup(&self) -> Option<f64> {
        let unopt = self.effective_time(Variant::Unoptimized)?;
        let opt = self.effective_time(Variant::Optimized)?;
        if opt == 0.0 {
            None
        } else {
            Some(unopt / opt)
        }
    }
}

/// Merge a single-run summary with any available per-iteration series.
///
/// Each series text is optional; an absent or unparsable series simply
/// contributes nothing. For every non-empty series the raw values are kept
/// and its mean, upper median, min and max are written into the record.
///
/// # Examples
///
/// ```
/// use kernel_bench::metrics::{aggregate, MetricKey, MetricsRecord};
///
/// let base = MetricsRecord::new();
/// let metrics = aggregate(&base, Some("i,t\n0,2.0\n1,4.0\n"), None, None);
/// assert_eq!(metrics.record().number(MetricKey::OptMeanTime), Some(3.0));
/// assert_eq!(metrics.record().number(MetricKey::OptMedianTime), Some(4.0));
/// assert!(!metrics.record().contains(MetricKey::UnoptMeanTime));
/// ```
#[instrument(skip_all, fields(
    opt_times = opt_times.is_some(),
    unopt_times = unopt_times.is_some(),
    opt_results = opt_results.is_some(),
))]
pub fn aggregate(
    base: &MetricsRecord,
    opt_times: Option<&str>,
    unopt_times: Option<&str>,
    opt_results: Option<&str>,
) -> AggregatedMetrics {
    let mut record = base.clone();

    let (opt_times, opt_time_stats) = merge_series(&mut record, opt_times, &OPT_TIME_KEYS);
    let (unopt_times, unopt_time_stats) =
        merge_series(&mut record, unopt_times, &UNOPT_TIME_KEYS);
    let (opt_results, opt_result_stats) =
        merge_series(&mut record, opt_results, &OPT_RESULT_KEYS);

    debug!(
        opt_samples = opt_times.len(),
        unopt_samples = unopt_times.len(),
        result_samples = opt_results.len(),
        "Aggregated benchmark metrics"
    );

    AggregatedMetrics {
        record,
        opt_times,
        unopt_times,
        opt_results,
        opt_time_stats,
        unopt_time_stats,
        opt_result_stats,
    }
}

fn merge_series(
    record: &mut MetricsRecord,
    text: Option<&str>,
    keys: &DerivedKeys,
) -> (Vec<f64>, Option<SeriesStats>) {
    let values = text
        .map(|text| BenchmarkSeries::parse(text).values())
        .unwrap_or_default();

    let stats = SeriesStats::from_samples(&values);
    if let Some(stats) = &stats {
        record.set(keys.mean, stats.mean);
        record.set(keys.median, stats.median);
        record.set(keys.min, stats.min);
        record.set(keys.max, stats.max);
    }
    (values, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::record::MetricValue;

    const OPT: &str = "iteration,time\n0,0.4\n1,0.1\n2,0.3\n3,0.2\n";
    const UNOPT: &str = "iteration,time\n0,1.0\n1,3.0\n2,2.0\n";
    const RESULTS: &str = "iteration,result\n0,6.0\n1,6.0\n2,6.5\n";

    #[test]
    fn test_only_opt_series() {
        let metrics = aggregate(&MetricsRecord::new(), Some(OPT), None, None);
        let record = metrics.record();

        assert!(record.contains(MetricKey::OptMeanTime));
        assert!(record.contains(MetricKey::OptMinTime));
        assert!(record.contains(MetricKey::OptMaxTime));
        assert!(!record.contains(MetricKey::UnoptMeanTime));
        assert!(!record.contains(MetricKey::UnoptMinTime));
        assert!(metrics.unopt_time_stats().is_none());
        assert!(metrics.unopt_times().is_empty());
    }

    #[test]
    fn test_statistics_values() {
        let base = MetricsRecord::new();
        let metrics = aggregate(&base, Some(OPT), Some(UNOPT), Some(RESULTS));
        let record = metrics.record();

        let mean = record.number(MetricKey::OptMeanTime).unwrap();
        assert!((mean - 0.25).abs() < 1e-12);
        assert_eq!(record.number(MetricKey::OptMedianTime), Some(0.3));
        assert_eq!(record.number(MetricKey::OptMinTime), Some(0.1));
        assert_eq!(record.number(MetricKey::OptMaxTime), Some(0.4));
        assert_eq!(record.number(MetricKey::UnoptMeanTime), Some(2.0));
        assert_eq!(record.number(MetricKey::UnoptMedianTime), Some(2.0));
        assert_eq!(record.number(MetricKey::OptMinResult), Some(6.0));
        assert_eq!(record.number(MetricKey::OptMedianResult), Some(6.0));
    }

    #[test]
    fn test_raw_series_kept_in_file_order() {
        let metrics = aggregate(&MetricsRecord::new(), Some(OPT), None, None);
        assert_eq!(metrics.opt_times(), &[0.4, 0.1, 0.3, 0.2]);
    }

    #[test]
    fn test_series_overrides_single_run_value() {
        let mut base = MetricsRecord::new();
        base.set(MetricKey::UnoptMeanTime, 99.0);
        base.insert("note", "kept");

        let metrics = aggregate(&base, None, Some(UNOPT), None);
        assert_eq!(metrics.record().number(MetricKey::UnoptMeanTime), Some(2.0));
        assert_eq!(
            metrics.record().get_raw("note"),
            Some(&MetricValue::Text("kept".to_string()))
        );
        // The caller's record is untouched.
        assert_eq!(base.number(MetricKey::UnoptMeanTime), Some(99.0));
    }

    #[test]
    fn test_missing_and_empty_series_contribute_nothing() {
        let mut base = MetricsRecord::new();
        base.set(MetricKey::OptTime, 0.5);

        let metrics = aggregate(&base, Some("header only\n"), Some(""), None);
        assert_eq!(metrics.record(), &base);
        assert!(metrics.opt_time_stats().is_none());
        assert!(metrics.opt_result_stats().is_none());
    }

    #[test]
    fn test_effective_time_prefers_multi_run_mean() {
        let mut base = MetricsRecord::new();
        base.set(MetricKey::OptTime, 10.0);
        base.set(MetricKey::UnoptTime, 20.0);

        let single = aggregate(&base, None, None, None);
        assert_eq!(single.effective_time(Variant::Optimized), Some(10.0));
        assert_eq!(single.speedup(), Some(2.0));

        let multi = aggregate(&base, Some(OPT), None, None);
        let effective = multi.effective_time(Variant::Optimized).unwrap();
        assert!((effective - 0.25).abs() < 1e-12);
        assert_eq!(multi.effective_time(Variant::Unoptimized), Some(20.0));
    }

    #[test]
    fn test_speedup_requires_nonzero_opt_time() {
        let mut base = MetricsRecord::new();
        base.set(MetricKey::OptTime, 0.0);
        base.set(MetricKey::UnoptTime, 1.0);

        assert_eq!(aggregate(&base, None, None, None).speedup(), None);
    }
}
