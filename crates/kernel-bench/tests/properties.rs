//! Property-based tests for configuration derivation and series statistics

use kernel_bench::input::{InputConfigItem, InputConfiguration};
use kernel_bench::metrics::{aggregate, BenchmarkSeries, MetricKey, MetricsRecord};
use kernel_bench::stats::{compare_distributions, upper_median, OutlierBounds, SeriesStats};
use kernel_bench::StructureDescriptor;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn samples(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6..1.0e6f64, 0..max_len)
}

/// Series text with a header and one `index,value` row per sample.
fn series_text(values: &[f64]) -> String {
    let mut text = String::from("iteration,value\n");
    for (i, value) in values.iter().enumerate() {
        text.push_str(&format!("{},{}\n", i, value));
    }
    text
}

fn structure_report(a: &str, b: &str) -> String {
    format!(
        "Dimensions: {a}, {b}\nInput sizes: {a} * {b}, {b}, 1\nOutput size: {a}\n",
        a = a,
        b = b
    )
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn outlier_partition_covers_every_sample(values in samples(64)) {
        match OutlierBounds::compute(&values) {
            None => prop_assert!(values.is_empty()),
            Some(bounds) => {
                prop_assert_eq!(bounds.outliers.len() + bounds.non_outliers.len(), values.len());
                prop_assert!(bounds.lower_bound <= bounds.upper_bound);
                for value in &bounds.outliers {
                    prop_assert!(*value < bounds.lower_bound || *value > bounds.upper_bound);
                }
            }
        }
    }

    #[test]
    fn histogram_counts_every_kept_sample(
        a in samples(64),
        b in samples(64),
        buckets in 1usize..40,
    ) {
        let cmp = compare_distributions(&a, &b, buckets, 1.5);
        let kept_a = cmp.bounds_a.as_ref().map_or(0, |bounds| bounds.non_outliers.len());
        let kept_b = cmp.bounds_b.as_ref().map_or(0, |bounds| bounds.non_outliers.len());

        match cmp.histogram {
            None => prop_assert!(a.is_empty() && b.is_empty()),
            Some(hist) => {
                prop_assert_eq!(hist.buckets.len(), buckets);
                prop_assert_eq!(hist.total_a(), kept_a);
                prop_assert_eq!(hist.total_b(), kept_b);
            }
        }
    }

    #[test]
    fn upper_median_is_a_sample(values in samples(64)) {
        match upper_median(&values) {
            None => prop_assert!(values.is_empty()),
            Some(median) => prop_assert!(values.contains(&median)),
        }
    }

    #[test]
    fn series_stats_are_ordered(values in samples(64)) {
        if let Some(stats) = SeriesStats::from_samples(&values) {
            prop_assert!(stats.min <= stats.median && stats.median <= stats.max);
            prop_assert!(stats.min <= stats.mean + 1e-6 && stats.mean <= stats.max + 1e-6);
            prop_assert!(stats.variance >= 0.0);
        }
    }

    #[test]
    fn series_parser_never_panics(text in ".{0,200}") {
        let series = BenchmarkSeries::parse(&text);
        prop_assert!(series.values().iter().all(|value| value.is_finite()));
    }

    #[test]
    fn aggregate_min_max_bracket_mean(values in samples(32)) {
        let metrics = aggregate(&MetricsRecord::new(), Some(&series_text(&values)), None, None);
        let record = metrics.record();

        if values.is_empty() {
            prop_assert!(!record.contains(MetricKey::OptMeanTime));
        } else {
            let min = record.number(MetricKey::OptMinTime).unwrap();
            let max = record.number(MetricKey::OptMaxTime).unwrap();
            let mean = record.number(MetricKey::OptMeanTime).unwrap();
            prop_assert!(min <= mean + 1e-6 && mean <= max + 1e-6);
            prop_assert_eq!(metrics.opt_times().len(), values.len());
        }
    }

    #[test]
    fn derived_sizes_follow_dimensions(a in 1u64..2048, b in 1u64..2048) {
        let descriptor = StructureDescriptor::parse(&structure_report("rows", "cols"));
        let config = InputConfiguration::derive_initial(&descriptor, 1)
            .update_dimension("rows", a)
            .and_then(|c| c.update_dimension("cols", b))
            .unwrap();

        prop_assert_eq!(config.slots()[0].item.size(), Some(a * b));
        prop_assert_eq!(config.slots()[1].item.size(), Some(b));
        prop_assert_eq!(config.output_size(), Some(a));
    }

    #[test]
    fn dimension_edits_never_touch_overrides(scalar in -1.0e3..1.0e3f64, size in 1u64..4096) {
        let descriptor = StructureDescriptor::parse(&structure_report("n", "m"));
        let config = InputConfiguration::derive_initial(&descriptor, 8)
            .set_scalar(0, scalar)
            .and_then(|c| c.update_dimension("n", size))
            .unwrap();

        prop_assert_eq!(&config.slots()[0].item, &InputConfigItem::Override(scalar));
        prop_assert_eq!(config.slots()[2].item.clone(), InputConfigItem::Override(0.0));
    }

    #[test]
    fn undeclared_dimension_is_rejected(name in "[a-z]{1,8}", size in 1u64..4096) {
        prop_assume!(name != "n" && name != "m");
        let descriptor = StructureDescriptor::parse(&structure_report("n", "m"));
        let config = InputConfiguration::derive_initial(&descriptor, 8);

        prop_assert!(config.update_dimension(&name, size).is_err());
    }
}
