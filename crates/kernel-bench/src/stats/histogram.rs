//! Shared-axis histograms for comparing two distributions.
//!
//! Both series are bucketed over the range of their union so the two bar
//! groups line up on one axis.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::outliers::OutlierBounds;

/// Default number of buckets for timing distributions.
pub const DEFAULT_BUCKET_COUNT: usize = 20;

/// One bucket of a two-series histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    /// Midpoint of the bucket's value range
    pub range_center: f64,
    pub count_a: usize,
    pub count_b: usize,
}

/// Two series bucketed over a shared range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    /// `0.0` when every value is identical; all mass then sits in bucket 0
    pub bucket_width: f64,
    pub buckets: Vec<HistogramBucket>,
}

impl Histogram {
    /// Bucket `series_a` and `series_b` into `bucket_count` equal-width buckets.
    ///
    /// # Returns
    ///
    /// * `Some(histogram)` - Exactly `bucket_count` buckets
    /// * `None` - If both series are empty or `bucket_count` is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use kernel_bench::stats::histogram::Histogram;
    ///
    /// let hist = Histogram::build(&[1.0, 2.0], &[3.0, 4.0], 4).unwrap();
    /// assert_eq!(hist.buckets.len(), 4);
    /// assert_eq!(hist.buckets[0].count_a, 1);
    /// assert_eq!(hist.buckets[3].count_b, 1);
    /// ```
    pub fn build(series_a: &[f64], series_b: &[f64], bucket_count: usize) -> Option<Self> {
        if bucket_count == 0 {
            return None;
        }

        let union = series_a.iter().chain(series_b.iter()).copied();
        let (min, max) = union.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if min > max {
            return None;
        }

        let bucket_width = if max == min {
            0.0
        } else {
            (max - min) / bucket_count as f64
        };

        let bucket_of = |value: f64| -> usize {
            if bucket_width == 0.0 {
                return 0;
            }
            let raw = ((value - min) / bucket_width).floor();
            if raw <= 0.0 {
                0
            } else {
                (raw as usize).min(bucket_count - 1)
            }
        };

        let mut buckets: Vec<HistogramBucket> = (0..bucket_count)
            .map(|i| HistogramBucket {
                range_center: min + (i as f64 + 0.5) * bucket_width,
                count_a: 0,
                count_b: 0,
            })
            .collect();

        for &value in series_a {
            buckets[bucket_of(value)].count_a += 1;
        }
        for &value in series_b {
            buckets[bucket_of(value)].count_b += 1;
        }

        debug!(min, max, bucket_width, bucket_count, "Built histogram");
        Some(Histogram {
            min,
            max,
            bucket_width,
            buckets,
        })
    }

    pub fn total_a(&self) -> usize {
        self.buckets.iter().map(|b| b.count_a).sum()
    }

    pub fn total_b(&self) -> usize {
        self.buckets.iter().map(|b| b.count_b).sum()
    }
}

/// Outlier partitions of two series plus the histogram of their kept values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionComparison {
    pub bounds_a: Option<OutlierBounds>,
    pub bounds_b: Option<OutlierBounds>,
    pub histogram: Option<Histogram>,
}

/// Drop each series' outliers, then bucket what remains on a shared axis.
pub fn compare_distributions(
    series_a: &[f64],
    series_b: &[f64],
    bucket_count: usize,
    iqr_multiplier: f64,
) -> DistributionComparison {
    let bounds_a = OutlierBounds::compute_with_multiplier(series_a, iqr_multiplier);
    let bounds_b = OutlierBounds::compute_with_multiplier(series_b, iqr_multiplier);

    let kept_a = bounds_a
        .as_ref()
        .map(|b| b.non_outliers.as_slice())
        .unwrap_or(&[]);
    let kept_b = bounds_b
        .as_ref()
        .map(|b| b.non_outliers.as_slice())
        .unwrap_or(&[]);
    let histogram = Histogram::build(kept_a, kept_b, bucket_count);

    DistributionComparison {
        bounds_a,
        bounds_b,
        histogram,
    }
}
