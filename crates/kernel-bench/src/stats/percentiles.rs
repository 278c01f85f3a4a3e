//! Percentile calculations and series summaries.
//!
//! This module provides utilities for computing percentiles and the summary
//! statistics shown for timing and result series.

use serde::{Deserialize, Serialize};

/// Calculate percentile value from a slice of f64 samples.
///
/// Uses linear interpolation between nearest ranks, the same convention the
/// benchmark driver uses for the quantile columns it writes itself.
///
/// # Arguments
///
/// * `samples` - Slice of samples (sorted internally on a copy)
/// * `p` - Percentile to calculate (0.0 to 100.0)
///
/// # Returns
///
/// * `Some(value)` - The percentile value
/// * `None` - If samples is empty or p is invalid
///
/// # Examples
///
/// ```
/// use kernel_bench::stats::percentiles::percentile;
///
/// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(percentile(&data, 50.0), Some(3.0));
/// ```
pub fn percentile(samples: &[f64], p: f64) -> Option<f64> {
    if samples.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }

    let sorted = sorted_copy(samples);

    if sorted.len() == 1 {
        return Some(sorted[0]);
    }

    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower_index = rank.floor() as usize;
    let upper_index = rank.ceil() as usize;

    if lower_index == upper_index {
        Some(sorted[lower_index])
    } else {
        let lower_value = sorted[lower_index];
        let upper_value = sorted[upper_index];
        let fraction = rank - lower_index as f64;
        Some(lower_value + fraction * (upper_value - lower_value))
    }
}

/// Upper median: the element at `floor(n / 2)` of the sorted samples.
///
/// For even counts this is the larger of the two middle values, not their
/// average. Charts built from earlier runs rely on this convention.
///
/// ```
/// use kernel_bench::stats::percentiles::upper_median;
///
/// assert_eq!(upper_median(&[4.0, 1.0, 3.0, 2.0]), Some(3.0));
/// assert_eq!(upper_median(&[]), None);
/// ```
pub fn upper_median(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let sorted = sorted_copy(samples);
    Some(sorted[sorted.len() / 2])
}

/// Ascending copy of `samples`; the caller's slice is never reordered.
pub(crate) fn sorted_copy(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Summary statistics for one benchmark series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: f64,
    /// Upper median, see [`upper_median`]
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population variance (divides by `count`)
    pub variance: f64,
    pub std_dev: f64,
    /// Interpolated 25th percentile
    pub q1: f64,
    /// Interpolated 75th percentile
    pub q3: f64,
}

impl SeriesStats {
    /// Compute summary statistics from samples.
    ///
    /// # Returns
    ///
    /// * `Some(stats)` - Statistical summary
    /// * `None` - If samples is empty
    ///
    /// # Examples
    ///
    /// ```
    /// use kernel_bench::stats::percentiles::SeriesStats;
    ///
    /// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    /// let stats = SeriesStats::from_samples(&data).unwrap();
    /// assert_eq!(stats.count, 10);
    /// assert_eq!(stats.mean, 5.5);
    /// assert_eq!(stats.median, 6.0);
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 10.0);
    /// ```
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let count = samples.len();
        let sum: f64 = samples.iter().sum();
        let mean = sum / count as f64;

        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let variance = samples.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / count as f64;

        let sorted = sorted_copy(samples);
        let median = sorted[count / 2];
        let q1 = percentile(&sorted, 25.0)?;
        let q3 = percentile(&sorted, 75.0)?;

        Some(SeriesStats {
            count,
            mean,
            median,
            min,
            max,
            variance,
            std_dev: variance.sqrt(),
            q1,
            q3,
        })
    }

    /// Coefficient of variation (std_dev / mean).
    ///
    /// Returns `f64::INFINITY` if mean is zero.
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            f64::INFINITY
        } else {
            self.std_dev / self.mean
        }
    }
}
