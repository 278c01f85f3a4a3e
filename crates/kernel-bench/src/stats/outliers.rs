//! Outlier detection for benchmark series.
//!
//! Quartiles here are nearest-rank (`sorted[floor(p * n)]`), not
//! interpolated, so the fences match the distribution charts built from
//! earlier runs.

use serde::{Deserialize, Serialize};

use super::percentiles::sorted_copy;

/// Default IQR multiple for the fences.
pub const IQR_FENCE_MULTIPLIER: f64 = 1.5;

/// Outlier partition of one series using the Interquartile Range (IQR) method.
///
/// Values strictly outside `[q1 - k*IQR, q3 + k*IQR]` are outliers; values on
/// a fence are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierBounds {
    /// First quartile (nearest rank)
    pub q1: f64,
    /// Third quartile (nearest rank)
    pub q3: f64,
    /// Interquartile range (Q3 - Q1)
    pub iqr: f64,
    /// Lower fence (Q1 - k*IQR)
    pub lower_bound: f64,
    /// Upper fence (Q3 + k*IQR)
    pub upper_bound: f64,
    /// Values outside the fences, in input order
    pub outliers: Vec<f64>,
    /// Values within the fences (inclusive), in input order
    pub non_outliers: Vec<f64>,
}

impl OutlierBounds {
    /// Partition `samples` with the default 1.5 multiplier.
    ///
    /// # Returns
    ///
    /// * `Some(bounds)` - Fences and partition
    /// * `None` - If samples is empty
    ///
    /// # Examples
    ///
    /// ```
    /// use kernel_bench::stats::outliers::OutlierBounds;
    ///
    /// let bounds = OutlierBounds::compute(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
    /// assert_eq!(bounds.outliers, vec![100.0]);
    /// assert_eq!(bounds.non_outliers, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    /// ```
    pub fn compute(samples: &[f64]) -> Option<Self> {
        Self::compute_with_multiplier(samples, IQR_FENCE_MULTIPLIER)
    }

    /// Partition `samples` with fences `multiplier` IQRs beyond the quartiles.
    pub fn compute_with_multiplier(samples: &[f64], multiplier: f64) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let sorted = sorted_copy(samples);
        let n = sorted.len();
        let q1 = sorted[nearest_rank(n, 0.25)];
        let q3 = sorted[nearest_rank(n, 0.75)];
        let iqr = q3 - q1;

        let lower_bound = q1 - multiplier * iqr;
        let upper_bound = q3 + multiplier * iqr;

        let (non_outliers, outliers): (Vec<f64>, Vec<f64>) = samples
            .iter()
            .partition(|&&value| value >= lower_bound && value <= upper_bound);

        Some(OutlierBounds {
            q1,
            q3,
            iqr,
            lower_bound,
            upper_bound,
            outliers,
            non_outliers,
        })
    }

    /// Check if any outliers were detected.
    pub fn has_outliers(&self) -> bool {
        !self.outliers.is_empty()
    }
}

fn nearest_rank(n: usize, fraction: f64) -> usize {
    ((n as f64 * fraction).floor() as usize).min(n - 1)
}
