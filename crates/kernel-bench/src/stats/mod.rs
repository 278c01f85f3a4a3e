//! Statistical analysis of benchmark series
//!
//! This module provides summary statistics, IQR outlier partitioning, and
//! shared-axis histograms. Every function works on a copy of its input; the
//! caller's slices are never reordered.
//!
//! # Examples
//!
//! ```
//! use kernel_bench::stats::{compare_distributions, OutlierBounds, SeriesStats};
//!
//! let opt = vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
//! let unopt = vec![4.0, 5.0, 6.0, 7.0, 8.0];
//!
//! let stats = SeriesStats::from_samples(&opt).unwrap();
//! println!("Median: {}, mean: {}", stats.median, stats.mean);
//!
//! let bounds = OutlierBounds::compute(&opt).unwrap();
//! assert_eq!(bounds.outliers, vec![100.0]);
//!
//! let cmp = compare_distributions(&opt, &unopt, 20, 1.5);
//! assert_eq!(cmp.histogram.unwrap().buckets.len(), 20);
//! ```

pub mod histogram;
pub mod outliers;
pub mod percentiles;

pub use histogram::{compare_distributions, DistributionComparison, Histogram, HistogramBucket};
pub use outliers::OutlierBounds;
pub use percentiles::{percentile, upper_median, SeriesStats};
