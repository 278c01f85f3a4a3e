//! Benchmark metrics: parsing, aggregation and chart views
//!
//! This module provides:
//! - **Records**: the driver's single-run summary as a typed [`MetricsRecord`]
//! - **Series**: per-iteration `index,value` reports as [`BenchmarkSeries`]
//! - **Aggregation**: [`aggregate`] merges both into [`AggregatedMetrics`]
//! - **Charts**: chart-ready views in [`charts`]
//! - **Bundles**: [`MetricsBundle`] finds a run's reports in a file listing
//!
//! # Example
//!
//! ```
//! use kernel_bench::metrics::{aggregate, parse_metrics_csv, MetricKey};
//!
//! let base = parse_metrics_csv("metric,value,description\nopt_time,0.9,Optimized time\n");
//! let metrics = aggregate(&base, Some("iteration,time\n0,0.5\n1,0.7\n"), None, None);
//!
//! assert_eq!(metrics.record().number(MetricKey::OptTime), Some(0.9));
//! assert_eq!(metrics.record().number(MetricKey::OptMaxTime), Some(0.7));
//! ```

pub mod aggregate;
pub mod bundle;
pub mod charts;
pub mod record;
pub mod series;

pub use aggregate::{aggregate, AggregatedMetrics, Variant};
pub use bundle::MetricsBundle;
pub use record::{parse_metrics_csv, MetricKey, MetricValue, MetricsRecord};
pub use series::{BenchmarkSeries, SeriesPoint};
