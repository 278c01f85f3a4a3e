//! Toolkit for optimized-vs-unoptimized numeric kernel benchmarks
//!
//! This crate covers both ends of a kernel benchmark run: shaping the inputs
//! the benchmark driver is generated with, and digesting the metric reports
//! it writes back.
//!
//! # Features
//!
//! - **Structure Analysis**: Extract dimensions and input shapes from a kernel structure report
//! - **Input Configuration**: Derive, edit and serialise per-input array settings
//! - **Driver Options**: Build and validate the driver generation request
//! - **Metrics Aggregation**: Merge single-run summaries with per-iteration series
//! - **Statistical Analysis**: Medians, IQR outlier filtering and shared-axis histograms
//! - **Multiple Output Formats**: JSON and Console reports
//!
//! # Example
//!
//! ```
//! use kernel_bench::config::DriverDefaults;
//! use kernel_bench::input::{DriverGenOptions, InputConfiguration};
//! use kernel_bench::structure::StructureDescriptor;
//!
//! let report = "Dimensions: n\nInput sizes: n, 1\nOutput size: n\n";
//! let descriptor = StructureDescriptor::parse(report);
//!
//! let inputs = InputConfiguration::derive_initial(&descriptor, 1024)
//!     .update_dimension("n", 4096)
//!     .unwrap();
//! assert_eq!(inputs.slots()[0].item.size(), Some(4096));
//!
//! let options = DriverGenOptions::from_defaults("kernel.rise", 4096, &DriverDefaults::default())
//!     .with_input_config(&inputs);
//! assert!(options.validate().is_ok());
//! ```
//!
//! # Configuration
//!
//! Defaults are read from an optional TOML file:
//!
//! ```toml
//! [analysis]
//! default_dimension_size = 1048576
//! histogram_buckets = 20
//! iqr_multiplier = 1.5
//!
//! [driver]
//! iterations = 50
//! precision = 256
//! float_type = "normal"
//!
//! [files]
//! metrics = "metrics.csv"
//! opt_timings = "metrics_opt_timings.csv"
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod metrics;
pub mod reporter;
pub mod stats;
pub mod structure;

// Re-export main types for convenience
pub use config::Config;
pub use error::{DriverOptionsError, InputConfigError};
pub use input::{InputConfigItem, InputConfiguration};
pub use metrics::{aggregate, AggregatedMetrics, MetricsBundle};
pub use reporter::{MetricsReport, OutputFormat, Reporter};
pub use structure::StructureDescriptor;
