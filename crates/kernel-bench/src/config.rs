//! Configuration parsing for analysis and driver defaults
//!
//! This module provides TOML-based configuration for the analysis knobs
//! (default dimension size, histogram buckets, outlier fence), the defaults
//! used when building a driver generation payload, and the file names a
//! benchmark run writes its metric reports to. Every field has a default, so
//! an empty file is a valid configuration.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::input::FloatCategory;

/// Main configuration structure loaded from TOML files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Defaults for the driver generation payload
    #[serde(default)]
    pub driver: DriverDefaults,
    /// Names of the metric reports produced by a run
    #[serde(default)]
    pub files: MetricsFileNames,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use kernel_bench::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = Config::from_file("kernel-bench.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Example
    ///
    /// ```
    /// use kernel_bench::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = Config::from_str("[analysis]\nhistogram_buckets = 40\n")?;
    /// assert_eq!(config.analysis.histogram_buckets, 40);
    /// # Ok(())
    /// # }
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }
}

/// Knobs for configuration derivation and distribution analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Size assigned to every dimension before the user edits it (default: 1048576)
    #[serde(default = "default_dimension_size")]
    pub default_dimension_size: u64,
    /// Number of histogram buckets for timing distributions (default: 20)
    #[serde(default = "default_histogram_buckets")]
    pub histogram_buckets: usize,
    /// IQR multiple used for the outlier fences (default: 1.5)
    #[serde(default = "default_iqr_multiplier")]
    pub iqr_multiplier: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_dimension_size: default_dimension_size(),
            histogram_buckets: default_histogram_buckets(),
            iqr_multiplier: default_iqr_multiplier(),
        }
    }
}

fn default_dimension_size() -> u64 {
    1_048_576
}

fn default_histogram_buckets() -> usize {
    20
}

fn default_iqr_multiplier() -> f64 {
    1.5
}

/// Defaults for [`DriverGenOptions`](crate::input::DriverGenOptions)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverDefaults {
    /// Benchmark iterations per variant (default: 50)
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Reference precision in bits (default: 256)
    #[serde(default = "default_precision")]
    pub precision: u32,
    /// Generated driver source name (default: driver_compare.c)
    #[serde(default = "default_output_file")]
    pub output_file: String,
    /// Value generation policy (default: normal)
    #[serde(default)]
    pub float_type: FloatCategory,
    /// Whether generated values may be negative (default: false)
    #[serde(default)]
    pub include_negatives: bool,
    /// Summary metrics file the driver writes (default: metrics.csv)
    #[serde(default = "default_metrics_file")]
    pub metrics_file: String,
}

impl Default for DriverDefaults {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            precision: default_precision(),
            output_file: default_output_file(),
            float_type: FloatCategory::default(),
            include_negatives: false,
            metrics_file: default_metrics_file(),
        }
    }
}

fn default_iterations() -> u32 {
    50
}

fn default_precision() -> u32 {
    256
}

fn default_output_file() -> String {
    "driver_compare.c".to_string()
}

fn default_metrics_file() -> String {
    "metrics.csv".to_string()
}

/// File names of the reports a benchmark run produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsFileNames {
    /// Single-run summary metrics
    #[serde(default = "default_metrics_file")]
    pub metrics: String,
    /// Per-iteration optimized timings
    #[serde(default = "default_opt_timings")]
    pub opt_timings: String,
    /// Per-iteration unoptimized timings
    #[serde(default = "default_unopt_timings")]
    pub unopt_timings: String,
    /// Per-iteration optimized results
    #[serde(default = "default_opt_results")]
    pub opt_results: String,
}

impl Default for MetricsFileNames {
    fn default() -> Self {
        Self {
            metrics: default_metrics_file(),
            opt_timings: default_opt_timings(),
            unopt_timings: default_unopt_timings(),
            opt_results: default_opt_results(),
        }
    }
}

fn default_opt_timings() -> String {
    "metrics_opt_timings.csv".to_string()
}

fn default_unopt_timings() -> String {
    "metrics_unopt_timings.csv".to_string()
}

fn default_opt_results() -> String {
    "metrics_opt_results.csv".to_string()
}
