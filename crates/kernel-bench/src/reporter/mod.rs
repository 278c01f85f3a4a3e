//! Benchmark report rendering
//!
//! This module turns [`AggregatedMetrics`] into a [`MetricsReport`] and
//! renders it in one of several formats.
//!
//! # Output Formats
//!
//! - **JSON**: Machine-readable format for CI/CD integration
//! - **Console**: Human-readable format with ASCII tables and a text histogram
//!
//! # Example
//!
//! ```no_run
//! use kernel_bench::config::AnalysisConfig;
//! use kernel_bench::metrics::AggregatedMetrics;
//! use kernel_bench::reporter::{MetricsReport, OutputFormat, Reporter};
//!
//! # fn example(metrics: AggregatedMetrics) -> anyhow::Result<()> {
//! let report = MetricsReport::build(&metrics, &AnalysisConfig::default());
//! Reporter::new(OutputFormat::Console).report(&report)?;
//!
//! // Or write to a file
//! Reporter::new(OutputFormat::Json).write_to_file(&report, "report.json")?;
//! # Ok(())
//! # }
//! ```

mod console;
pub mod format;
mod json;
pub mod table;

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::metrics::charts::{
    absolute_difference_chart, iteration_results, iteration_timings, performance_chart,
    relative_error_chart, result_stability, timing_distribution, ulps_chart, ChartBar,
    IterationPoint, ResultStability,
};
use crate::metrics::{AggregatedMetrics, Variant};
use crate::stats::{DistributionComparison, SeriesStats};

pub use console::ConsoleReporter;
pub use format::{format_bounded, format_full_decimal};
pub use json::JsonReporter;
pub use table::{reference_values, tableize, MetricRow, ReferenceValue};

/// Output format for benchmark reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format for machine parsing
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// Console output with tables
    #[default]
    Console,
}

/// Everything a front end needs to display one benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub generated_at: String,
    pub table: Vec<MetricRow>,
    pub reference_values: Vec<ReferenceValue>,
    pub speedup: Option<f64>,
    pub performance: Vec<ChartBar>,
    pub ulps: Vec<ChartBar>,
    pub relative_error: Vec<ChartBar>,
    pub absolute_difference: Vec<ChartBar>,
    pub opt_time_stats: Option<SeriesStats>,
    pub unopt_time_stats: Option<SeriesStats>,
    pub opt_iteration_timings: Vec<IterationPoint>,
    pub unopt_iteration_timings: Vec<IterationPoint>,
    pub iteration_results: Vec<IterationPoint>,
    pub result_stability: Option<ResultStability>,
    pub distribution: DistributionComparison,
}

impl MetricsReport {
    pub fn build(metrics: &AggregatedMetrics, analysis: &AnalysisConfig) -> Self {
        let report = Self {
            generated_at: Utc::now().to_rfc3339(),
            table: tableize(metrics),
            reference_values: reference_values(metrics),
            speedup: metrics.speedup(),
            performance: performance_chart(metrics),
            ulps: ulps_chart(metrics),
            relative_error: relative_error_chart(metrics),
            absolute_difference: absolute_difference_chart(metrics),
            opt_time_stats: metrics.opt_time_stats().cloned(),
            unopt_time_stats: metrics.unopt_time_stats().cloned(),
            opt_iteration_timings: iteration_timings(metrics, Variant::Optimized),
            unopt_iteration_timings: iteration_timings(metrics, Variant::Unoptimized),
            iteration_results: iteration_results(metrics),
            result_stability: result_stability(metrics),
            distribution: timing_distribution(metrics, analysis),
        };
        debug!(rows = report.table.len(), "Built metrics report");
        report
    }

    pub fn time_stats(&self, variant: Variant) -> Option<&SeriesStats> {
        match variant {
            Variant::Unoptimized => self.unopt_time_stats.as_ref(),
            Variant::Optimized => self.opt_time_stats.as_ref(),
        }
    }
}

/// Reporter for benchmark reports
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    /// Create a new reporter with the specified output format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Report to stdout
    pub fn report(&self, report: &MetricsReport) -> Result<()> {
        let output = self.format_report(report)?;
        print!("{}", output);
        io::stdout().flush()?;
        Ok(())
    }

    /// Write the report to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, report: &MetricsReport, path: P) -> Result<()> {
        let output = self.format_report(report)?;
        fs::write(path, output)?;
        Ok(())
    }

    /// Format the report as a string
    pub fn format_report(&self, report: &MetricsReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => JsonReporter::format(report, false),
            OutputFormat::JsonPretty => JsonReporter::format(report, true),
            OutputFormat::Console => ConsoleReporter::format(report),
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::sample_report;
    use super::*;

    #[test]
    fn test_report_contents() {
        let report = sample_report();

        assert!(report.table.iter().any(|row| row.metric == "opt_mean_time"));
        assert_eq!(report.performance[0].label, "Unoptimized");
        assert_eq!(report.opt_iteration_timings.len(), 4);
        assert_eq!(report.unopt_iteration_timings.len(), 3);
        assert!(report.result_stability.as_ref().unwrap().consistent);
        let histogram = report.distribution.histogram.as_ref().unwrap();
        assert_eq!(histogram.buckets.len(), 20);
        let generated = chrono::DateTime::parse_from_rfc3339(&report.generated_at);
        assert!(generated.is_ok());
    }

    #[test]
    fn test_report_speedup_uses_means() {
        let report = sample_report();
        // unopt mean 3.1/3, opt mean 0.95/4
        let expected = (3.1 / 3.0) / (0.95 / 4.0);
        assert!((report.speedup.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_reporter_json_format() {
        let report = sample_report();
        let reporter = Reporter::new(OutputFormat::Json);
        let output = reporter.format_report(&report).unwrap();

        assert!(output.contains("\"opt_mean_time\""));
        assert!(output.contains("\"generated_at\""));
    }

    #[test]
    fn test_reporter_console_format() {
        let report = sample_report();
        let reporter = Reporter::new(OutputFormat::Console);
        let output = reporter.format_report(&report).unwrap();

        assert!(output.contains("KERNEL BENCHMARK REPORT"));
        assert!(output.contains("opt_mean_time"));
    }

    #[test]
    fn test_default_format() {
        let reporter = Reporter::default();
        assert_eq!(reporter.format, OutputFormat::Console);
    }
}
