//! Console reporter for benchmark reports
//!
//! Provides human-readable output with ASCII tables and a text histogram.

use anyhow::Result;
use std::fmt::Write;

use super::format::format_bounded;
use super::MetricsReport;
use crate::metrics::charts::ChartBar;
use crate::metrics::Variant;
use crate::stats::{DistributionComparison, OutlierBounds, SeriesStats};

const RULE: &str = "────────────────────────────────────────────────────────────────";
const BANNER: [&str; 3] = [
    "╔══════════════════════════════════════════════════════════════╗",
    "║                   KERNEL BENCHMARK REPORT                    ║",
    "╚══════════════════════════════════════════════════════════════╝",
];
const HISTOGRAM_WIDTH: usize = 30;

/// Console format reporter
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Format a benchmark report for console output
    pub fn format(report: &MetricsReport) -> Result<String> {
        let mut output = String::new();

        // Header
        writeln!(output)?;
        for line in BANNER {
            writeln!(output, "{}", line)?;
        }
        writeln!(output)?;
        writeln!(output, "Generated: {}", report.generated_at)?;
        writeln!(output)?;

        Self::format_table(&mut output, report)?;
        Self::format_performance(&mut output, report)?;
        Self::format_accuracy(&mut output, report)?;
        Self::format_distribution(&mut output, &report.distribution)?;

        writeln!(output)?;
        Ok(output)
    }

    fn format_table(output: &mut String, report: &MetricsReport) -> Result<()> {
        writeln!(output, "{}", RULE)?;
        writeln!(output, "Metrics")?;
        writeln!(output, "{}", RULE)?;

        if report.table.is_empty() {
            writeln!(output, "  (no metrics)")?;
            writeln!(output)?;
            return Ok(());
        }

        let metric_width = column_width("Metric", report.table.iter().map(|r| r.metric.as_str()));
        let value_width = column_width("Value", report.table.iter().map(|r| r.value.as_str()));

        writeln!(
            output,
            "  {:<mw$}  {:>vw$}  Description",
            "Metric",
            "Value",
            mw = metric_width,
            vw = value_width
        )?;
        writeln!(
            output,
            "  {}  {}  {}",
            "─".repeat(metric_width),
            "─".repeat(value_width),
            "─".repeat(11)
        )?;
        for row in &report.table {
            writeln!(
                output,
                "  {:<mw$}  {:>vw$}  {}",
                row.metric,
                row.value,
                row.description,
                mw = metric_width,
                vw = value_width
            )?;
        }
        writeln!(output)?;
        Ok(())
    }

    fn format_performance(output: &mut String, report: &MetricsReport) -> Result<()> {
        writeln!(output, "{}", RULE)?;
        writeln!(output, "Performance")?;
        writeln!(output, "{}", RULE)?;

        Self::format_bars(output, "Execution time (s)", &report.performance)?;
        if let Some(speedup) = report.speedup {
            writeln!(output, "  Speedup: {}x", format_bounded(speedup))?;
        }
        writeln!(output)?;

        for variant in [Variant::Unoptimized, Variant::Optimized] {
            if let Some(stats) = report.time_stats(variant) {
                Self::format_series_stats(output, variant.label(), stats)?;
            }
        }
        Ok(())
    }

    fn format_series_stats(output: &mut String, label: &str, stats: &SeriesStats) -> Result<()> {
        writeln!(output, "  {} timings ({} runs):", label, stats.count)?;
        writeln!(
            output,
            "    Mean: {}, Median: {}, Min: {}, Max: {}",
            format_bounded(stats.mean),
            format_bounded(stats.median),
            format_bounded(stats.min),
            format_bounded(stats.max)
        )?;
        writeln!(
            output,
            "    StdDev: {}, CV: {:.2}%, Q1: {}, Q3: {}",
            format_bounded(stats.std_dev),
            stats.coefficient_of_variation() * 100.0,
            format_bounded(stats.q1),
            format_bounded(stats.q3)
        )?;
        writeln!(output)?;
        Ok(())
    }

    fn format_accuracy(output: &mut String, report: &MetricsReport) -> Result<()> {
        writeln!(output, "{}", RULE)?;
        writeln!(output, "Accuracy")?;
        writeln!(output, "{}", RULE)?;

        Self::format_bars(output, "ULPs", &report.ulps)?;
        Self::format_bars(output, "Relative error", &report.relative_error)?;
        Self::format_bars(output, "Absolute difference", &report.absolute_difference)?;

        if !report.reference_values.is_empty() {
            writeln!(output, "  Result values:")?;
            for reference in &report.reference_values {
                writeln!(output, "    {:<18} {}", reference.label, reference.value)?;
            }
            writeln!(output)?;
        }

        if let Some(stability) = &report.result_stability {
            let status = if stability.consistent {
                "✓ consistent"
            } else {
                "✗ varies"
            };
            writeln!(
                output,
                "  Result stability over {} runs: {} (min {}, max {}, mean {})",
                stability.count,
                status,
                format_bounded(stability.min),
                format_bounded(stability.max),
                format_bounded(stability.mean)
            )?;
            writeln!(output)?;
        }
        Ok(())
    }

    fn format_bars(output: &mut String, title: &str, bars: &[ChartBar]) -> Result<()> {
        writeln!(output, "  {}:", title)?;
        for bar in bars {
            let value = format_bounded(bar.value);
            writeln!(output, "    {:<20} {:>12}", bar.label, value)?;
        }
        Ok(())
    }

    fn format_distribution(
        output: &mut String,
        distribution: &DistributionComparison,
    ) -> Result<()> {
        let Some(histogram) = &distribution.histogram else {
            return Ok(());
        };

        writeln!(output, "{}", RULE)?;
        writeln!(output, "Timing Distribution (outliers removed)")?;
        writeln!(output, "{}", RULE)?;

        Self::format_outliers(output, "Optimized", distribution.bounds_a.as_ref())?;
        Self::format_outliers(output, "Unoptimized", distribution.bounds_b.as_ref())?;
        writeln!(output)?;

        let peak = histogram
            .buckets
            .iter()
            .map(|bucket| bucket.count_a.max(bucket.count_b))
            .max()
            .unwrap_or(0)
            .max(1);
        let scale = |count: usize| (count * HISTOGRAM_WIDTH).div_ceil(peak);

        writeln!(output, "  # optimized   = unoptimized")?;
        for bucket in &histogram.buckets {
            let center = format_bounded(bucket.range_center);
            writeln!(
                output,
                "  {:>12} │ {:<w$} {}",
                center,
                "#".repeat(scale(bucket.count_a)),
                bucket.count_a,
                w = HISTOGRAM_WIDTH
            )?;
            writeln!(
                output,
                "  {:>12} │ {:<w$} {}",
                "",
                "=".repeat(scale(bucket.count_b)),
                bucket.count_b,
                w = HISTOGRAM_WIDTH
            )?;
        }
        Ok(())
    }

    fn format_outliers(
        output: &mut String,
        label: &str,
        bounds: Option<&OutlierBounds>,
    ) -> Result<()> {
        if let Some(bounds) = bounds {
            writeln!(
                output,
                "  {}: kept {}, outliers {} (fences {} .. {})",
                label,
                bounds.non_outliers.len(),
                bounds.outliers.len(),
                format_bounded(bounds.lower_bound),
                format_bounded(bounds.upper_bound)
            )?;
        }
        Ok(())
    }
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|cell| cell.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}
