//! Per-iteration series reports.
//!
//! The benchmark driver writes one CSV per series: a header line followed by
//! `index,value` rows. Rows that do not parse are skipped, never fatal.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One measured iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub iteration: i64,
    pub value: f64,
}

/// Ordered iteration values from one report.
///
/// Indices are kept as written; gaps are allowed. Aggregation only looks at
/// the values, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSeries {
    pub points: Vec<SeriesPoint>,
}

impl BenchmarkSeries {
    /// Parse an `index,value` report.
    ///
    /// The first line is always treated as the header. A row is skipped when
    /// it has fewer than two fields, its index is not an integer, or its
    /// value is not a finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// use kernel_bench::metrics::BenchmarkSeries;
    ///
    /// let series = BenchmarkSeries::parse("idx,val\n0,1.5\n1,bad\n2,3.0");
    /// assert_eq!(series.values(), vec![1.5, 3.0]);
    /// ```
    pub fn parse(text: &str) -> Self {
        let mut points = Vec::new();

        for (line_no, line) in text.trim().lines().enumerate().skip(1) {
            match parse_row(line) {
                Some(point) => points.push(point),
                None => debug!(line = line_no + 1, "Skipping malformed series row"),
            }
        }

        Self { points }
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn parse_row(line: &str) -> Option<SeriesPoint> {
    let mut fields = line.split(',');
    let index = fields.next()?.trim();
    let value = fields.next()?.trim();

    let iteration = index.parse::<i64>().ok()?;
    let value = value.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(SeriesPoint { iteration, value })
}
