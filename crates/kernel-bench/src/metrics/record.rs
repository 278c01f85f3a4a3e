//! Typed metrics records
//!
//! The benchmark driver writes its single-run summary as `metric,value,description`
//! rows. Keys the crate knows about map to [`MetricKey`]; anything else is
//! kept verbatim in an extra bucket so no metric is ever lost.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// A metric value as written by the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// Classify a raw CSV field: `true`/`false` (any case), then numbers,
    /// then text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            return MetricValue::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return MetricValue::Bool(false);
        }
        match trimmed.parse::<f64>() {
            Ok(number) if !number.is_nan() => MetricValue::Number(number),
            _ => MetricValue::Text(trimmed.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(number) => Some(*number),
            _ => None,
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl From<bool> for MetricValue {
    fn from(value: bool) -> Self {
        MetricValue::Bool(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Bool(value) => write!(f, "{}", value),
            MetricValue::Number(value) => write!(f, "{}", value),
            MetricValue::Text(value) => f.write_str(value),
        }
    }
}

macro_rules! metric_keys {
    ($($variant:ident => $key:literal, $description:literal;)+) => {
        /// Metric keys with a fixed meaning.
        ///
        /// Declaration order is the display order of metric tables.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum MetricKey {
            $($variant,)+
        }

        impl MetricKey {
            pub const ALL: &'static [MetricKey] = &[$(MetricKey::$variant,)+];

            /// Key as written in metric reports.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(MetricKey::$variant => $key,)+
                }
            }

            /// Human-readable description for tables.
            pub fn description(&self) -> &'static str {
                match self {
                    $(MetricKey::$variant => $description,)+
                }
            }

            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some(MetricKey::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

metric_keys! {
    // Configuration
    Dimension => "dimension", "Array dimension size";
    FloatType => "float_type", "Type of floating point values";
    IncludeNegatives => "include_negatives", "Whether negative values were included";
    Precision => "precision", "MPFR precision bits";
    Iterations => "iterations", "Number of benchmark iterations";

    // Single-run performance
    UnoptTime => "unopt_time", "Unoptimized execution time (seconds)";
    OptTime => "opt_time", "Optimized execution time (seconds)";
    MpfrTime => "mpfr_time", "MPFR execution time (seconds)";
    Speedup => "speedup", "Optimization speedup ratio";

    // Multi-run performance
    UnoptMeanTime => "unopt_mean_time", "Unoptimized mean execution time (seconds)";
    UnoptMedianTime => "unopt_median_time", "Unoptimized median execution time (seconds)";
    UnoptMinTime => "unopt_min_time", "Unoptimized minimum execution time (seconds)";
    UnoptMaxTime => "unopt_max_time", "Unoptimized maximum execution time (seconds)";
    UnoptTimeVariance => "unopt_time_variance", "Unoptimized execution time variance";
    UnoptTimeStddev => "unopt_time_stddev", "Unoptimized execution time standard deviation";
    UnoptTimeQ1 => "unopt_time_q1", "Unoptimized execution time 25% quantile";
    UnoptTimeQ3 => "unopt_time_q3", "Unoptimized execution time 75% quantile";
    OptMeanTime => "opt_mean_time", "Optimized mean execution time (seconds)";
    OptMedianTime => "opt_median_time", "Optimized median execution time (seconds)";
    OptMinTime => "opt_min_time", "Optimized minimum execution time (seconds)";
    OptMaxTime => "opt_max_time", "Optimized maximum execution time (seconds)";
    OptTimeVariance => "opt_time_variance", "Optimized execution time variance";
    OptTimeStddev => "opt_time_stddev", "Optimized execution time standard deviation";
    OptTimeQ1 => "opt_time_q1", "Optimized execution time 25% quantile";
    OptTimeQ3 => "opt_time_q3", "Optimized execution time 75% quantile";
    MeanSpeedup => "mean_speedup", "Mean speedup (unopt/opt)";
    MedianSpeedup => "median_speedup", "Median speedup (unopt/opt)";

    // Result values
    UnoptValue => "unopt_value", "Unoptimized result value";
    OptValue => "opt_value", "Optimized result value";
    MpfrValue => "mpfr_value", "MPFR reference value";
    OptMinResult => "opt_min_result", "Optimized minimum result";
    OptMaxResult => "opt_max_result", "Optimized maximum result";
    OptMeanResult => "opt_mean_result", "Optimized mean result";
    OptMedianResult => "opt_median_result", "Optimized median result";
    OptResultVariance => "opt_result_variance", "Optimized result variance";
    OptResultStddev => "opt_result_stddev", "Optimized result standard deviation";
    OptResultQ1 => "opt_result_q1", "Optimized result 25% quantile";
    OptResultQ3 => "opt_result_q3", "Optimized result 75% quantile";

    // Accuracy against the reference
    AbsDiffUnoptMpfr => "abs_diff_unopt_mpfr", "Absolute difference: |Unopt - MPFR|";
    AbsDiffOptMpfr => "abs_diff_opt_mpfr", "Absolute difference: |Opt - MPFR|";
    AbsDiffOptUnopt => "abs_diff_opt_unopt", "Absolute difference: |Opt - Unopt|";
    RelDiffUnoptMpfr => "rel_diff_unopt_mpfr", "Relative difference: |Unopt - MPFR|/|MPFR|";
    RelDiffOptMpfr => "rel_diff_opt_mpfr", "Relative difference: |Opt - MPFR|/|MPFR|";
    UlpsUnoptMpfr => "ulps_unopt_mpfr", "ULPs difference: Unopt vs MPFR";
    UlpsOptMpfr => "ulps_opt_mpfr", "ULPs difference: Opt vs MPFR";
    UnoptAbsError => "unopt_abs_error", "Absolute error: |Unopt - MPFR|";
    OptMeanAbsError => "opt_mean_abs_error", "Absolute error: |Opt (mean) - MPFR|";
    UnoptRelError => "unopt_rel_error", "Relative error: |Unopt - MPFR|/|MPFR|";
    OptMeanRelError => "opt_mean_rel_error", "Relative error: |Opt (mean) - MPFR|/|MPFR|";
    UnoptUlps => "unopt_ulps", "ULPs difference: Unopt vs MPFR";
    OptMeanUlps => "opt_mean_ulps", "ULPs difference: Opt (mean) vs MPFR";
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat metric map with typed known keys and an extra bucket.
///
/// Iterates known keys in declaration order, then extra keys in lexical
/// order. Serialises as a single flat JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsRecord {
    known: BTreeMap<MetricKey, MetricValue>,
    extra: BTreeMap<String, MetricValue>,
}

impl MetricsRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert by raw key, routing known keys to their typed slot.
    pub fn insert(&mut self, key: &str, value: impl Into<MetricValue>) {
        match MetricKey::from_key(key) {
            Some(known) => {
                self.known.insert(known, value.into());
            }
            None => {
                self.extra.insert(key.to_string(), value.into());
            }
        }
    }

    pub fn set(&mut self, key: MetricKey, value: impl Into<MetricValue>) {
        self.known.insert(key, value.into());
    }

    pub fn get(&self, key: MetricKey) -> Option<&MetricValue> {
        self.known.get(&key)
    }

    /// Numeric value of a known key; `None` for missing or non-numeric values.
    pub fn number(&self, key: MetricKey) -> Option<f64> {
        self.get(key).and_then(MetricValue::as_f64)
    }

    /// Look up any key, known or extra.
    pub fn get_raw(&self, key: &str) -> Option<&MetricValue> {
        match MetricKey::from_key(key) {
            Some(known) => self.known.get(&known),
            None => self.extra.get(key),
        }
    }

    pub fn contains(&self, key: MetricKey) -> bool {
        self.known.contains_key(&key)
    }

    pub fn extra(&self) -> &BTreeMap<String, MetricValue> {
        &self.extra
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.known
            .iter()
            .map(|(key, value)| (key.as_str(), value))
            .chain(self.extra.iter().map(|(key, value)| (key.as_str(), value)))
    }

    pub fn len(&self) -> usize {
        self.known.len() + self.extra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty() && self.extra.is_empty()
    }
}

impl Serialize for MetricsRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Parse the driver's single-run summary report.
///
/// The header line is skipped. Each row contributes field 0 as the key and
/// field 1 as the value; further fields (the description) are ignored. Rows
/// with an empty key or no value field are skipped. Later rows overwrite
/// earlier ones.
///
/// # Examples
///
/// ```
/// use kernel_bench::metrics::{parse_metrics_csv, MetricKey, MetricValue};
///
/// let record = parse_metrics_csv("metric,value,description\nopt_time,0.5,Optimized\ninclude_negatives,false,x\n");
/// assert_eq!(record.number(MetricKey::OptTime), Some(0.5));
/// assert_eq!(record.get(MetricKey::IncludeNegatives), Some(&MetricValue::Bool(false)));
/// ```
pub fn parse_metrics_csv(text: &str) -> MetricsRecord {
    let mut record = MetricsRecord::new();

    for (line_no, line) in text.trim().lines().enumerate().skip(1) {
        let mut fields = line.split(',');
        let key = fields.next().map(str::trim).unwrap_or_default();
        let Some(raw_value) = fields.next() else {
            debug!(line = line_no + 1, "Skipping metric row without a value");
            continue;
        };
        if key.is_empty() {
            debug!(line = line_no + 1, "Skipping metric row without a key");
            continue;
        }
        record.insert(key, MetricValue::parse(raw_value));
    }

    debug!(metrics = record.len(), "Parsed metrics report");
    record
}
