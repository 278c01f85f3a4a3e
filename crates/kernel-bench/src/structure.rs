//! Structural reports for benchmarked kernels
//!
//! An external analysis step prints a short report describing the shapes a
//! kernel works on:
//!
//! ```text
//! Parsed RISE file information:
//! Dimensions: n, m
//! Input sizes: n * m, m, 1
//! Output size: n
//! Single value output: False
//! ```
//!
//! [`StructureDescriptor::parse`] turns that report into typed shapes. Every
//! labelled line is optional; a report with none of them yields an empty
//! descriptor, which callers treat as "no advanced configuration available".

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

lazy_static! {
    static ref DIMENSIONS_LINE: Regex = Regex::new(r"Dimensions:[ \t]*([^\r\n]*)").unwrap();
    static ref INPUT_SIZES_LINE: Regex = Regex::new(r"Input sizes:[ \t]*([^\r\n]*)").unwrap();
    static ref OUTPUT_SIZE_LINE: Regex = Regex::new(r"Output size:[ \t]*([^\r\n]*)").unwrap();
    static ref SINGLE_VALUE_LINE: Regex =
        Regex::new(r"Single value output:[ \t]*([^\r\n]*)").unwrap();
}

/// Size expression that marks a scalar input.
pub const SCALAR_SIZE: &str = "1";

/// Shape of one kernel input.
///
/// The expression is either [`SCALAR_SIZE`] or a `*`-joined product of
/// dimension names. Whether the input is an array is derived from the
/// expression, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputShape {
    size_expression: String,
}

impl InputShape {
    pub fn new(size_expression: impl Into<String>) -> Self {
        Self {
            size_expression: size_expression.into().trim().to_string(),
        }
    }

    pub fn size_expression(&self) -> &str {
        &self.size_expression
    }

    pub fn is_array(&self) -> bool {
        self.size_expression != SCALAR_SIZE
    }

    /// Dimension names multiplied together to size this input.
    ///
    /// Scalar inputs have no tokens.
    pub fn dimension_tokens(&self) -> Vec<&str> {
        if !self.is_array() {
            return Vec::new();
        }
        product_tokens(&self.size_expression)
    }
}

/// Typed form of a kernel's structural report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureDescriptor {
    /// Declared dimension names, in report order, without duplicates
    pub dimensions: Vec<String>,
    /// One shape per kernel input, in argument order
    pub inputs: Vec<InputShape>,
    /// Output size expression (empty when the report has none)
    pub output_size: String,
    /// Whether the kernel reduces to a single value; only a literal `True`
    /// sets it
    pub single_value_output: bool,
}

impl StructureDescriptor {
    /// Parse a structural report.
    ///
    /// Never fails: missing lines leave the matching field empty (or `false`).
    ///
    /// # Examples
    ///
    /// ```
    /// use kernel_bench::structure::StructureDescriptor;
    ///
    /// let report = "Dimensions: n\nInput sizes: n, 1\nOutput size: 1\nSingle value output: True\n";
    /// let descriptor = StructureDescriptor::parse(report);
    /// assert_eq!(descriptor.dimensions, vec!["n"]);
    /// assert!(descriptor.inputs[0].is_array());
    /// assert!(!descriptor.inputs[1].is_array());
    /// assert!(descriptor.single_value_output);
    /// ```
    pub fn parse(text: &str) -> Self {
        let mut dimensions: Vec<String> = Vec::new();
        if let Some(line) = capture(&DIMENSIONS_LINE, text) {
            for name in split_list(line) {
                if !dimensions.iter().any(|d| d == name) {
                    dimensions.push(name.to_string());
                }
            }
        }

        let inputs = capture(&INPUT_SIZES_LINE, text)
            .map(|line| split_list(line).map(InputShape::new).collect())
            .unwrap_or_default();

        let output_size = capture(&OUTPUT_SIZE_LINE, text)
            .map(str::to_string)
            .unwrap_or_default();

        let single_value_output = capture(&SINGLE_VALUE_LINE, text)
            .map(|value| value == "True")
            .unwrap_or(false);

        let descriptor = Self {
            dimensions,
            inputs,
            output_size,
            single_value_output,
        };
        debug!(
            dimensions = descriptor.dimensions.len(),
            inputs = descriptor.inputs.len(),
            "Parsed structure report"
        );
        descriptor
    }

    /// Whether the report carried any shape information at all.
    pub fn has_structure(&self) -> bool {
        !self.dimensions.is_empty() || !self.inputs.is_empty()
    }

    pub fn has_dimension(&self, name: &str) -> bool {
        self.dimensions.iter().any(|d| d == name)
    }

    /// Number of array inputs.
    pub fn array_input_count(&self) -> usize {
        self.inputs.iter().filter(|shape| shape.is_array()).count()
    }
}

/// Split a `*`-joined size expression into trimmed, non-empty tokens.
pub(crate) fn product_tokens(expression: &str) -> Vec<&str> {
    expression
        .split('*')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

fn capture<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

fn split_list(line: &str) -> impl Iterator<Item = &str> {
    line.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
}
