//! Driver generation payload
//!
//! [`DriverGenOptions`] is what the external generation/build step receives:
//! which kernels to compare, how large and how often to run them, and the
//! optional per-input configuration derived in the parent module.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FloatCategory, InputConfigPayload, InputConfiguration};
use crate::config::DriverDefaults;
use crate::error::DriverOptionsError;

/// Minimum reference precision accepted by the generator.
pub const MIN_PRECISION_BITS: u32 = 2;

/// Options for one driver generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverGenOptions {
    /// Unoptimized kernel source (required)
    #[serde(rename = "unoptRiseFile")]
    pub unopt_kernel: String,
    /// Optimized kernel source, when comparing two variants
    #[serde(
        rename = "optRiseFile",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub opt_kernel: Option<String>,
    pub dimension: u64,
    pub iterations: u32,
    /// Reference precision in bits
    pub precision: u32,
    pub output_file: String,
    pub float_type: FloatCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub include_negatives: bool,
    pub metrics_file: String,
    #[serde(default)]
    pub skip_compilation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_config: Option<InputConfigPayload>,
}

impl DriverGenOptions {
    /// Options for `unopt_kernel` with every other field taken from `defaults`.
    pub fn from_defaults(
        unopt_kernel: impl Into<String>,
        dimension: u64,
        defaults: &DriverDefaults,
    ) -> Self {
        Self {
            unopt_kernel: unopt_kernel.into(),
            opt_kernel: None,
            dimension,
            iterations: defaults.iterations,
            precision: defaults.precision,
            output_file: defaults.output_file.clone(),
            float_type: defaults.float_type,
            prefix: None,
            include_negatives: defaults.include_negatives,
            metrics_file: defaults.metrics_file.clone(),
            skip_compilation: false,
            input_config: None,
        }
    }

    #[must_use]
    pub fn with_opt_kernel(mut self, opt_kernel: impl Into<String>) -> Self {
        self.opt_kernel = Some(opt_kernel.into());
        self
    }

    #[must_use]
    pub fn with_input_config(mut self, config: &InputConfiguration) -> Self {
        self.input_config = Some(config.to_payload());
        self
    }

    /// Check the constraints the generator relies on.
    pub fn validate(&self) -> Result<(), DriverOptionsError> {
        if self.unopt_kernel.trim().is_empty() {
            return Err(DriverOptionsError::MissingKernelFile);
        }
        if self.dimension == 0 {
            return Err(DriverOptionsError::NonPositiveDimension);
        }
        if self.iterations == 0 {
            return Err(DriverOptionsError::NonPositiveIterations);
        }
        if self.precision < MIN_PRECISION_BITS {
            return Err(DriverOptionsError::PrecisionTooLow(self.precision));
        }
        Ok(())
    }

    /// Multiply the dimension by `factor`, rounding and keeping it at least 1.
    pub fn scale_dimension(&mut self, factor: f64) {
        let scaled = (self.dimension as f64 * factor).round();
        self.dimension = if scaled.is_finite() && scaled >= 1.0 {
            scaled as u64
        } else {
            1
        };
        debug!(dimension = self.dimension, factor, "Scaled dimension");
    }

    /// Shift the iteration count by `delta`, keeping it at least 1.
    pub fn adjust_iterations(&mut self, delta: i64) {
        let adjusted = i64::from(self.iterations).saturating_add(delta);
        self.iterations = adjusted.clamp(1, i64::from(u32::MAX)) as u32;
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
