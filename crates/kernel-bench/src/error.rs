use thiserror::Error;

/// Rejected edits to an [`InputConfiguration`](crate::input::InputConfiguration).
///
/// The configuration the edit was applied to is never modified; callers keep
/// using it when they receive one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputConfigError {
    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),

    #[error("Dimension {0} must be positive")]
    ZeroDimension(String),

    #[error("Input index {index} out of range ({len} inputs)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Array size for input {0} must be positive")]
    ZeroSize(usize),
}

/// Validation failures for a driver generation payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverOptionsError {
    #[error("An unoptimized kernel file is required")]
    MissingKernelFile,

    #[error("Dimension must be positive")]
    NonPositiveDimension,

    #[error("Iterations must be positive")]
    NonPositiveIterations,

    #[error("Precision must be at least 2 bits, got {0}")]
    PrecisionTooLow(u32),
}
