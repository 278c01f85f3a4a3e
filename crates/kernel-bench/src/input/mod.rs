//! Input configuration derivation
//!
//! Turns a [`StructureDescriptor`] plus a size per dimension into concrete,
//! user-editable settings for every kernel input. Every edit is a pure
//! function from the previous configuration to a new one; the original value
//! is left untouched, so a rejected edit simply means "keep the old one".
//!
//! Each input is stored together with its shape in an [`InputSlot`], so shapes
//! and settings can never drift out of alignment.
//!
//! # Example
//!
//! ```
//! use kernel_bench::input::{ArrayField, InputConfiguration};
//! use kernel_bench::structure::StructureDescriptor;
//!
//! # fn example() -> Result<(), kernel_bench::error::InputConfigError> {
//! let descriptor = StructureDescriptor::parse("Dimensions: a, b\nInput sizes: a * b, b\n");
//! let config = InputConfiguration::derive_initial(&descriptor, 4);
//! let config = config.update_dimension("b", 8)?;
//! assert_eq!(config.slots()[0].item.size(), Some(32));
//! assert_eq!(config.slots()[1].item.size(), Some(8));
//!
//! let config = config.update_array_field(1, ArrayField::IncludeNegatives(true))?;
//! let payload = config.to_payload();
//! assert_eq!(payload.dimensions["a"], 4);
//! # Ok(())
//! # }
//! ```

pub mod driver;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::InputConfigError;
use crate::structure::{product_tokens, InputShape, StructureDescriptor};

pub use driver::DriverGenOptions;

/// Value-generation policy for an array input.
///
/// Interpreted by the external value generator; recorded here only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatCategory {
    #[default]
    Normal,
    Subnormal,
    Mixed,
    Magnitude,
}

impl FloatCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FloatCategory::Normal => "normal",
            FloatCategory::Subnormal => "subnormal",
            FloatCategory::Mixed => "mixed",
            FloatCategory::Magnitude => "magnitude",
        }
    }
}

/// Settings for one array input.
///
/// When explicit values are present they are authoritative for value
/// generation and `size` always equals their count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayInputConfig {
    size: u64,
    #[serde(rename = "float_type", default)]
    float_category: FloatCategory,
    #[serde(default)]
    include_negatives: bool,
    #[serde(rename = "values", default, skip_serializing_if = "Option::is_none")]
    explicit_values: Option<Vec<f64>>,
}

impl ArrayInputConfig {
    pub fn new(size: u64) -> Self {
        Self {
            size,
            float_category: FloatCategory::default(),
            include_negatives: false,
            explicit_values: None,
        }
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn float_category(&self) -> FloatCategory {
        self.float_category
    }

    pub fn include_negatives(&self) -> bool {
        self.include_negatives
    }

    pub fn explicit_values(&self) -> Option<&[f64]> {
        self.explicit_values.as_deref()
    }

    fn resize(&mut self, size: u64) {
        // Explicit values pin the size to their count.
        if self.explicit_values.is_none() {
            self.size = size;
        }
    }
}

/// Settings for a single input.
///
/// Serialises as the bare number or the settings object the external
/// generation step expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputConfigItem {
    /// A bare scalar pinned by the user (or a scalar input's value).
    /// Never resized when dimensions change.
    Override(f64),
    /// Array settings whose size follows the shape's dimension product.
    Derived(ArrayInputConfig),
}

impl InputConfigItem {
    /// Array size, for derived items.
    pub fn size(&self) -> Option<u64> {
        match self {
            InputConfigItem::Override(_) => None,
            InputConfigItem::Derived(array) => Some(array.size),
        }
    }

    pub fn as_array(&self) -> Option<&ArrayInputConfig> {
        match self {
            InputConfigItem::Override(_) => None,
            InputConfigItem::Derived(array) => Some(array),
        }
    }

    pub fn is_override(&self) -> bool {
        matches!(self, InputConfigItem::Override(_))
    }
}

/// One input's shape paired with its settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSlot {
    pub shape: InputShape,
    pub item: InputConfigItem,
}

/// Size assigned to a declared dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSize {
    pub name: String,
    pub size: u64,
}

/// A single-field edit to an array input.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayField {
    /// Set the generated array length. Clears explicit values.
    Size(u64),
    FloatCategory(FloatCategory),
    IncludeNegatives(bool),
    /// Set or clear literal values. An empty list clears them.
    ExplicitValues(Option<Vec<f64>>),
}

/// Concrete input configuration for one kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfiguration {
    dimensions: Vec<DimensionSize>,
    slots: Vec<InputSlot>,
    output_expression: String,
}

impl InputConfiguration {
    /// Assign `default_dimension_size` to every declared dimension and size
    /// every array input from it. Scalar inputs start at `0`.
    pub fn derive_initial(descriptor: &StructureDescriptor, default_dimension_size: u64) -> Self {
        let default_size = default_dimension_size.max(1);
        let dimensions: Vec<DimensionSize> = descriptor
            .dimensions
            .iter()
            .map(|name| DimensionSize {
                name: name.clone(),
                size: default_size,
            })
            .collect();

        let mut config = Self {
            dimensions,
            slots: Vec::with_capacity(descriptor.inputs.len()),
            output_expression: descriptor.output_size.clone(),
        };

        for shape in &descriptor.inputs {
            let item = if shape.is_array() {
                InputConfigItem::Derived(ArrayInputConfig::new(config.nominal_size(shape)))
            } else {
                InputConfigItem::Override(0.0)
            };
            config.slots.push(InputSlot {
                shape: shape.clone(),
                item,
            });
        }

        debug!(
            dimensions = config.dimensions.len(),
            inputs = config.slots.len(),
            default_size,
            "Derived initial input configuration"
        );
        config
    }

    pub fn dimensions(&self) -> &[DimensionSize] {
        &self.dimensions
    }

    pub fn dimension(&self, name: &str) -> Option<u64> {
        self.dimensions
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.size)
    }

    pub fn slots(&self) -> &[InputSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Product of the dimension sizes named by `shape`.
    ///
    /// Tokens that are not declared dimensions count as `1`.
    pub fn nominal_size(&self, shape: &InputShape) -> u64 {
        self.product(&shape.dimension_tokens())
    }

    /// Output size, when the descriptor declared one.
    pub fn output_size(&self) -> Option<u64> {
        if self.output_expression.is_empty() {
            None
        } else {
            Some(self.product(&product_tokens(&self.output_expression)))
        }
    }

    /// Change one dimension and resize every derived array input.
    ///
    /// Fails (leaving `self` as it was) when `name` is not a declared
    /// dimension or `size` is zero. Bare scalar overrides keep their value.
    pub fn update_dimension(&self, name: &str, size: u64) -> Result<Self, InputConfigError> {
        if !self.dimensions.iter().any(|d| d.name == name) {
            warn!(dimension = name, "Ignoring edit to undeclared dimension");
            return Err(InputConfigError::UnknownDimension(name.to_string()));
        }
        if size == 0 {
            warn!(dimension = name, "Ignoring zero dimension size");
            return Err(InputConfigError::ZeroDimension(name.to_string()));
        }

        let mut next = self.clone();
        for dimension in next.dimensions.iter_mut().filter(|d| d.name == name) {
            dimension.size = size;
        }

        for index in 0..next.slots.len() {
            if !next.slots[index].shape.is_array() {
                continue;
            }
            let nominal = next.nominal_size(&next.slots[index].shape);
            if let InputConfigItem::Derived(array) = &mut next.slots[index].item {
                array.resize(nominal);
            }
        }

        debug!(dimension = name, size, "Updated dimension");
        Ok(next)
    }

    /// Edit one field of the array settings at `index`.
    ///
    /// A slot holding a bare scalar is first converted into array settings
    /// seeded with the shape's nominal size.
    pub fn update_array_field(
        &self,
        index: usize,
        field: ArrayField,
    ) -> Result<Self, InputConfigError> {
        let slot = self.slot(index)?;
        if let ArrayField::Size(0) = field {
            warn!(index, "Ignoring zero array size");
            return Err(InputConfigError::ZeroSize(index));
        }

        let mut array = match &slot.item {
            InputConfigItem::Derived(array) => array.clone(),
            InputConfigItem::Override(_) => ArrayInputConfig::new(self.nominal_size(&slot.shape)),
        };

        match field {
            ArrayField::Size(size) => {
                array.size = size;
                array.explicit_values = None;
            }
            ArrayField::FloatCategory(category) => array.float_category = category,
            ArrayField::IncludeNegatives(include) => array.include_negatives = include,
            ArrayField::ExplicitValues(Some(values)) if !values.is_empty() => {
                array.size = values.len() as u64;
                array.explicit_values = Some(values);
            }
            ArrayField::ExplicitValues(_) => {
                array.explicit_values = None;
                array.size = self.nominal_size(&slot.shape);
            }
        }

        let mut next = self.clone();
        next.slots[index].item = InputConfigItem::Derived(array);
        Ok(next)
    }

    /// Pin the input at `index` to a bare scalar value.
    pub fn set_scalar(&self, index: usize, value: f64) -> Result<Self, InputConfigError> {
        self.slot(index)?;
        let mut next = self.clone();
        next.slots[index].item = InputConfigItem::Override(value);
        Ok(next)
    }

    /// Plain nested form handed to the external generation step.
    pub fn to_payload(&self) -> InputConfigPayload {
        InputConfigPayload {
            dimensions: self
                .dimensions
                .iter()
                .map(|d| (d.name.clone(), d.size))
                .collect(),
            inputs: self.slots.iter().map(|slot| slot.item.clone()).collect(),
            output: self.output_size().map(|size| OutputConfig { size }),
        }
    }

    fn slot(&self, index: usize) -> Result<&InputSlot, InputConfigError> {
        let len = self.slots.len();
        self.slots.get(index).ok_or_else(|| {
            warn!(index, len, "Ignoring edit to missing input");
            InputConfigError::IndexOutOfRange { index, len }
        })
    }

    fn product(&self, tokens: &[&str]) -> u64 {
        tokens
            .iter()
            .map(|token| self.dimension(token).unwrap_or(1))
            .fold(1u64, |acc, size| acc.saturating_mul(size))
    }
}

/// Output section of the generation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub size: u64,
}

/// Serialisable input configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfigPayload {
    pub dimensions: BTreeMap<String, u64>,
    pub inputs: Vec<InputConfigItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}
