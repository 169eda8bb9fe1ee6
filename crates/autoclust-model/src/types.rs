#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Declared statistical nature of a data column.
///
/// The variant governs how the column is serialized in the attribute
/// descriptor and which statistical model group it joins. `Merged` marks
/// a dataset produced by the merger and never appears on an input column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    /// Continuous value with a fixed 0.0 zero-point and a relative error.
    RealScalar,
    /// Continuous value with an absolute error and no zero-point assumption.
    RealLocation,
    /// Categorical value modeled by its distinct-value count.
    Discrete,
    /// Result of merging several datasets.
    Merged,
}

impl SemanticType {
    /// True for the two continuous variants.
    pub fn is_real(self) -> bool {
        matches!(self, Self::RealScalar | Self::RealLocation)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::RealScalar => "real scalar",
            Self::RealLocation => "real location",
            Self::Discrete => "discrete",
            Self::Merged => "merged",
        };
        f.write_str(label)
    }
}

impl FromStr for SemanticType {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "real scalar" | "real-scalar" | "real_scalar" => Ok(Self::RealScalar),
            "real location" | "real-location" | "real_location" => Ok(Self::RealLocation),
            "discrete" => Ok(Self::Discrete),
            "merged" => Ok(Self::Merged),
            _ => Err(ModelError::UnknownSemanticType(value.to_string())),
        }
    }
}

/// Metadata attached to one data column.
///
/// There is exactly one `ColumnMeta` per data column and none for the
/// row-identifier pseudo-column.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColumnMeta {
    /// Declared semantic type of the column's values.
    pub semantic_type: SemanticType,
    /// Declared measurement error; relative for `RealScalar`, absolute for
    /// `RealLocation`, unused for `Discrete`.
    pub error: Option<f64>,
    /// Whether the column holds at least one missing cell.
    pub missing: bool,
}

impl ColumnMeta {
    pub fn new(semantic_type: SemanticType, error: Option<f64>) -> Self {
        Self {
            semantic_type,
            error,
            missing: false,
        }
    }
}
