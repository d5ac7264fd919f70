use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Extinction coefficient at 532 nm (km^-1)
pub type Extinction = f32;

/// A matrix cell; `None` marks a masked (invalid or missing) reading
pub type MaskedValue = Option<Extinction>;

/// 2D masked measurement matrix
pub type MaskedMatrix = Array2<MaskedValue>;

/// Unit tag carried by an altitude axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AltitudeUnit {
    Kilometers,
}

impl std::fmt::Display for AltitudeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AltitudeUnit::Kilometers => write!(f, "Km"),
        }
    }
}

/// Logical axis of a measurement grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortAxis {
    /// Along-track position (latitude / coordinate)
    #[default]
    Position,
    /// Altitude above mean sea level
    Altitude,
}

/// Storage order of a measurement grid matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisOrder {
    /// Rows are positions, columns are altitudes (as delivered by the instrument)
    PositionMajor,
    /// Rows are altitudes, columns are positions (display order)
    AltitudeMajor,
}

impl AxisOrder {
    pub fn flipped(self) -> Self {
        match self {
            AxisOrder::PositionMajor => AxisOrder::AltitudeMajor,
            AxisOrder::AltitudeMajor => AxisOrder::PositionMajor,
        }
    }
}

/// Error types for profile processing
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error(
        "Dimension mismatch: matrix is {rows}x{cols} but axes require {expected_rows}x{expected_cols}"
    )]
    DimensionMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

/// Result type for profile operations
pub type ProfileResult<T> = Result<T, ProfileError>;
