//! Core curtain modules: coordinates, altitude grid, measurement grid and filtering

pub mod coordinate;
pub mod altitude;
pub mod grid;
pub mod filter;

// Re-export main types
pub use coordinate::GeoCoordinate;
pub use altitude::{AltitudeAxis, AltitudeGridBuilder, SamplingBand};
pub use grid::{MeasurementGrid, PositionValue};
pub use filter::{filter, FilterParams, GridFilter};
