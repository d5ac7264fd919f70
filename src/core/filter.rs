use crate::core::grid::{MeasurementGrid, PositionValue};
use crate::types::{AxisOrder, ProfileResult, SortAxis};
use serde::{Deserialize, Serialize};

/// Bounding region for curtain filtering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Latitude bounds in degrees, either order
    pub latitude_bounds: (f64, f64),
    /// Altitude bounds in km, either order
    pub altitude_bounds_km: (f64, f64),
    /// Axis sorted before selection
    pub sort_axis: SortAxis,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            latitude_bounds: (-90.0, 90.0),  // Whole track
            altitude_bounds_km: (0.0, 12.0), // Troposphere
            sort_axis: SortAxis::Position,
        }
    }
}

/// Cuts a lidar curtain down to a latitude/altitude box.
///
/// The result is always altitude-major (rows are altitudes), which is the
/// layout plotting code expects.
pub struct GridFilter {
    params: FilterParams,
}

impl GridFilter {
    /// Create a filter with default bounds
    pub fn new() -> Self {
        Self {
            params: FilterParams::default(),
        }
    }

    /// Create a filter with custom bounds
    pub fn with_params(params: FilterParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    /// Sort, select and transpose to altitude-major
    pub fn apply<P: PositionValue>(&self, grid: &MeasurementGrid<P>) -> ProfileResult<MeasurementGrid<P>> {
        filter(
            grid,
            self.params.latitude_bounds,
            self.params.altitude_bounds_km,
            self.params.sort_axis,
        )
    }
}

impl Default for GridFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// `grid.sorted_by(sort_axis).select_range(..).transpose()`, starting from the
/// position-major layout whatever the input order.
pub fn filter<P: PositionValue>(
    grid: &MeasurementGrid<P>,
    latitude_bounds: (f64, f64),
    altitude_bounds_km: (f64, f64),
    sort_axis: SortAxis,
) -> ProfileResult<MeasurementGrid<P>> {
    log::info!(
        "Filtering curtain to latitude {:?}, altitude {:?} km (sorted by {:?})",
        latitude_bounds,
        altitude_bounds_km,
        sort_axis
    );
    log::debug!("Input grid shape: {:?} ({:?})", grid.dim(), grid.axis_order());

    let selected = match grid.axis_order() {
        AxisOrder::PositionMajor => grid.sorted_by(sort_axis),
        AxisOrder::AltitudeMajor => grid.transpose().sorted_by(sort_axis),
    }
    .select_range(latitude_bounds, altitude_bounds_km)?;

    if selected.is_empty() {
        log::warn!("No measurements inside the requested region");
    }

    let filtered = selected.transpose();
    log::info!(
        "Filtered grid: {} altitudes x {} positions, {} valid readings",
        filtered.altitudes().len(),
        filtered.positions().len(),
        filtered.valid_count()
    );
    Ok(filtered)
}
