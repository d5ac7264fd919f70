use crate::core::altitude::AltitudeAxis;
use crate::core::coordinate::GeoCoordinate;
use crate::types::{AxisOrder, MaskedMatrix, MaskedValue, ProfileError, ProfileResult, SortAxis};
use ndarray::Array2;
use std::cmp::Ordering;

/// Value that can label the position axis of a [`MeasurementGrid`]
pub trait PositionValue: Clone {
    /// Numeric value used by range selection (latitude)
    fn as_number(&self) -> f64;

    /// Ascending sort order
    fn cmp_position(&self, other: &Self) -> Ordering;
}

impl PositionValue for GeoCoordinate {
    fn as_number(&self) -> f64 {
        GeoCoordinate::as_number(self)
    }

    fn cmp_position(&self, other: &Self) -> Ordering {
        self.cmp_key(other)
    }
}

/// Bare latitude in degrees
impl PositionValue for f64 {
    fn as_number(&self) -> f64 {
        *self
    }

    fn cmp_position(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

/// Lidar curtain: a masked extinction matrix bound to a position axis and an
/// altitude axis.
///
/// Every operation returns a new grid; missing cells are carried to their new
/// location and never turned into numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementGrid<P: PositionValue = GeoCoordinate> {
    matrix: MaskedMatrix,
    positions: Vec<P>,
    altitudes: AltitudeAxis,
    order: AxisOrder,
}

impl<P: PositionValue> MeasurementGrid<P> {
    /// Create a position-major grid (rows = positions, columns = altitudes)
    pub fn new(matrix: MaskedMatrix, positions: Vec<P>, altitudes: AltitudeAxis) -> ProfileResult<Self> {
        Self::from_parts(matrix, positions, altitudes, AxisOrder::PositionMajor)
    }

    /// Create a grid whose matrix is stored in the given axis order
    pub fn from_parts(
        matrix: MaskedMatrix,
        positions: Vec<P>,
        altitudes: AltitudeAxis,
        order: AxisOrder,
    ) -> ProfileResult<Self> {
        let (expected_rows, expected_cols) = match order {
            AxisOrder::PositionMajor => (positions.len(), altitudes.len()),
            AxisOrder::AltitudeMajor => (altitudes.len(), positions.len()),
        };
        let (rows, cols) = matrix.dim();
        if (rows, cols) != (expected_rows, expected_cols) {
            return Err(ProfileError::DimensionMismatch {
                expected_rows,
                expected_cols,
                rows,
                cols,
            });
        }

        Ok(Self {
            matrix,
            positions,
            altitudes,
            order,
        })
    }

    pub fn matrix(&self) -> &MaskedMatrix {
        &self.matrix
    }

    pub fn positions(&self) -> &[P] {
        &self.positions
    }

    /// Position axis as plain latitudes
    pub fn latitudes(&self) -> Vec<f64> {
        self.positions.iter().map(PositionValue::as_number).collect()
    }

    pub fn altitudes(&self) -> &AltitudeAxis {
        &self.altitudes
    }

    pub fn axis_order(&self) -> AxisOrder {
        self.order
    }

    /// Matrix shape as (rows, columns)
    pub fn dim(&self) -> (usize, usize) {
        self.matrix.dim()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Number of cells holding a valid reading
    pub fn valid_count(&self) -> usize {
        self.matrix.iter().filter(|v| v.is_some()).count()
    }

    /// Cell at the given position and altitude indices, whatever the storage order
    pub fn value_at(&self, position: usize, altitude: usize) -> Option<MaskedValue> {
        let index = match self.order {
            AxisOrder::PositionMajor => [position, altitude],
            AxisOrder::AltitudeMajor => [altitude, position],
        };
        self.matrix.get(index).copied()
    }

    /// Reorder the chosen axis ascending, permuting the matrix in lock-step.
    /// The sort is stable, so applying it twice changes nothing.
    pub fn sorted_by(&self, axis: SortAxis) -> Self {
        let position_index: Vec<usize> = (0..self.positions.len()).collect();
        let altitude_index: Vec<usize> = (0..self.altitudes.len()).collect();

        match axis {
            SortAxis::Position => {
                let mut order = position_index;
                order.sort_by(|&a, &b| self.positions[a].cmp_position(&self.positions[b]));
                self.take(&order, &altitude_index)
            }
            SortAxis::Altitude => {
                let values = self.altitudes.values();
                let mut order = altitude_index;
                order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
                self.take(&position_index, &order)
            }
        }
    }

    /// Keep positions (by latitude) and altitudes inside the inclusive bounds.
    ///
    /// Each pair may be given in either order. Empty results are valid grids.
    pub fn select_range(&self, position_bounds: (f64, f64), altitude_bounds: (f64, f64)) -> ProfileResult<Self> {
        let (pos_low, pos_high) = normalize_bounds("position", position_bounds)?;
        let (alt_low, alt_high) = normalize_bounds("altitude", altitude_bounds)?;

        let position_mask: Vec<bool> = self
            .positions
            .iter()
            .map(|p| {
                let value = p.as_number();
                pos_low <= value && value <= pos_high
            })
            .collect();
        let altitude_mask: Vec<bool> = self
            .altitudes
            .values()
            .iter()
            .map(|&alt| alt_low <= alt && alt <= alt_high)
            .collect();

        let kept_positions = mask_indices(&position_mask);
        let kept_altitudes = mask_indices(&altitude_mask);

        log::debug!(
            "Range selection [{}, {}] x [{}, {}] {}: kept {}/{} positions, {}/{} altitudes",
            pos_low,
            pos_high,
            alt_low,
            alt_high,
            self.altitudes.unit(),
            kept_positions.len(),
            self.positions.len(),
            kept_altitudes.len(),
            self.altitudes.len()
        );

        Ok(self.take(&kept_positions, &kept_altitudes))
    }

    /// Swap the storage order of the matrix; the axes keep their meaning
    pub fn transpose(&self) -> Self {
        Self {
            matrix: self.matrix.t().to_owned(),
            positions: self.positions.clone(),
            altitudes: self.altitudes.clone(),
            order: self.order.flipped(),
        }
    }

    /// Sub-grid at the given position and altitude indices, in that order
    fn take(&self, positions: &[usize], altitudes: &[usize]) -> Self {
        let (rows, cols) = match self.order {
            AxisOrder::PositionMajor => (positions, altitudes),
            AxisOrder::AltitudeMajor => (altitudes, positions),
        };
        let matrix = Array2::from_shape_fn((rows.len(), cols.len()), |(i, j)| {
            self.matrix[[rows[i], cols[j]]]
        });

        let altitude_values = self.altitudes.values();
        let altitudes = if altitudes.len() == altitude_values.len()
            && altitudes.iter().enumerate().all(|(i, &a)| i == a)
        {
            self.altitudes.clone()
        } else {
            AltitudeAxis::from_values(
                altitudes.iter().map(|&a| altitude_values[a]).collect(),
                self.altitudes.unit(),
            )
        };

        Self {
            matrix,
            positions: positions.iter().map(|&p| self.positions[p].clone()).collect(),
            altitudes,
            order: self.order,
        }
    }
}

fn normalize_bounds(name: &str, bounds: (f64, f64)) -> ProfileResult<(f64, f64)> {
    let (a, b) = bounds;
    if !a.is_finite() || !b.is_finite() {
        return Err(ProfileError::InvalidBounds(format!(
            "{} bounds must be finite, got ({}, {})",
            name, a, b
        )));
    }
    Ok((a.min(b), a.max(b)))
}

fn mask_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &keep)| keep.then_some(i))
        .collect()
}
