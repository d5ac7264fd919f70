use crate::core::altitude::AltitudeAxis;
use crate::core::coordinate::GeoCoordinate;
use crate::core::grid::MeasurementGrid;
use crate::types::{Extinction, MaskedMatrix, MaskedValue, ProfileError, ProfileResult};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Level 2 profile variable holding the 532 nm extinction coefficient
pub const EXTINCTION_COEFFICIENT_532: &str = "Extinction_Coefficient_532";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";

/// Instrument-reported valid range of a variable, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidRange {
    pub low: f64,
    pub high: f64,
}

impl ValidRange {
    /// Bounds may be given in either order
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    /// Readings outside the range, or not finite, become missing
    pub fn mask_value(&self, value: Extinction) -> MaskedValue {
        (value.is_finite() && self.contains(value as f64)).then_some(value)
    }

    pub fn mask(&self, raw: &Array2<Extinction>) -> MaskedMatrix {
        raw.mapv(|v| self.mask_value(v))
    }

    /// Parallel masking using Rayon
    #[cfg(feature = "parallel")]
    pub fn mask_parallel(&self, raw: &Array2<Extinction>) -> MaskedMatrix {
        ndarray::Zip::from(raw).par_map_collect(|&v| self.mask_value(v))
    }
}

/// Parses the `valid_range` attribute, e.g. `"0.0...1.25"`
impl FromStr for ValidRange {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split("...").map(str::trim).collect();
        if parts.len() != 2 {
            return Err(ProfileError::InvalidFormat(format!(
                "Valid range '{}' is not of the form 'low...high'",
                s
            )));
        }

        let parse = |part: &str| -> ProfileResult<f64> {
            let bound = part.parse::<f64>().map_err(|e| {
                ProfileError::InvalidFormat(format!("Invalid valid range bound '{}': {}", part, e))
            })?;
            if !bound.is_finite() {
                return Err(ProfileError::InvalidFormat(format!(
                    "Valid range bound '{}' is not finite",
                    part
                )));
            }
            Ok(bound)
        };
        Ok(Self::new(parse(parts[0])?, parse(parts[1])?))
    }
}

/// Decoded profile variables as handed over by a file reader.
///
/// Latitude and longitude come as 2D arrays (one row per profile); only the
/// first column is used. Coordinates outside their own valid range become NaN
/// and drop out of every latitude selection.
#[derive(Debug, Clone)]
pub struct ProfileColumns {
    pub variable: String,
    pub latitude: Array2<f64>,
    pub longitude: Array2<f64>,
    pub extinction: Array2<Extinction>,
    pub extinction_range: ValidRange,
    pub latitude_range: Option<ValidRange>,
    pub longitude_range: Option<ValidRange>,
}

impl ProfileColumns {
    /// Columns for the 532 nm extinction coefficient
    pub fn extinction_532(
        latitude: Array2<f64>,
        longitude: Array2<f64>,
        extinction: Array2<Extinction>,
        extinction_range: ValidRange,
    ) -> Self {
        Self {
            variable: EXTINCTION_COEFFICIENT_532.to_string(),
            latitude,
            longitude,
            extinction,
            extinction_range,
            latitude_range: None,
            longitude_range: None,
        }
    }

    /// Also mask latitude and longitude against their `valid_range` attributes
    pub fn with_coordinate_ranges(mut self, latitude_range: ValidRange, longitude_range: ValidRange) -> Self {
        self.latitude_range = Some(latitude_range);
        self.longitude_range = Some(longitude_range);
        self
    }
}

/// Build a position-major curtain on the standard altitude grid
pub fn assemble_extinction_grid(columns: &ProfileColumns) -> ProfileResult<MeasurementGrid<GeoCoordinate>> {
    log::info!("Assembling {} curtain", columns.variable);

    let latitudes = first_column(&columns.latitude, LATITUDE, columns.latitude_range)?;
    let longitudes = first_column(&columns.longitude, LONGITUDE, columns.longitude_range)?;
    if latitudes.len() != longitudes.len() {
        return Err(ProfileError::InvalidFormat(format!(
            "{} has {} samples but {} has {}",
            LATITUDE,
            latitudes.len(),
            LONGITUDE,
            longitudes.len()
        )));
    }

    let positions: Vec<GeoCoordinate> = latitudes
        .iter()
        .zip(&longitudes)
        .map(|(&lat, &lon)| GeoCoordinate::new(lat, lon))
        .collect();

    #[cfg(feature = "parallel")]
    let masked = columns.extinction_range.mask_parallel(&columns.extinction);
    #[cfg(not(feature = "parallel"))]
    let masked = columns.extinction_range.mask(&columns.extinction);

    let grid = MeasurementGrid::new(masked, positions, AltitudeAxis::standard())?;
    log::debug!(
        "Curtain shape: {:?}, {} of {} readings inside {:?}",
        grid.dim(),
        grid.valid_count(),
        columns.extinction.len(),
        columns.extinction_range
    );
    Ok(grid)
}

fn first_column(values: &Array2<f64>, name: &str, range: Option<ValidRange>) -> ProfileResult<Vec<f64>> {
    if values.ncols() == 0 {
        return Err(ProfileError::InvalidFormat(format!("{} has no columns", name)));
    }

    let column = values.column(0);
    let Some(range) = range else {
        return Ok(column.to_vec());
    };

    let masked: Vec<f64> = column
        .iter()
        .map(|&v| if range.contains(v) { v } else { f64::NAN })
        .collect();
    let dropped = masked.iter().filter(|v| v.is_nan()).count();
    if dropped > 0 {
        log::debug!("{} {} samples outside {:?}", dropped, name, range);
    }
    Ok(masked)
}
