use crate::types::{AltitudeUnit, ProfileError, ProfileResult};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Shared CALIOP altitude grid, built on first use
static STANDARD_AXIS: Lazy<AltitudeAxis> = Lazy::new(|| {
    let values = AltitudeGridBuilder::build();
    log::debug!(
        "Built standard altitude grid: {} samples, {:.2}..{:.2} km",
        values.len(),
        values.first().copied().unwrap_or(0.0),
        values.last().copied().unwrap_or(0.0)
    );
    AltitudeAxis {
        values: values.into(),
        unit: AltitudeUnit::Kilometers,
    }
});

/// Vertical sampling band: `step_km` applies from `floor_km` upwards
#[derive(Debug, Clone, Copy)]
pub struct SamplingBand {
    pub floor_km: f64,
    pub step_km: f64,
}

/// Generates the altitude bins of the CALIOP Level 2 extinction profile.
///
/// CALIOP reports 30 m vertical resolution from 0 to 8.2 km, 60 m from 8.2
/// to 20.2 km and 180 m from 20.2 to 30.1 km. The profile product bins the
/// lower two bands alike, so only two step sizes are realised here: 0.06 km
/// below 20.2 km and 0.18 km above it.
pub struct AltitudeGridBuilder;

impl AltitudeGridBuilder {
    /// Number of altitude bins in a profile
    pub const SAMPLE_COUNT: usize = 399;

    /// Sampling bands, lowest first
    pub const BANDS: [SamplingBand; 3] = [
        SamplingBand { floor_km: 0.0, step_km: 0.06 },
        SamplingBand { floor_km: 8.2, step_km: 0.06 },
        SamplingBand { floor_km: 20.2, step_km: 0.18 },
    ];

    /// Step used above `altitude_km`
    pub fn step_at(altitude_km: f64) -> f64 {
        let mut step = Self::BANDS[0].step_km;
        for band in Self::BANDS {
            if altitude_km >= band.floor_km {
                step = band.step_km;
            }
        }
        step
    }

    /// Build the altitude bins in km, highest first
    pub fn build() -> Vec<f64> {
        let mut altitude = 0.0;
        let mut altitudes = Vec::with_capacity(Self::SAMPLE_COUNT);
        altitudes.push(altitude);

        while altitudes.len() < Self::SAMPLE_COUNT {
            altitude += Self::step_at(altitude);
            altitudes.push(altitude);
        }

        // Profiles arrive highest bin first
        altitudes.reverse();
        altitudes
    }
}

/// Altitude values with their unit; cheap to clone
#[derive(Debug, Clone, PartialEq)]
pub struct AltitudeAxis {
    values: Arc<[f64]>,
    unit: AltitudeUnit,
}

impl AltitudeAxis {
    pub fn new(values: Vec<f64>, unit: AltitudeUnit) -> ProfileResult<Self> {
        if let Some(bad) = values.iter().find(|v| v.is_nan()) {
            return Err(ProfileError::InvalidFormat(format!(
                "Altitude axis contains a non-numeric value: {}",
                bad
            )));
        }
        Ok(Self {
            values: values.into(),
            unit,
        })
    }

    /// The process-wide CALIOP altitude grid
    pub fn standard() -> Self {
        STANDARD_AXIS.clone()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn unit(&self) -> AltitudeUnit {
        self.unit
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when both axes share one buffer
    pub fn shares_buffer(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }

    pub(crate) fn from_values(values: Vec<f64>, unit: AltitudeUnit) -> Self {
        Self {
            values: values.into(),
            unit,
        }
    }
}
