use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Latitude/longitude pair used as the position axis of a lidar curtain.
///
/// The satellite walks an orbit track, so every latitude sample has exactly
/// one longitude. Sorting and range selection therefore work on latitude
/// while the longitude travels along with it.
///
/// Equality is exact and pairwise. Ordering uses [`GeoCoordinate::order_key`].
/// The longitude term lies in `[0, 1)`, so latitude only dominates when two
/// latitudes are at least 1 degree apart. Closer samples on either side of the
/// dateline can sort against their latitudes: (10.0, 179.9) orders after
/// (10.2, -179.9). Keys that round to the same value fall back to latitude,
/// then longitude. Two coordinates sharing a latitude but not a longitude are
/// unequal, yet [`GeoCoordinate::cmp_latitude`] reports them as `Equal`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "LatLon", into = "LatLon")]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
    order_key: f64,
}

#[derive(Serialize, Deserialize)]
struct LatLon {
    latitude: f64,
    longitude: f64,
}

impl From<LatLon> for GeoCoordinate {
    fn from(pair: LatLon) -> Self {
        GeoCoordinate::new(pair.latitude, pair.longitude)
    }
}

impl From<GeoCoordinate> for LatLon {
    fn from(coord: GeoCoordinate) -> Self {
        LatLon {
            latitude: coord.latitude,
            longitude: coord.longitude,
        }
    }
}

impl GeoCoordinate {
    /// Create a coordinate. Out-of-range values are accepted as-is.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            order_key: (latitude + 90.0) + (longitude + 180.0) / 361.0,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Composite sort key `(lat + 90) + (lon + 180) / 361`
    pub fn order_key(&self) -> f64 {
        self.order_key
    }

    /// Total order on the composite key, ties broken by latitude then longitude
    pub fn cmp_key(&self, other: &Self) -> Ordering {
        self.order_key
            .total_cmp(&other.order_key)
            .then_with(|| self.latitude.total_cmp(&other.latitude))
            .then_with(|| self.longitude.total_cmp(&other.longitude))
    }

    /// Order on latitude alone, ignoring longitude
    pub fn cmp_latitude(&self, other: &Self) -> Ordering {
        self.latitude.total_cmp(&other.latitude)
    }

    /// Numeric stand-in used by range predicates (the latitude)
    pub fn as_number(&self) -> f64 {
        self.latitude
    }
}

impl PartialEq for GeoCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}

impl PartialOrd for GeoCoordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.order_key.is_nan() || other.order_key.is_nan() {
            return None;
        }
        if self == other {
            return Some(Ordering::Equal);
        }
        Some(self.cmp_key(other))
    }
}

impl From<GeoCoordinate> for f64 {
    fn from(coord: GeoCoordinate) -> f64 {
        coord.as_number()
    }
}

impl std::fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
