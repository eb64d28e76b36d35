//! Geographic coordinate value type.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair.
///
/// ## Invariants
/// - latitude within [-90, 90], longitude within [-180, 180], both finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsPoint {
    lat: f64,
    lon: f64,
}

/// Validation failures raised when constructing a [`GpsPoint`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GpsValidationError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl GpsPoint {
    /// Build a coordinate pair, rejecting out-of-range or non-finite values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, GpsValidationError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GpsValidationError::LatitudeOutOfRange(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(GpsValidationError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}
