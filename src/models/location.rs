//! Location model for geographic coordinates

use haversine::{Location as HaversineLocation, Units, distance};
use serde::{Deserialize, Serialize};

use crate::ActionError;

/// A WGS84 coordinate pair in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    /// Latitude in decimal degrees, [-90, 90]
    latitude: f64,
    /// Longitude in decimal degrees, [-180, 180]
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting values outside the WGS84 range
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ActionError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(ActionError::unavailable(format!(
                "coordinate out of range: ({latitude}, {longitude})"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        distance(self.into(), other.into(), Units::Kilometers)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = ActionError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl From<&Coordinate> for HaversineLocation {
    fn from(value: &Coordinate) -> Self {
        HaversineLocation {
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

/// Round a distance to two decimal places
#[must_use]
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
