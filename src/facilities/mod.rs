//! Nearby facility search
//!
//! This module provides:
//! - The `FacilitySource` seam for spatial POI lookups
//! - An Overpass API implementation of it
//! - `NearestFacilityFinder`, which geocodes a place, fetches facilities
//!   around it and ranks them by great-circle distance

use async_trait::async_trait;

use crate::ActionError;
use crate::models::{Coordinate, Facility};

pub mod finder;
pub mod overpass;

pub use finder::{DEFAULT_TOP_N, NearestFacilityFinder, rank_facilities};
pub use overpass::OverpassClient;

/// Spatial search for tagged points of interest
#[async_trait]
pub trait FacilitySource: Send + Sync {
    /// All facilities tagged with `category` within `radius_meters` of
    /// `center`, in the order the service returned them
    async fn facilities_near(
        &self,
        center: &Coordinate,
        category: &str,
        radius_meters: u32,
    ) -> Result<Vec<Facility>, ActionError>;
}
