use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::FacilitySource;
use crate::ActionError;
use crate::location_resolver::Geocoder;
use crate::models::location::round_km;
use crate::models::{Coordinate, Facility, RankedFacility};

/// Number of facilities returned when the caller does not say otherwise
pub const DEFAULT_TOP_N: usize = 5;

/// Geocodes a place, fetches facilities around it and ranks them by distance
#[derive(Clone)]
pub struct NearestFacilityFinder {
    geocoder: Arc<dyn Geocoder>,
    source: Arc<dyn FacilitySource>,
}

impl NearestFacilityFinder {
    pub fn new(geocoder: Arc<dyn Geocoder>, source: Arc<dyn FacilitySource>) -> Self {
        Self { geocoder, source }
    }

    /// Up to `top_n` named facilities near `query`, closest first.
    ///
    /// An empty list means the search ran but found nothing; a place the
    /// geocoder does not know is `PlaceNotFound`.
    #[instrument(skip(self))]
    pub async fn find(
        &self,
        query: &str,
        category: &str,
        radius_meters: u32,
        top_n: usize,
    ) -> Result<Vec<RankedFacility>, ActionError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ActionError::entity_missing("location"));
        }

        let center = self
            .geocoder
            .geocode(query)
            .await?
            .ok_or_else(|| ActionError::place_not_found(query))?;

        let facilities = self
            .source
            .facilities_near(&center, category, radius_meters)
            .await?;
        debug!("{} candidate facilities around '{}'", facilities.len(), query);

        let ranked = rank_facilities(&center, facilities, top_n);
        info!("Ranked {} facilities near '{}'", ranked.len(), query);
        Ok(ranked)
    }
}

/// Drop anonymous facilities, attach rounded distances from `center`,
/// sort closest first and keep at most `top_n`.
///
/// The sort is stable, so facilities at equal distance keep the order the
/// source returned them in.
#[must_use]
pub fn rank_facilities(
    center: &Coordinate,
    facilities: Vec<Facility>,
    top_n: usize,
) -> Vec<RankedFacility> {
    let mut ranked: Vec<RankedFacility> = facilities
        .into_iter()
        .filter_map(|facility| {
            let name = facility.display_name()?.to_string();
            Some(RankedFacility {
                name,
                distance_km: round_km(center.distance_km(&facility.coordinate)),
                coordinate: facility.coordinate,
                category: facility.category,
            })
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked.truncate(top_n);
    ranked
}
