use std::fmt::Write;

use async_trait::async_trait;
use tracing::{error, info};

use super::entities::location_entity;
use super::{Action, NO_LOCATION_REPLY};
use crate::ActionError;
use crate::config::FacilitiesConfig;
use crate::facilities::NearestFacilityFinder;
use crate::models::{ActionResponse, RankedFacility, Snapshot};

/// Lists the hospitals and clinics closest to the location in the message
pub struct HealthCentersAction {
    finder: NearestFacilityFinder,
    category: String,
    radius_meters: u32,
    top_n: usize,
}

impl HealthCentersAction {
    pub fn new(finder: NearestFacilityFinder, config: &FacilitiesConfig) -> Self {
        Self {
            finder,
            category: config.category.clone(),
            radius_meters: config.radius_meters,
            top_n: config.top_n,
        }
    }
}

#[async_trait]
impl Action for HealthCentersAction {
    fn name(&self) -> &'static str {
        "action_health_centers_locating"
    }

    async fn handle(&self, snapshot: &Snapshot) -> ActionResponse {
        let Some(location) = location_entity(snapshot) else {
            return ActionResponse::reply(NO_LOCATION_REPLY);
        };

        let mut response = ActionResponse::reply(format!("Searching near {location}..."));

        let result = self
            .finder
            .find(&location, &self.category, self.radius_meters, self.top_n)
            .await;

        match result {
            Ok(facilities) if facilities.is_empty() => {
                info!("No facilities near '{}'", location);
                response.say(format!("No health centers found near {location}."));
            }
            Ok(facilities) => response.say(format_facilities(&location, &facilities)),
            Err(ActionError::PlaceNotFound { .. }) => {
                response.say(format!("Couldn't find {location}."));
            }
            Err(e) => {
                error!("Health center error: {}", e);
                response.say("Search service error.");
            }
        }

        response
    }
}

fn format_facilities(location: &str, facilities: &[RankedFacility]) -> String {
    let mut text = format!("🏥 Health centers near {location}:\n\n");
    for (i, facility) in facilities.iter().enumerate() {
        let _ = write!(
            text,
            "{}. {}\n   📏 {} km away\n\n",
            i + 1,
            facility.name,
            format_km(facility.distance_km)
        );
    }
    text
}

/// Distance with at least one decimal, e.g. `12.0`, `0.5`, `3.27`
fn format_km(km: f64) -> String {
    if km.fract() == 0.0 {
        format!("{km:.1}")
    } else {
        km.to_string()
    }
}
