use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, instrument};

use super::{
    Action, CareerAdviceAction, ExtractCityAction, ExtractFoodAction, HealthCentersAction,
    MatchResultsAction, WeatherAction,
};
use crate::ActionError;
use crate::config::{ActionsConfig, FacilitiesConfig};
use crate::facilities::{FacilitySource, NearestFacilityFinder, OverpassClient};
use crate::location_resolver::{Geocoder, NominatimGeocoder};
use crate::models::{ActionResponse, Snapshot};
use crate::weather::{OpenWeatherClient, WeatherProvider};

/// Actions by the name the dialogue runtime triggers them with
#[derive(Default, Clone)]
pub struct ActionRegistry {
    actions: BTreeMap<&'static str, Arc<dyn Action>>,
}

impl ActionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every action, backed by the configured HTTP services
    pub fn from_config(config: &ActionsConfig) -> anyhow::Result<Self> {
        let geocoder = Arc::new(NominatimGeocoder::new(&config.geocoding)?);
        let facilities = Arc::new(OverpassClient::new(&config.facilities)?);
        let weather = Arc::new(OpenWeatherClient::new(&config.weather)?);
        Ok(Self::with_services(
            geocoder,
            facilities,
            weather,
            &config.facilities,
        ))
    }

    /// Registry with every action, backed by the given collaborators
    pub fn with_services(
        geocoder: Arc<dyn Geocoder>,
        facilities: Arc<dyn FacilitySource>,
        weather: Arc<dyn WeatherProvider>,
        facilities_config: &FacilitiesConfig,
    ) -> Self {
        let finder = NearestFacilityFinder::new(geocoder, facilities);

        let mut registry = Self::new();
        registry.register(Arc::new(ExtractFoodAction));
        registry.register(Arc::new(WeatherAction::new(weather)));
        registry.register(Arc::new(HealthCentersAction::new(finder, facilities_config)));
        registry.register(Arc::new(ExtractCityAction));
        registry.register(Arc::new(CareerAdviceAction));
        registry.register(Arc::new(MatchResultsAction));
        registry
    }

    /// Add an action, replacing any previous one with the same name
    pub fn register(&mut self, action: Arc<dyn Action>) {
        self.actions.insert(action.name(), action);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.actions.get(name).cloned()
    }

    /// Registered names in sorted order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.actions.keys().copied().collect()
    }

    /// Run the action called `name` against `snapshot`
    #[instrument(
        skip(self, snapshot),
        fields(sender = %snapshot.sender_id, intent = snapshot.intent_name().unwrap_or("-"))
    )]
    pub async fn run(
        &self,
        name: &str,
        snapshot: &Snapshot,
    ) -> Result<ActionResponse, ActionError> {
        let action = self.get(name).ok_or_else(|| ActionError::UnknownAction {
            name: name.to_string(),
        })?;

        let response = action.handle(snapshot).await;
        info!(
            "Action {} produced {} replies and {} events",
            name,
            response.replies.len(),
            response.events.len()
        );
        Ok(response)
    }
}
