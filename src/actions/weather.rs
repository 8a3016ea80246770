use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use super::entities::location_entity;
use super::{Action, NO_LOCATION_REPLY};
use crate::ActionError;
use crate::models::{ActionResponse, Snapshot};
use crate::weather::WeatherProvider;

/// Reports current weather for the location named in the message
pub struct WeatherAction {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherAction {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Action for WeatherAction {
    fn name(&self) -> &'static str {
        "action_get_weather"
    }

    async fn handle(&self, snapshot: &Snapshot) -> ActionResponse {
        let Some(location) = location_entity(snapshot) else {
            return ActionResponse::reply(NO_LOCATION_REPLY);
        };

        match self.provider.current_weather(&location).await {
            Ok(report) => {
                info!("Weather for '{}': {}", location, report.description);
                ActionResponse::reply(report.format_reply())
            }
            Err(ActionError::PlaceNotFound { .. }) => {
                ActionResponse::reply(format!("City '{location}' not found."))
            }
            Err(ActionError::UpstreamStatus { status }) => {
                warn!("Weather API status {} for '{}'", status, location);
                ActionResponse::reply("Couldn't fetch weather data.")
            }
            Err(e) => {
                error!("Weather API error: {}", e);
                ActionResponse::reply("Weather service error.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherReport;
    use crate::testing::StaticWeather;

    fn action(
        outcome: impl Fn() -> Result<WeatherReport, ActionError> + Send + Sync + 'static,
    ) -> WeatherAction {
        WeatherAction::new(Arc::new(StaticWeather::new(outcome)))
    }

    fn nairobi() -> Snapshot {
        Snapshot::default().with_entity("GPE", "Nairobi")
    }

    #[tokio::test]
    async fn test_weather_report() {
        let action = action(|| {
            Ok(WeatherReport {
                city: "Nairobi".to_string(),
                country: "KE".to_string(),
                description: "light rain".to_string(),
                temperature: 18.25,
                humidity: 88,
                wind_speed: 4.1,
            })
        });

        let response = action.handle(&nairobi()).await;
        assert_eq!(
            response.replies,
            vec![
                "🌤️ Weather in Nairobi, KE:\n• Condition: Light Rain\n• Temperature: 18.25°C\n• Humidity: 88%\n• Wind: 4.1 m/s"
            ]
        );
        assert!(response.events.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_city_has_its_own_reply() {
        let action = action(|| Err(ActionError::place_not_found("404")));
        let snapshot = Snapshot::default().with_entity("city", "404");

        let response = action.handle(&snapshot).await;
        assert_eq!(response.replies, vec!["City '404' not found."]);
    }

    #[tokio::test]
    async fn test_unexpected_status() {
        let action = action(|| Err(ActionError::UpstreamStatus { status: 401 }));
        let response = action.handle(&nairobi()).await;
        assert_eq!(response.replies, vec!["Couldn't fetch weather data."]);
    }

    #[tokio::test]
    async fn test_service_failure() {
        let action = action(|| Err(ActionError::unavailable("timeout: operation timed out")));
        let response = action.handle(&nairobi()).await;
        assert_eq!(response.replies, vec!["Weather service error."]);
    }

    #[tokio::test]
    async fn test_missing_location() {
        let action = action(|| panic!("provider must not be called"));
        let response = action.handle(&Snapshot::default().with_text("weather?")).await;
        assert_eq!(response.replies, vec![NO_LOCATION_REPLY]);
    }
}
