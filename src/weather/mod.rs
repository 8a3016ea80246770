use async_trait::async_trait;

use crate::ActionError;
use crate::models::WeatherReport;

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Current-conditions lookup by free-text location
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// `PlaceNotFound` when the service does not know `location`,
    /// `UpstreamStatus` for any other non-success status it reports
    async fn current_weather(&self, location: &str) -> Result<WeatherReport, ActionError>;
}
