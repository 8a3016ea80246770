//! Weather API client for OpenWeatherMap integration
//!
//! OpenWeatherMap reports its status in the body field `cod`, sent as a
//! number on success and as a string (`"404"`) on errors, and answers
//! unknown cities with HTTP 404 plus a JSON body. The body is therefore
//! always parsed, whatever the HTTP status.

use std::time::Instant;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, instrument, warn};

use super::WeatherProvider;
use crate::ActionError;
use crate::config::WeatherConfig;
use crate::models::WeatherReport;

/// OpenWeatherMap current weather client
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    units: String,
}

mod owm {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    pub enum Cod {
        Number(u16),
        Text(String),
    }

    impl Cod {
        pub fn code(&self) -> Option<u16> {
            match self {
                Cod::Number(n) => Some(*n),
                Cod::Text(s) => s.trim().parse().ok(),
            }
        }
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentWeatherResponse {
        pub cod: Cod,
        #[serde(default)]
        pub message: Option<serde_json::Value>,
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub sys: Option<Sys>,
        #[serde(default)]
        pub weather: Vec<Condition>,
        #[serde(default)]
        pub main: Option<Main>,
        #[serde(default)]
        pub wind: Option<Wind>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Sys {
        #[serde(default)]
        pub country: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub description: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct Main {
        pub temp: f64,
        pub humidity: u8,
    }

    #[derive(Debug, Deserialize)]
    pub struct Wind {
        pub speed: f64,
    }
}

pub use owm::CurrentWeatherResponse;

impl OpenWeatherClient {
    /// Create a new weather API client
    pub fn new(config: &WeatherConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(format!("assistant-actions/{}", crate::VERSION))
            .build()
            .with_context(|| "Failed to create HTTP client for weather")?;

        if config.api_key.is_none() {
            warn!("No weather API key configured, weather lookups will fail");
        }

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            units: config.units.clone(),
        })
    }

    fn weather_url(&self, location: &str, api_key: &str) -> String {
        format!(
            "{}/weather?q={}&appid={}&units={}",
            self.base_url,
            urlencoding::encode(location),
            urlencoding::encode(api_key),
            urlencoding::encode(&self.units)
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current_weather(&self, location: &str) -> Result<WeatherReport, ActionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ActionError::config("weather.api_key is not set"))?;

        info!("Getting current weather for '{}'", location);
        let start_time = Instant::now();

        let response = self
            .client
            .get(self.weather_url(location, api_key))
            .send()
            .await?;
        let http_status = response.status();
        let body = response.text().await?;

        let parsed: CurrentWeatherResponse = serde_json::from_str(&body).map_err(|e| {
            error!(
                "Failed to parse weather response (HTTP {}): {}",
                http_status, e
            );
            ActionError::from(e)
        })?;

        let total_duration = start_time.elapsed();
        debug!(
            "Weather API answered HTTP {} in {:.3}s",
            http_status,
            total_duration.as_secs_f64()
        );
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow weather API response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        into_report(parsed, location)
    }
}

/// Interpret a parsed response for a lookup of `location`
pub fn into_report(
    response: CurrentWeatherResponse,
    location: &str,
) -> Result<WeatherReport, ActionError> {
    let status = response
        .cod
        .code()
        .ok_or_else(|| ActionError::unavailable(format!("unreadable status {:?}", response.cod)))?;

    match status {
        200 => {}
        404 => return Err(ActionError::place_not_found(location)),
        other => {
            warn!(
                "Weather API returned status {} for '{}': {:?}",
                other, location, response.message
            );
            return Err(ActionError::UpstreamStatus { status: other });
        }
    }

    let missing = |field: &str| ActionError::unavailable(format!("weather response has no {field}"));

    let main = response.main.ok_or_else(|| missing("main"))?;
    let wind = response.wind.ok_or_else(|| missing("wind"))?;
    let description = response
        .weather
        .into_iter()
        .next()
        .map(|condition| condition.description)
        .ok_or_else(|| missing("weather condition"))?;

    Ok(WeatherReport {
        city: response.name.unwrap_or_else(|| location.to_string()),
        country: response.sys.and_then(|sys| sys.country).unwrap_or_default(),
        description,
        temperature: main.temp,
        humidity: main.humidity,
        wind_speed: wind.speed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const NAIROBI: &str = r#"{
        "coord": {"lon": 36.8167, "lat": -1.2833},
        "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
        "main": {"temp": 21.5, "feels_like": 21.2, "pressure": 1020, "humidity": 64},
        "wind": {"speed": 3.6, "deg": 60},
        "sys": {"country": "KE", "sunrise": 1700000000, "sunset": 1700040000},
        "name": "Nairobi",
        "cod": 200
    }"#;

    fn parse(body: &str) -> CurrentWeatherResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_success_response() {
        let report = into_report(parse(NAIROBI), "nairobi").unwrap();
        assert_eq!(report.city, "Nairobi");
        assert_eq!(report.country, "KE");
        assert_eq!(report.description, "scattered clouds");
        assert_eq!(report.temperature, 21.5);
        assert_eq!(report.humidity, 64);
        assert_eq!(report.wind_speed, 3.6);
    }

    #[rstest]
    #[case(r#"{"cod": "404", "message": "city not found"}"#)]
    #[case(r#"{"cod": 404, "message": "city not found"}"#)]
    fn test_not_found_response(#[case] body: &str) {
        let result = into_report(parse(body), "Gotham");
        assert!(matches!(result, Err(ActionError::PlaceNotFound { query }) if query == "Gotham"));
    }

    #[rstest]
    #[case(r#"{"cod": 401, "message": "Invalid API key"}"#, 401)]
    #[case(r#"{"cod": "429", "message": "rate limited"}"#, 429)]
    fn test_other_status(#[case] body: &str, #[case] expected: u16) {
        let result = into_report(parse(body), "Nairobi");
        assert!(matches!(result, Err(ActionError::UpstreamStatus { status }) if status == expected));
    }

    #[test]
    fn test_success_without_fields_is_service_error() {
        let result = into_report(parse(r#"{"cod": 200, "name": "Nairobi"}"#), "Nairobi");
        assert!(matches!(result, Err(ActionError::ServiceUnavailable { .. })));
    }

    #[test]
    fn test_weather_url() {
        let client = OpenWeatherClient::new(&WeatherConfig {
            api_key: Some("k3y".to_string()),
            ..WeatherConfig::default()
        })
        .unwrap();
        assert_eq!(
            client.weather_url("New York", "k3y"),
            "https://api.openweathermap.org/data/2.5/weather?q=New%20York&appid=k3y&units=metric"
        );
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let client = OpenWeatherClient::new(&WeatherConfig::default()).unwrap();
        let result = client.current_weather("Nairobi").await;
        assert!(matches!(result, Err(ActionError::Config { .. })));
    }

    mod http {
        use axum::Router;
        use axum::http::StatusCode;
        use axum::response::Html;
        use axum::routing::get;

        use super::*;
        use crate::testing::serve;

        async fn client_for(app: Router) -> OpenWeatherClient {
            let base_url = serve(app).await;
            OpenWeatherClient::new(&WeatherConfig {
                api_key: Some("k3y".to_string()),
                base_url,
                ..WeatherConfig::default()
            })
            .unwrap()
        }

        #[tokio::test]
        async fn test_http_404_is_place_not_found() {
            let client = client_for(Router::new().route(
                "/weather",
                get(|| async {
                    (
                        StatusCode::NOT_FOUND,
                        r#"{"cod": "404", "message": "city not found"}"#,
                    )
                }),
            ))
            .await;

            let result = client.current_weather("Xyzzy").await;
            assert!(matches!(result, Err(ActionError::PlaceNotFound { query }) if query == "Xyzzy"));
        }

        #[tokio::test]
        async fn test_http_200_is_report() {
            let client =
                client_for(Router::new().route("/weather", get(|| async { NAIROBI }))).await;

            let report = client.current_weather("Nairobi").await.unwrap();
            assert_eq!(report.city, "Nairobi");
            assert_eq!(report.humidity, 64);
        }

        #[tokio::test]
        async fn test_html_body_is_service_error() {
            let client = client_for(Router::new().route(
                "/weather",
                get(|| async {
                    (
                        StatusCode::BAD_GATEWAY,
                        Html("<html><body>502 Bad Gateway</body></html>"),
                    )
                }),
            ))
            .await;

            let result = client.current_weather("Nairobi").await;
            assert!(matches!(result, Err(ActionError::ServiceUnavailable { .. })));
        }
    }
}
