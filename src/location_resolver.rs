//! Location Resolution Module
//!
//! Resolves free-text place names into coordinates through a geocoding
//! service. The default implementation talks to OpenStreetMap Nominatim.

use std::time::Instant;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::ActionError;
use crate::config::GeocodingConfig;
use crate::models::Coordinate;

/// Resolves a place name to its best-matching coordinate
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` when the service has no match for `query`
    async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, ActionError>;
}

/// Nominatim `/search` client
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

/// One entry of a Nominatim search response
#[derive(Debug, Deserialize)]
pub struct NominatimResult {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl NominatimGeocoder {
    /// Create a new client
    pub fn new(config: &GeocodingConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .with_context(|| "Failed to create HTTP client for geocoding")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, ActionError> {
        info!("Geocoding location: '{}'", query);
        let start_time = Instant::now();

        let url = self.search_url(query);
        debug!("Nominatim request URL: {}", url);

        let results: Vec<NominatimResult> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let coordinate = first_coordinate(&results)?;

        match &coordinate {
            Some(c) => info!(
                "Resolved '{}' to ({}) in {:.3}s",
                query,
                c.format_coordinates(),
                start_time.elapsed().as_secs_f64()
            ),
            None => warn!("No geocoding results found for '{}'", query),
        }

        Ok(coordinate)
    }
}

/// Coordinate of the first search result, if any
pub fn first_coordinate(results: &[NominatimResult]) -> Result<Option<Coordinate>, ActionError> {
    let Some(first) = results.first() else {
        return Ok(None);
    };

    let lat: f64 = first.lat.trim().parse().map_err(|_| {
        ActionError::unavailable(format!("Nominatim returned invalid latitude '{}'", first.lat))
    })?;
    let lon: f64 = first.lon.trim().parse().map_err(|_| {
        ActionError::unavailable(format!("Nominatim returned invalid longitude '{}'", first.lon))
    })?;

    if let Some(name) = &first.display_name {
        debug!("Best geocoding match: {}", name);
    }

    Coordinate::new(lat, lon).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Vec<NominatimResult> {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_first_coordinate_picks_first_match() {
        let results = parse(
            r#"[
                {"place_id": 1, "lat": "-1.2832533", "lon": "36.8172449", "display_name": "Nairobi, Kenya", "importance": 0.7},
                {"place_id": 2, "lat": "40.0", "lon": "-75.0", "display_name": "Nairobi, Somewhere"}
            ]"#,
        );
        let coordinate = first_coordinate(&results).unwrap().unwrap();
        assert!((coordinate.latitude() + 1.283_253_3).abs() < 1e-9);
        assert!((coordinate.longitude() - 36.817_244_9).abs() < 1e-9);
    }

    #[test]
    fn test_empty_results_is_no_match() {
        assert_eq!(first_coordinate(&parse("[]")).unwrap(), None);
    }

    #[test]
    fn test_garbage_coordinates_are_service_errors() {
        let results = parse(r#"[{"lat": "north", "lon": "36.8"}]"#);
        assert!(matches!(
            first_coordinate(&results),
            Err(ActionError::ServiceUnavailable { .. })
        ));

        let results = parse(r#"[{"lat": "123.0", "lon": "36.8"}]"#);
        assert!(first_coordinate(&results).is_err());
    }

    #[test]
    fn test_search_url_encodes_query() {
        let geocoder = NominatimGeocoder::new(&GeocodingConfig {
            base_url: "https://nominatim.example.org/".to_string(),
            ..GeocodingConfig::default()
        })
        .unwrap();
        assert_eq!(
            geocoder.search_url("São Paulo & co"),
            "https://nominatim.example.org/search?q=S%C3%A3o%20Paulo%20%26%20co&format=json&limit=1"
        );
    }
}
