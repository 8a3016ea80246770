use std::collections::HashMap;
use std::time::Instant;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::FacilitySource;
use crate::ActionError;
use crate::config::FacilitiesConfig;
use crate::models::{Coordinate, Facility};

/// Server-side query timeout, kept below the client timeout
const QUERY_TIMEOUT_SECONDS: u32 = 25;

/// Overpass API client
pub struct OverpassClient {
    client: Client,
    url: String,
}

/// Overpass JSON response
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: u64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl OverpassClient {
    /// Create a new client
    pub fn new(config: &FacilitiesConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(format!("assistant-actions/{}", crate::VERSION))
            .build()
            .with_context(|| "Failed to create HTTP client for Overpass")?;

        Ok(Self {
            client,
            url: config.overpass_url.clone(),
        })
    }
}

#[async_trait]
impl FacilitySource for OverpassClient {
    #[instrument(skip(self, center), fields(center = %center.format_coordinates()))]
    async fn facilities_near(
        &self,
        center: &Coordinate,
        category: &str,
        radius_meters: u32,
    ) -> Result<Vec<Facility>, ActionError> {
        info!(
            "Searching Overpass for '{}' within {}m of ({})",
            category,
            radius_meters,
            center.format_coordinates()
        );
        let start_time = Instant::now();

        let query = build_query(center, category, radius_meters);
        debug!("Overpass query: {}", query);

        let response: OverpassResponse = self
            .client
            .post(&self.url)
            .form(&[("data", query.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let total = response.elements.len();
        let facilities: Vec<Facility> = response
            .elements
            .into_iter()
            .filter_map(OverpassElement::into_facility)
            .collect();

        if facilities.len() < total {
            warn!(
                "Dropped {} Overpass elements without usable coordinates",
                total - facilities.len()
            );
        }

        info!(
            "Found {} facilities in {:.3}s",
            facilities.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(facilities)
    }
}

/// Overpass QL for nodes whose `amenity` tag matches `category`
#[must_use]
pub fn build_query(center: &Coordinate, category: &str, radius_meters: u32) -> String {
    format!(
        "[out:json][timeout:{}];node[\"amenity\"~\"{}\"](around:{},{},{});out;",
        QUERY_TIMEOUT_SECONDS,
        category,
        radius_meters,
        center.latitude(),
        center.longitude()
    )
}

impl OverpassElement {
    /// Convert to a `Facility`; `None` when the element carries no valid position
    pub fn into_facility(mut self) -> Option<Facility> {
        let coordinate = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Coordinate::new(lat, lon).ok()?,
            _ => {
                debug!("Skipping {} {} without coordinates", self.kind, self.id);
                return None;
            }
        };

        let name = self.tags.remove("name");
        let category = self.tags.remove("amenity");
        Some(Facility::new(name, coordinate, category))
    }
}
