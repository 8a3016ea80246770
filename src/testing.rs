//! In-memory collaborators for unit tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::ActionError;
use crate::facilities::FacilitySource;
use crate::location_resolver::Geocoder;
use crate::models::{Coordinate, Facility, WeatherReport};
use crate::weather::WeatherProvider;

type Outcome<T> = Box<dyn Fn() -> Result<T, ActionError> + Send + Sync>;

pub struct StaticGeocoder {
    outcome: Outcome<Option<Coordinate>>,
}

impl StaticGeocoder {
    pub fn at(coordinate: Coordinate) -> Self {
        Self {
            outcome: Box::new(move || Ok(Some(coordinate))),
        }
    }

    pub fn none() -> Self {
        Self {
            outcome: Box::new(|| Ok(None)),
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: Box::new(|| Err(ActionError::unavailable("geocoder timed out"))),
        }
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, _query: &str) -> Result<Option<Coordinate>, ActionError> {
        (self.outcome)()
    }
}

pub struct StaticFacilities {
    outcome: Outcome<Vec<Facility>>,
    calls: Mutex<Vec<(String, u32)>>,
}

impl StaticFacilities {
    pub fn of(facilities: Vec<Facility>) -> Self {
        Self {
            outcome: Box::new(move || Ok(facilities.clone())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: Box::new(|| Err(ActionError::unavailable("overpass returned HTML"))),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// (category, radius) of every search made so far
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FacilitySource for StaticFacilities {
    async fn facilities_near(
        &self,
        _center: &Coordinate,
        category: &str,
        radius_meters: u32,
    ) -> Result<Vec<Facility>, ActionError> {
        self.calls
            .lock()
            .unwrap()
            .push((category.to_string(), radius_meters));
        (self.outcome)()
    }
}

pub struct StaticWeather {
    outcome: Outcome<WeatherReport>,
}

impl StaticWeather {
    pub fn new(
        outcome: impl Fn() -> Result<WeatherReport, ActionError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            outcome: Box::new(outcome),
        }
    }
}

#[async_trait]
impl WeatherProvider for StaticWeather {
    async fn current_weather(&self, _location: &str) -> Result<WeatherReport, ActionError> {
        (self.outcome)()
    }
}

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A named hospital `km` kilometers due north of (0, 0)
pub fn facility_at_km(name: &str, km: f64) -> Facility {
    let origin = Coordinate::new(0.0, 0.0).unwrap();
    let one_degree = origin.distance_km(&Coordinate::new(1.0, 0.0).unwrap());
    Facility::new(
        Some(name.to_string()),
        Coordinate::new(km / one_degree, 0.0).unwrap(),
        Some("hospital".to_string()),
    )
}
