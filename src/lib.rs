//! `assistant-actions` - custom actions for a conversational assistant
//!
//! This library provides the actions a dialogue runtime can trigger over its
//! action-server webhook: weather lookups, slot capture, canned advice and a
//! search for the health centers closest to a named place.

pub mod actions;
pub mod api;
pub mod config;
pub mod error;
pub mod facilities;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod weather;
pub mod web;

#[cfg(test)]
mod testing;

// Re-export core types for public API
pub use actions::{Action, ActionRegistry};
pub use config::ActionsConfig;
pub use error::ActionError;
pub use facilities::{FacilitySource, NearestFacilityFinder, OverpassClient};
pub use location_resolver::{Geocoder, NominatimGeocoder};
pub use models::{ActionResponse, Coordinate, Event, Facility, RankedFacility, Snapshot};
pub use weather::{OpenWeatherClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ActionError>;
