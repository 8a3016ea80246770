//! Data models for the action server
//!
//! This module contains the core domain models organized by concern:
//! - Location: WGS84 coordinates and great-circle distance
//! - Facility: points of interest and their ranked form
//! - Weather: current conditions as reported to the user
//! - Conversation: the snapshot handed over by the dialogue runtime and
//!   the replies/state updates sent back

pub mod conversation;
pub mod facility;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use conversation::{ActionResponse, Entity, Event, LatestMessage, Snapshot};
pub use facility::{Facility, RankedFacility};
pub use location::Coordinate;
pub use weather::WeatherReport;
