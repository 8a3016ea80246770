//! Error types and handling for the action server

use thiserror::Error;

/// Main error type shared by the actions and their network collaborators
#[derive(Error, Debug)]
pub enum ActionError {
    /// Geocoding (or the weather service) had no match for the place
    #[error("Place not found: '{query}'")]
    PlaceNotFound { query: String },

    /// A required entity or slot was absent from the turn
    #[error("Missing entity: {entity}")]
    EntityMissing { entity: String },

    /// Transport, timeout or payload failure in a downstream service
    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// Downstream answered, but with a status we have no reply for
    #[error("Upstream returned status {status}")]
    UpstreamStatus { status: u16 },

    /// No action registered under this name
    #[error("No registered action found for name '{name}'")]
    UnknownAction { name: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl ActionError {
    /// Create a new place-not-found error
    pub fn place_not_found<S: Into<String>>(query: S) -> Self {
        Self::PlaceNotFound {
            query: query.into(),
        }
    }

    /// Create a new missing-entity error
    pub fn entity_missing<S: Into<String>>(entity: S) -> Self {
        Self::EntityMissing {
            entity: entity.into(),
        }
    }

    /// Create a new service-unavailable error
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ActionError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            "timeout"
        } else if err.is_decode() {
            "malformed payload"
        } else {
            "transport"
        };
        ActionError::unavailable(format!("{kind}: {err}"))
    }
}

impl From<serde_json::Error> for ActionError {
    fn from(err: serde_json::Error) -> Self {
        ActionError::unavailable(format!("malformed payload: {err}"))
    }
}
