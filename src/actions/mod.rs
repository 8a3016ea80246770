//! Conversation actions
//!
//! Each action is triggered by name from the dialogue runtime, reads the
//! conversation snapshot and answers with replies plus slot updates. Failures
//! never escape an action: they become a short sentence for the user and a
//! log line for the operator.

use async_trait::async_trait;

use crate::models::{ActionResponse, Snapshot};

pub mod advice;
pub mod entities;
pub mod health_centers;
pub mod registry;
pub mod slots;
pub mod weather;

pub use advice::CareerAdviceAction;
pub use entities::{LOCATION_ENTITIES, first_entity_value};
pub use health_centers::HealthCentersAction;
pub use registry::ActionRegistry;
pub use slots::{ExtractCityAction, ExtractFoodAction, MatchResultsAction};
pub use weather::WeatherAction;

/// Reply used by every action that needs a location and got none
pub const NO_LOCATION_REPLY: &str = "Sorry, I can't recognize the location.";

/// A named conversation action
#[async_trait]
pub trait Action: Send + Sync {
    /// Name the dialogue runtime uses to trigger this action
    fn name(&self) -> &'static str;

    /// Run one conversational turn
    async fn handle(&self, snapshot: &Snapshot) -> ActionResponse;
}
