//! Action server webhook
//!
//! Speaks the custom-action protocol of the dialogue runtime: the runtime
//! posts the name of the action to run together with the tracker state, and
//! receives the events to apply and the messages to send.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::ActionError;
use crate::actions::ActionRegistry;
use crate::models::{ActionResponse, Event, Snapshot};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiActionCall {
    pub next_action: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub tracker: Snapshot,
    #[serde(default)]
    pub domain: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMessage {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiActionResponse {
    pub events: Vec<Event>,
    pub responses: Vec<ApiMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiActionName {
    pub name: String,
}

impl From<ActionResponse> for ApiActionResponse {
    fn from(response: ActionResponse) -> Self {
        Self {
            events: response.events,
            responses: response
                .replies
                .into_iter()
                .map(|text| ApiMessage { text })
                .collect(),
        }
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        let (status, action_name) = match &self {
            ActionError::UnknownAction { name } => (StatusCode::NOT_FOUND, Some(name.clone())),
            ActionError::EntityMissing { .. } => (StatusCode::BAD_REQUEST, None),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };
        let body = ApiError {
            error: self.to_string(),
            action_name,
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(registry: Arc<ActionRegistry>) -> Router {
    Router::new()
        .route("/webhook", post(run_action))
        .route("/actions", get(list_actions))
        .route("/health", get(health))
        .with_state(registry)
}

async fn run_action(
    State(registry): State<Arc<ActionRegistry>>,
    Json(call): Json<ApiActionCall>,
) -> Result<Json<ApiActionResponse>, ActionError> {
    let mut snapshot = call.tracker;
    if snapshot.sender_id.is_empty() {
        snapshot.sender_id = call.sender_id.unwrap_or_default();
    }

    let response = registry
        .run(&call.next_action, &snapshot)
        .await
        .inspect_err(|e| warn!("Rejected action call: {}", e))?;

    Ok(Json(response.into()))
}

async fn list_actions(State(registry): State<Arc<ActionRegistry>>) -> Json<Vec<ApiActionName>> {
    Json(
        registry
            .names()
            .into_iter()
            .map(|name| ApiActionName {
                name: name.to_string(),
            })
            .collect(),
    )
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok", "version": crate::VERSION }))
}
