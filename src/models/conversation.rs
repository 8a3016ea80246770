//! Conversation snapshot handed to an action, and what the action hands back

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// State of the conversation at the moment an action is triggered
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub sender_id: String,
    /// Slot values tracked by the dialogue runtime; unset slots are `null`
    #[serde(default)]
    pub slots: BTreeMap<String, Value>,
    #[serde(default)]
    pub latest_message: LatestMessage,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LatestMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub intent: Option<Intent>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    pub name: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// A recognized span of the user's message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Semantic type, e.g. "city" or "GPE"
    pub entity: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extractor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_entity: Option<f64>,
}

impl Entity {
    #[must_use]
    pub fn new(entity: &str, value: &str) -> Self {
        Self {
            entity: entity.to_string(),
            value: Value::String(value.to_string()),
            start: None,
            end: None,
            extractor: None,
            confidence_entity: None,
        }
    }

    /// Entity value as text; `None` for null or blank values
    #[must_use]
    pub fn text(&self) -> Option<String> {
        value_text(&self.value)
    }
}

impl Snapshot {
    /// Builder used by tests and adapters that construct snapshots by hand
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.latest_message.text = Some(text.to_string());
        self
    }

    #[must_use]
    pub fn with_entity(mut self, entity: &str, value: &str) -> Self {
        self.latest_message.entities.push(Entity::new(entity, value));
        self
    }

    #[must_use]
    pub fn with_slot(mut self, name: &str, value: &str) -> Self {
        self.slots
            .insert(name.to_string(), Value::String(value.to_string()));
        self
    }

    /// Slot value as text; `None` for unset, null or blank slots
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<String> {
        self.slots.get(name).and_then(value_text)
    }

    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.latest_message.entities
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.latest_message.text.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn intent_name(&self) -> Option<&str> {
        self.latest_message
            .intent
            .as_ref()
            .and_then(|intent| intent.name.as_deref())
    }
}

/// Text of a slot or entity value. Null, blank, `false`, zero and empty
/// collections count as unset.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// A state update returned to the dialogue runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Event {
    #[serde(rename = "slot")]
    SlotSet { name: String, value: Value },
}

impl Event {
    #[must_use]
    pub fn slot_set(name: &str, value: &str) -> Self {
        Event::SlotSet {
            name: name.to_string(),
            value: Value::String(value.to_string()),
        }
    }
}

/// Replies and state updates produced by one action invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionResponse {
    pub replies: Vec<String>,
    pub events: Vec<Event>,
}

impl ActionResponse {
    #[must_use]
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            replies: vec![text.into()],
            events: Vec::new(),
        }
    }

    /// Queue another message for the user
    pub fn say(&mut self, text: impl Into<String>) {
        self.replies.push(text.into());
    }

    #[must_use]
    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }
}
