use crate::models::{Entity, Snapshot};

/// Entity types that name a place
pub const LOCATION_ENTITIES: &[&str] = &["city", "GPE", "location"];

/// Value of the first entity whose type is in `allowed`.
///
/// Only the first matching entity is considered; if its value is blank
/// there is no result.
#[must_use]
pub fn first_entity_value(entities: &[Entity], allowed: &[&str]) -> Option<String> {
    entities
        .iter()
        .find(|entity| allowed.contains(&entity.entity.as_str()))
        .and_then(Entity::text)
}

/// Location mentioned in the latest message
#[must_use]
pub fn location_entity(snapshot: &Snapshot) -> Option<String> {
    first_entity_value(snapshot.entities(), LOCATION_ENTITIES)
}

/// Slot value, falling back to the first entity of an allowed type
#[must_use]
pub fn slot_or_entity(snapshot: &Snapshot, slot: &str, allowed: &[&str]) -> Option<String> {
    snapshot
        .slot(slot)
        .or_else(|| first_entity_value(snapshot.entities(), allowed))
}
