//! Actions that echo or capture slot values

use async_trait::async_trait;
use tracing::debug;

use super::entities::{LOCATION_ENTITIES, slot_or_entity};
use super::Action;
use crate::models::{ActionResponse, Event, Snapshot};

/// Confirms the food the user ordered
pub struct ExtractFoodAction;

#[async_trait]
impl Action for ExtractFoodAction {
    fn name(&self) -> &'static str {
        "action_extract_food_entity"
    }

    async fn handle(&self, snapshot: &Snapshot) -> ActionResponse {
        match snapshot.slot("food") {
            Some(food) => ActionResponse::reply(format!("You ordered {food}")),
            None => ActionResponse::reply("I dont know what you want"),
        }
    }
}

/// Remembers the city the user talks about
pub struct ExtractCityAction;

#[async_trait]
impl Action for ExtractCityAction {
    fn name(&self) -> &'static str {
        "action_extract_city_entity"
    }

    async fn handle(&self, snapshot: &Snapshot) -> ActionResponse {
        match slot_or_entity(snapshot, "city", LOCATION_ENTITIES) {
            Some(city) => {
                debug!("Setting city slot to '{}'", city);
                ActionResponse::reply(format!("Got it. I'll use {city}."))
                    .with_event(Event::slot_set("city", &city))
            }
            None => ActionResponse::reply("I couldn't identify a city. Tell me the location."),
        }
    }
}

/// Remembers the team the user follows
pub struct MatchResultsAction;

#[async_trait]
impl Action for MatchResultsAction {
    fn name(&self) -> &'static str {
        "action_match_results"
    }

    async fn handle(&self, snapshot: &Snapshot) -> ActionResponse {
        match slot_or_entity(snapshot, "team", &["team"]) {
            Some(team) => ActionResponse::reply(format!(
                "I don't have live results, but I can track {team}. Check your sports app for latest scores."
            ))
            .with_event(Event::slot_set("team", &team)),
            None => ActionResponse::reply("Which team should I check results for?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_food_slot() {
        let response = ExtractFoodAction
            .handle(&Snapshot::default().with_slot("food", "pilau"))
            .await;
        assert_eq!(response.replies, vec!["You ordered pilau"]);
        assert!(response.events.is_empty());

        let response = ExtractFoodAction.handle(&Snapshot::default()).await;
        assert_eq!(response.replies, vec!["I dont know what you want"]);
    }

    #[tokio::test]
    async fn test_city_from_entity() {
        let snapshot = Snapshot::default().with_entity("GPE", "Nairobi");
        let response = ExtractCityAction.handle(&snapshot).await;
        assert_eq!(response.replies, vec!["Got it. I'll use Nairobi."]);
        assert_eq!(response.events, vec![Event::slot_set("city", "Nairobi")]);
    }

    #[tokio::test]
    async fn test_city_slot_wins_over_entity() {
        let snapshot = Snapshot::default()
            .with_slot("city", "Kisumu")
            .with_entity("GPE", "Nairobi");
        let response = ExtractCityAction.handle(&snapshot).await;
        assert_eq!(response.events, vec![Event::slot_set("city", "Kisumu")]);
    }

    #[tokio::test]
    async fn test_city_fallback() {
        let snapshot = Snapshot::default().with_entity("PERSON", "Wangari");
        let response = ExtractCityAction.handle(&snapshot).await;
        assert_eq!(
            response.replies,
            vec!["I couldn't identify a city. Tell me the location."]
        );
        assert!(response.events.is_empty());
    }

    #[tokio::test]
    async fn test_falsy_slots_fall_back() {
        let snapshot: Snapshot =
            serde_json::from_value(serde_json::json!({"slots": {"food": false, "city": []}}))
                .unwrap();

        let response = ExtractFoodAction.handle(&snapshot).await;
        assert_eq!(response.replies, vec!["I dont know what you want"]);

        let response = ExtractCityAction.handle(&snapshot).await;
        assert_eq!(
            response.replies,
            vec!["I couldn't identify a city. Tell me the location."]
        );
        assert!(response.events.is_empty());
    }

    #[tokio::test]
    async fn test_team() {
        let snapshot = Snapshot::default().with_entity("team", "AFC Leopards");
        let response = MatchResultsAction.handle(&snapshot).await;
        assert_eq!(
            response.replies,
            vec!["I don't have live results, but I can track AFC Leopards. Check your sports app for latest scores."]
        );
        assert_eq!(response.events, vec![Event::slot_set("team", "AFC Leopards")]);

        let response = MatchResultsAction.handle(&Snapshot::default()).await;
        assert_eq!(response.replies, vec!["Which team should I check results for?"]);
        assert!(response.events.is_empty());
    }
}
