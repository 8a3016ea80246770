use async_trait::async_trait;

use super::Action;
use crate::models::{ActionResponse, Snapshot};

const DATA_KEYWORDS: &[&str] = &["data", "ml", "ai"];
const WEB_KEYWORDS: &[&str] = &["web", "frontend", "backend"];

pub const GENERAL_ADVICE: &str = "Consider your interests, strengths, and market demand. Try internships or projects to explore paths, and network with professionals.";
pub const DATA_ADVICE: &str = "Data/ML is strong: build math/stats foundations, practice with real datasets, and showcase projects (Kaggle, GitHub).";
pub const WEB_ADVICE: &str = "Web dev: pick a stack (React/Node or Django), build 3–5 portfolio apps, and learn deployments.";

/// Canned career advice picked by keyword
pub struct CareerAdviceAction;

/// Data keywords are checked before web keywords; matching is by substring
#[must_use]
pub fn select_advice(text: &str) -> &'static str {
    let text = text.to_lowercase();
    if DATA_KEYWORDS.iter().any(|k| text.contains(k)) {
        DATA_ADVICE
    } else if WEB_KEYWORDS.iter().any(|k| text.contains(k)) {
        WEB_ADVICE
    } else {
        GENERAL_ADVICE
    }
}

#[async_trait]
impl Action for CareerAdviceAction {
    // matches the action name registered in the assistant's domain
    fn name(&self) -> &'static str {
        "action_carrer_advice"
    }

    async fn handle(&self, snapshot: &Snapshot) -> ActionResponse {
        ActionResponse::reply(select_advice(snapshot.text()))
    }
}
