use serde::{Deserialize, Serialize};

use crate::models::{SelectedMeal, UserProfile};

/// The plan persisted under the fixed storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlan {
    /// Profile the plan was generated for.
    pub user: UserProfile,
    pub signature: String,
    pub meals: Vec<SelectedMeal>,
    /// Milliseconds since the Unix epoch.
    pub ts: i64,
}

impl SavedPlan {
    pub fn new(user: UserProfile, meals: Vec<SelectedMeal>) -> Self {
        let signature = user.signature();
        Self {
            user,
            signature,
            meals,
            ts: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn total_calories(&self) -> f64 {
        self.meals.iter().map(|m| m.calories).sum()
    }

    /// Whether this save was made for the profile currently entered.
    pub fn matches(&self, profile: &UserProfile) -> bool {
        !self.signature.is_empty() && self.signature == profile.signature()
    }
}
