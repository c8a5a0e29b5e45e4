pub mod constants;
pub mod goal;

pub use constants::*;
pub use goal::{calculate_bmi, classify_bmi, suggest_goal, BmiCategory, GoalSuggestion};
