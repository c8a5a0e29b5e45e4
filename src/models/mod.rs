mod plan;
mod profile;
mod saved;

pub use plan::{
    Macros, MealEntry, MealOption, MealSlot, Plan, PlanBody, PlanResponse, SelectedMeal,
};
pub use profile::{ActivityLevel, Diet, Goal, Sex, UserProfile};
pub use saved::SavedPlan;
