pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod service;
pub mod state;

pub use error::{NutriError, Result};
pub use models::{MealOption, MealSlot, Plan, SavedPlan, UserProfile};
pub use service::{HttpPlanService, PlanService};
pub use state::{PlanStateController, PlanStore};
