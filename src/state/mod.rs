mod controller;
mod persistence;

pub use controller::{merge_locked, PlanStateController, UndoSnapshot};
pub use persistence::PlanStore;
