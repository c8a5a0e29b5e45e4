pub mod prompts;
pub mod render;
pub mod view;

pub use prompts::{
    prompt_action, prompt_measurements, prompt_option, prompt_profile, prompt_slot,
    prompt_yes_no, slot_refs,
};
pub use render::{display_goal_suggestion, display_plan, display_saved_plan};
pub use view::{available_actions, Action, OptionView, PlanView, SlotView};
