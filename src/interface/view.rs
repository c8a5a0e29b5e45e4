use std::fmt;

use crate::models::Macros;
use crate::service::PlanService;
use crate::state::PlanStateController;

#[derive(Debug, Clone, PartialEq)]
pub struct OptionView {
    pub index: usize,
    pub label: String,
    pub calories: f64,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    pub index: usize,
    pub name: String,
    pub options: Vec<OptionView>,
    pub locked: bool,
}

impl SlotView {
    pub fn selected(&self) -> Option<&OptionView> {
        self.options.iter().find(|o| o.selected)
    }
}

/// Everything the plan screen shows, derived from controller state.
///
/// Built fresh before every render, so the offered actions always follow the
/// current state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanView {
    pub tdee: f64,
    pub macros: Macros,
    pub slots: Vec<SlotView>,
    pub total_calories: f64,
    pub undo_available: bool,
}

impl PlanView {
    /// `None` when no plan is shown.
    pub fn from_controller<S: PlanService>(controller: &PlanStateController<S>) -> Option<Self> {
        let plan = controller.plan()?;

        let slots = plan
            .slots
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                let selected = controller.selected_index(index);
                SlotView {
                    index,
                    name: slot.name.clone(),
                    options: slot
                        .options()
                        .iter()
                        .enumerate()
                        .map(|(i, option)| OptionView {
                            index: i,
                            label: option.items.join(", "),
                            calories: option.calories,
                            selected: i == selected,
                        })
                        .collect(),
                    locked: controller.is_locked(index),
                }
            })
            .collect();

        Some(Self {
            tdee: plan.tdee,
            macros: plan.macros,
            slots,
            total_calories: plan.total_calories(controller.selections()),
            undo_available: controller.undo_available(),
        })
    }

    /// Slots offering more than one alternative.
    pub fn selectable_slots(&self) -> impl Iterator<Item = &SlotView> {
        self.slots.iter().filter(|s| s.options.len() > 1)
    }
}

/// A user action offered by the session menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Generate,
    SelectOption,
    ToggleLock,
    Regenerate,
    Undo,
    Save,
    Load,
    EditProfile,
    SuggestGoal,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Generate => "Generate plan",
            Action::SelectOption => "Choose a meal alternative",
            Action::ToggleLock => "Lock / unlock a meal",
            Action::Regenerate => "Regenerate alternatives",
            Action::Undo => "Undo regeneration",
            Action::Save => "Save plan",
            Action::Load => "Load my plan",
            Action::EditProfile => "Edit profile",
            Action::SuggestGoal => "Suggest goal from BMI",
            Action::Quit => "Quit",
        })
    }
}

/// Actions available for the current view, in menu order.
pub fn available_actions(view: Option<&PlanView>) -> Vec<Action> {
    let mut actions = vec![Action::Generate];
    if let Some(view) = view {
        if view.selectable_slots().next().is_some() {
            actions.push(Action::SelectOption);
        }
        if !view.slots.is_empty() {
            actions.push(Action::ToggleLock);
        }
        actions.push(Action::Regenerate);
        if view.undo_available {
            actions.push(Action::Undo);
        }
        actions.push(Action::Save);
    }
    actions.extend([
        Action::Load,
        Action::EditProfile,
        Action::SuggestGoal,
        Action::Quit,
    ]);
    actions
}
