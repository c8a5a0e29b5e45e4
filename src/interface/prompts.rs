use dialoguer::{Confirm, Input, Select};

use crate::error::{NutriError, Result};
use crate::interface::view::{Action, PlanView, SlotView};
use crate::models::{ActivityLevel, Diet, Goal, Sex, UserProfile};

fn prompt_number<T: std::str::FromStr>(prompt: &str, default: Option<String>) -> Result<T> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(default) = default {
        input = input.default(default);
    }
    let raw = input.interact_text()?;

    raw.trim()
        .parse()
        .map_err(|_| NutriError::InvalidInput(format!("'{}' is not a valid number", raw.trim())))
}

fn prompt_choice<T: Copy + PartialEq + ToString>(
    prompt: &str,
    choices: &[T],
    current: Option<T>,
) -> Result<T> {
    let labels: Vec<String> = choices.iter().map(ToString::to_string).collect();
    let default = current
        .and_then(|c| choices.iter().position(|x| *x == c))
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(choices[selection])
}

/// Fill in the profile form, starting from `current` when editing.
pub fn prompt_profile(current: Option<&UserProfile>) -> Result<UserProfile> {
    let sex = prompt_choice("Sex", &Sex::ALL, current.map(|p| p.sex))?;
    let age = prompt_number("Age (years)", current.map(|p| p.age.to_string()))?;
    let height = prompt_number("Height (cm)", current.map(|p| p.height.to_string()))?;
    let weight = prompt_number("Weight (kg)", current.map(|p| p.weight.to_string()))?;
    let activity = prompt_choice("Activity level", &ActivityLevel::ALL, current.map(|p| p.activity))?;
    let goal = prompt_choice("Goal", &Goal::ALL, current.map(|p| p.goal))?;
    let diet = prompt_choice("Diet preference", &Diet::ALL, current.map(|p| p.diet))?;

    let profile = UserProfile {
        sex,
        age,
        height,
        weight,
        activity,
        goal,
        diet,
    };
    profile.validate()?;
    Ok(profile)
}

/// Ask for optional height and weight; empty input means "not entered".
pub fn prompt_measurements() -> Result<(Option<f64>, Option<f64>)> {
    let read = |prompt: &str| -> Result<Option<f64>> {
        let raw: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse()
            .map(Some)
            .map_err(|_| NutriError::InvalidInput(format!("'{}' is not a valid number", raw)))
    };

    Ok((read("Height (cm)")?, read("Weight (kg)")?))
}

pub fn prompt_action(actions: &[Action]) -> Result<Action> {
    prompt_choice("What next?", actions, None)
}

/// Pick a meal slot by name.
pub fn prompt_slot<'a>(prompt: &str, slots: &[&'a SlotView]) -> Result<&'a SlotView> {
    let labels: Vec<String> = slots
        .iter()
        .map(|s| {
            if s.locked {
                format!("{} [locked]", s.name)
            } else {
                s.name.clone()
            }
        })
        .collect();

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(slots[selection])
}

/// Pick one of the slot's alternatives; returns the option index.
pub fn prompt_option(slot: &SlotView) -> Result<usize> {
    let labels: Vec<String> = slot
        .options
        .iter()
        .map(|o| format!("{} ({:.0} kcal)", o.label, o.calories))
        .collect();
    let default = slot.selected().map(|o| o.index).unwrap_or(0);

    Ok(Select::new()
        .with_prompt(format!("Choose an alternative for {}", slot.name))
        .items(&labels)
        .default(default)
        .interact()?)
}

pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Convenience for flows that need the view's slots as references.
pub fn slot_refs(view: &PlanView) -> Vec<&SlotView> {
    view.slots.iter().collect()
}
