use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{NutriError, Result};

/// One alternative set of food items for a meal slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealOption {
    pub items: Vec<String>,
    pub calories: f64,
}

/// A meal position in the day with at least one option.
#[derive(Debug, Clone, PartialEq)]
pub struct MealSlot {
    pub name: String,
    options: Vec<MealOption>,
}

impl MealSlot {
    /// Build a slot, rejecting an empty alternative list.
    pub fn new(name: impl Into<String>, options: Vec<MealOption>) -> Result<Self> {
        let name = name.into();
        if options.is_empty() {
            return Err(NutriError::InvalidResponse(format!(
                "meal '{}' has no options",
                name
            )));
        }
        Ok(Self { name, options })
    }

    /// A slot carrying exactly one option, as produced for locked meals.
    pub fn singleton(name: impl Into<String>, option: MealOption) -> Self {
        Self {
            name: name.into(),
            options: vec![option],
        }
    }

    pub fn options(&self) -> &[MealOption] {
        &self.options
    }

    /// Selection index clamped into range: out-of-range resolves to 0.
    pub fn resolve_index(&self, index: usize) -> usize {
        if index < self.options.len() { index } else { 0 }
    }

    /// The option at `index`, or the first option when out of range.
    pub fn option_at(&self, index: usize) -> &MealOption {
        &self.options[self.resolve_index(index)]
    }
}

/// Daily macronutrient targets in grams.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Macros {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}

/// A meal as sent by the plan service.
///
/// Older responses carry a single option inline; newer ones an `options`
/// list. Both normalize into a [`MealSlot`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MealEntry {
    MultiOption {
        meal: String,
        options: Vec<MealOption>,
    },
    SingleOption {
        meal: String,
        items: Vec<String>,
        calories: f64,
    },
}

impl MealEntry {
    pub fn into_slot(self) -> Result<MealSlot> {
        match self {
            MealEntry::MultiOption { meal, options } => MealSlot::new(meal, options),
            MealEntry::SingleOption {
                meal,
                items,
                calories,
            } => Ok(MealSlot::singleton(meal, MealOption { items, calories })),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanBody {
    pub meals: Vec<MealEntry>,
    pub total_calories: Option<f64>,
}

/// Raw JSON body returned by `POST /api/plan`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanResponse {
    pub tdee: Option<f64>,
    pub macros: Option<Macros>,
    pub plan: Option<PlanBody>,
    pub error: Option<String>,
}

impl PlanResponse {
    /// Normalize into a [`Plan`], turning an `error` field into a domain error.
    pub fn into_plan(self) -> Result<Plan> {
        if let Some(error) = self.error {
            return Err(NutriError::Domain(error));
        }

        let tdee = self
            .tdee
            .ok_or_else(|| NutriError::InvalidResponse("missing tdee".to_string()))?;
        let macros = self
            .macros
            .ok_or_else(|| NutriError::InvalidResponse("missing macros".to_string()))?;
        let body = self
            .plan
            .ok_or_else(|| NutriError::InvalidResponse("missing plan".to_string()))?;

        let slots = body
            .meals
            .into_iter()
            .map(MealEntry::into_slot)
            .collect::<Result<Vec<_>>>()?;

        let plan = Plan {
            tdee,
            macros,
            slots,
        };

        if let Some(reported) = body.total_calories {
            let computed = plan.total_calories(&[]);
            if (reported - computed).abs() > 0.5 {
                debug!(reported, computed, "service total differs from default selection");
            }
        }

        Ok(plan)
    }
}

/// A normalized daily plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub tdee: f64,
    pub macros: Macros,
    pub slots: Vec<MealSlot>,
}

impl Plan {
    /// Sum of each slot's selected option calories.
    ///
    /// Missing or out-of-range selections count as option 0.
    pub fn total_calories(&self, selections: &[usize]) -> f64 {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| slot.option_at(selection_for(selections, i)).calories)
            .sum()
    }

    /// Flatten the current selection into one meal per slot.
    pub fn resolve(&self, selections: &[usize]) -> Vec<SelectedMeal> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let option = slot.option_at(selection_for(selections, i));
                SelectedMeal {
                    meal: slot.name.clone(),
                    items: option.items.clone(),
                    calories: option.calories,
                }
            })
            .collect()
    }
}

fn selection_for(selections: &[usize], slot: usize) -> usize {
    selections.get(slot).copied().unwrap_or(0)
}

/// A slot reduced to the option the user picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedMeal {
    pub meal: String,
    pub items: Vec<String>,
    pub calories: f64,
}
