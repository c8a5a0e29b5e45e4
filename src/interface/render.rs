use std::fmt;

use crate::interface::view::PlanView;
use crate::models::SavedPlan;
use crate::planner::GoalSuggestion;

/// The interactive plan screen.
impl fmt::Display for PlanView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "=== Personalized Daily Plan ===")?;
        writeln!(f, "TDEE: {:.2} kcal/day", self.tdee)?;
        writeln!(
            f,
            "Macros: Protein: {}g | Carbs: {}g | Fats: {}g",
            self.macros.protein_g, self.macros.carbs_g, self.macros.fats_g
        )?;
        writeln!(f)?;

        for slot in &self.slots {
            let lock = if slot.locked { "  [locked]" } else { "" };
            writeln!(f, "{}. {}{}", slot.index + 1, slot.name, lock)?;

            for option in &slot.options {
                let marker = if option.selected { "(*)" } else { "( )" };
                writeln!(f, "     {} {} ({:.0} kcal)", marker, option.label, option.calories)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Total Calories: {:.0} kcal", self.total_calories)?;
        if self.undo_available {
            writeln!(f, "(Undo is available for the last regeneration.)")?;
        }
        Ok(())
    }
}

/// A loaded plan, which has no alternatives left to choose from.
impl fmt::Display for SavedPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "=== Loaded Plan ===")?;
        if let Some(when) = chrono::DateTime::from_timestamp_millis(self.ts) {
            writeln!(f, "Saved: {}", when.format("%Y-%m-%d %H:%M UTC"))?;
        }
        writeln!(f)?;

        for meal in &self.meals {
            writeln!(f, "{}", meal.meal)?;
            writeln!(f, "     {} ({:.0} kcal)", meal.items.join(", "), meal.calories)?;
        }

        writeln!(f)?;
        writeln!(f, "Total Calories: {:.0} kcal", self.total_calories())
    }
}

impl fmt::Display for GoalSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BMI: {:.1} - {}", self.bmi, self.category)?;
        writeln!(f, "Suggested goal: {}", self.goal)
    }
}

pub fn display_plan(view: &PlanView) {
    print!("{}", view);
}

pub fn display_saved_plan(saved: &SavedPlan) {
    print!("{}", saved);
}

pub fn display_goal_suggestion(suggestion: &GoalSuggestion) {
    println!();
    print!("{}", suggestion);
}
