use std::fmt;

use crate::error::{NutriError, Result};
use crate::models::Goal;
use crate::planner::constants::*;

/// BMI band names shown next to the suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Healthy,
    Overweight,
    Obese,
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Healthy => "Healthy",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalSuggestion {
    pub bmi: f64,
    pub category: BmiCategory,
    pub goal: Goal,
}

/// Body mass index from height in centimetres and weight in kilograms.
#[inline]
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Map a BMI onto its category and the goal offered to the user.
pub fn classify_bmi(bmi: f64) -> (BmiCategory, Goal) {
    if bmi < BMI_UNDERWEIGHT_MAX {
        (BmiCategory::Underweight, Goal::GainWeight)
    } else if bmi < BMI_HEALTHY_MAX {
        let goal = if bmi <= BMI_LEAN_HEALTHY_MAX {
            Goal::GainMuscle
        } else {
            Goal::Maintain
        };
        (BmiCategory::Healthy, goal)
    } else if bmi < BMI_OVERWEIGHT_MAX {
        (BmiCategory::Overweight, Goal::LoseFat)
    } else {
        (BmiCategory::Obese, Goal::LoseFat)
    }
}

/// Suggest a goal from the form's height and weight.
///
/// Both values are required and must be positive.
pub fn suggest_goal(height_cm: Option<f64>, weight_kg: Option<f64>) -> Result<GoalSuggestion> {
    let positive = |v: Option<f64>| v.filter(|x| x.is_finite() && *x > 0.0);
    let (Some(height), Some(weight)) = (positive(height_cm), positive(weight_kg)) else {
        return Err(NutriError::Validation(
            "Please enter height and weight first.".to_string(),
        ));
    };

    let bmi = calculate_bmi(height, weight);
    let (category, goal) = classify_bmi(bmi);
    Ok(GoalSuggestion {
        bmi,
        category,
        goal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(classify_bmi(18.49), (BmiCategory::Underweight, Goal::GainWeight));
        assert_eq!(classify_bmi(18.5), (BmiCategory::Healthy, Goal::GainMuscle));
        assert_eq!(classify_bmi(21.5), (BmiCategory::Healthy, Goal::GainMuscle));
        assert_eq!(classify_bmi(21.51), (BmiCategory::Healthy, Goal::Maintain));
        assert_eq!(classify_bmi(25.0), (BmiCategory::Overweight, Goal::LoseFat));
        assert_eq!(classify_bmi(30.0), (BmiCategory::Obese, Goal::LoseFat));
    }

    #[test]
    fn test_missing_measurement_is_validation_error() {
        assert!(matches!(
            suggest_goal(None, Some(70.0)),
            Err(NutriError::Validation(_))
        ));
        assert!(matches!(
            suggest_goal(Some(180.0), Some(0.0)),
            Err(NutriError::Validation(_))
        ));
    }
}
