use std::fmt;

use serde::{Deserialize, Serialize};

/// Biological sex used by the service's BMR estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

/// Activity labels offered by the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    #[serde(rename = "Mostly Sitting")]
    MostlySitting,
    #[serde(rename = "Some Movement")]
    SomeMovement,
    #[serde(rename = "Regular Exercise")]
    RegularExercise,
    #[serde(rename = "Very Active")]
    VeryActive,
    Athlete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "Lose Fat")]
    LoseFat,
    Maintain,
    #[serde(rename = "Gain Muscle")]
    GainMuscle,
    #[serde(rename = "Gain Weight")]
    GainWeight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diet {
    Vegetarian,
    Vegan,
    #[serde(rename = "Non-Vegetarian")]
    NonVegetarian,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::MostlySitting,
        ActivityLevel::SomeMovement,
        ActivityLevel::RegularExercise,
        ActivityLevel::VeryActive,
        ActivityLevel::Athlete,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::MostlySitting => "Mostly Sitting",
            ActivityLevel::SomeMovement => "Some Movement",
            ActivityLevel::RegularExercise => "Regular Exercise",
            ActivityLevel::VeryActive => "Very Active",
            ActivityLevel::Athlete => "Athlete",
        }
    }
}

impl Goal {
    pub const ALL: [Goal; 4] = [Goal::LoseFat, Goal::Maintain, Goal::GainMuscle, Goal::GainWeight];

    pub fn label(self) -> &'static str {
        match self {
            Goal::LoseFat => "Lose Fat",
            Goal::Maintain => "Maintain",
            Goal::GainMuscle => "Gain Muscle",
            Goal::GainWeight => "Gain Weight",
        }
    }
}

impl Diet {
    pub const ALL: [Diet; 3] = [Diet::Vegetarian, Diet::Vegan, Diet::NonVegetarian];

    pub fn label(self) -> &'static str {
        match self {
            Diet::Vegetarian => "Vegetarian",
            Diet::Vegan => "Vegan",
            Diet::NonVegetarian => "Non-Vegetarian",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_via_label!(Sex, ActivityLevel, Goal, Diet);

/// The biometrics entered in the profile form.
///
/// Serializes to the request body the plan service expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub sex: Sex,
    pub age: u32,
    /// Height in centimetres.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    pub activity: ActivityLevel,
    pub goal: Goal,
    pub diet: Diet,
}

impl UserProfile {
    /// Normalized identity used to match a saved plan against the form.
    ///
    /// Fields are joined with `|` and lower-cased, so `70.0` kg and `70` kg
    /// produce the same key.
    pub fn signature(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}|{}",
            self.sex, self.age, self.height, self.weight, self.activity, self.goal, self.diet
        )
        .to_lowercase()
    }

    /// Reject values the service cannot compute a plan from.
    pub fn validate(&self) -> crate::Result<()> {
        if self.age == 0 {
            return Err(crate::NutriError::Validation(
                "Age must be greater than zero.".to_string(),
            ));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(crate::NutriError::Validation(
                "Height must be a positive number of centimetres.".to_string(),
            ));
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(crate::NutriError::Validation(
                "Weight must be a positive number of kilograms.".to_string(),
            ));
        }
        Ok(())
    }
}
