//! Health metrics calculations module
//!
//! Provides BMI classification and daily calorie estimation from the body
//! metrics a user enters alongside their food list.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Deterministic**: Same inputs always give the same category and numbers
//! 3. **Explicit Scales**: BMI cut-offs are selected, never implied

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

// ============================================================================
// User Profile Types
// ============================================================================

/// Gender as offered by the profile form.
///
/// Only `Male` selects the male BMR formula; `Female` and `Other` share the
/// second formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(alias = "male")]
    Male,
    #[serde(alias = "female")]
    Female,
    #[serde(alias = "other")]
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(ValidationError::invalid("gender", format!("unknown gender '{s}'"))),
        }
    }
}

/// Activity level for the calorie estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ActivityLevel {
    /// Little or no exercise
    #[serde(rename = "Sedentary", alias = "sedentary")]
    Sedentary,
    /// Light exercise 1-3 days/week
    #[default]
    #[serde(rename = "Lightly Active", alias = "lightly_active")]
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    #[serde(rename = "Moderately Active", alias = "moderately_active")]
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    #[serde(rename = "Very Active", alias = "very_active")]
    VeryActive,
    /// Very hard exercise, physical job
    #[serde(rename = "Extra Active", alias = "extra_active")]
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    /// Get the activity multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    /// Label shown in the activity selector
    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::ModeratelyActive => "Moderately Active",
            ActivityLevel::VeryActive => "Very Active",
            ActivityLevel::ExtraActive => "Extra Active",
        }
    }

    /// Hint shown under the selector
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Desk job, little deliberate movement",
            ActivityLevel::LightlyActive => "Walks or light workouts a few times a week",
            ActivityLevel::ModeratelyActive => "Workouts on most days of the week",
            ActivityLevel::VeryActive => "Intense training almost every day",
            ActivityLevel::ExtraActive => "Manual labour or twice-daily training",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = ValidationError;

    /// Accepts both the selector label ("Moderately Active") and the
    /// snake_case key ("moderately_active").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightly_active" => Ok(ActivityLevel::LightlyActive),
            "moderately_active" => Ok(ActivityLevel::ModeratelyActive),
            "very_active" => Ok(ActivityLevel::VeryActive),
            "extra_active" | "super_active" => Ok(ActivityLevel::ExtraActive),
            _ => Err(ValidationError::invalid(
                "activity_level",
                format!("unknown activity level '{s}'"),
            )),
        }
    }
}

/// Body metrics entered with a submission. Not stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub age_years: Option<u32>,
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
}

impl UserProfile {
    pub fn bmi(&self, scale: BmiScale) -> Option<BmiResult> {
        calculate_bmi_result(self.weight_kg, self.height_cm, scale)
    }

    /// Calorie estimate, available only once gender, age and activity are known
    pub fn calories(&self) -> Option<CalorieEstimate> {
        let gender = self.gender?;
        let age = self.age_years?;
        let activity = self.activity_level?;
        Some(estimate_daily_calories(
            gender,
            self.weight_kg,
            self.height_cm,
            age,
            activity,
        ))
    }
}

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Lowercase label used in prompts and responses
    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }

    /// Guidance shown next to the BMI value
    pub fn advice(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "You are underweight. Consider a balanced diet.",
            BmiCategory::Normal => "Your BMI is normal.",
            BmiCategory::Overweight => "You are overweight. Consider a healthy diet plan.",
            BmiCategory::Obese => "You are in the obese category. Consult a nutritionist.",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cut-off set used to classify a BMI value.
///
/// `Legacy` keeps the historical chain `< 18.5`, `18.5..24.9`, `25..29.9`,
/// else obese. Values in `[24.9, 25.0)` and `[29.9, 30.0)` match no bracket
/// and fall through to `Obese`. `Standard` uses 18.5 / 25 / 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BmiScale {
    #[default]
    Legacy,
    Standard,
}

/// BMI calculation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiResult {
    /// BMI value
    pub value: f64,
    /// BMI category
    pub category: BmiCategory,
    /// Scale the category was assigned under
    pub scale: BmiScale,
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
///
/// Returns `None` unless both inputs are finite and strictly positive.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !(weight_kg.is_finite() && height_cm.is_finite()) || weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(weight_kg / (height_m * height_m))
}

/// Classify BMI into category
pub fn classify_bmi(bmi: f64, scale: BmiScale) -> BmiCategory {
    match scale {
        BmiScale::Legacy => {
            if bmi < 18.5 {
                BmiCategory::Underweight
            } else if (18.5..24.9).contains(&bmi) {
                BmiCategory::Normal
            } else if (25.0..29.9).contains(&bmi) {
                BmiCategory::Overweight
            } else {
                BmiCategory::Obese
            }
        }
        BmiScale::Standard => {
            if bmi < 18.5 {
                BmiCategory::Underweight
            } else if bmi < 25.0 {
                BmiCategory::Normal
            } else if bmi < 30.0 {
                BmiCategory::Overweight
            } else {
                BmiCategory::Obese
            }
        }
    }
}

/// True when `bmi` sits in a band the legacy chain leaves unmatched
pub fn in_legacy_gap(bmi: f64) -> bool {
    (24.9..25.0).contains(&bmi) || (29.9..30.0).contains(&bmi)
}

/// Calculate complete BMI result
pub fn calculate_bmi_result(weight_kg: f64, height_cm: f64, scale: BmiScale) -> Option<BmiResult> {
    let value = calculate_bmi(weight_kg, height_cm)?;
    Some(BmiResult {
        value,
        category: classify_bmi(value, scale),
        scale,
    })
}

// ============================================================================
// BMR and Calorie Calculations
// ============================================================================

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Male: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Otherwise: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr(gender: Gender, weight_kg: f64, height_cm: f64, age_years: u32) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Other => base - 161.0,
    }
}

/// Daily calorie estimate with breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieEstimate {
    /// Basal Metabolic Rate
    pub bmr: f64,
    /// Activity multiplier used
    pub activity_multiplier: f64,
    /// Daily calorie need (BMR × multiplier)
    pub daily_calories: f64,
}

/// Estimate daily calorie need
///
/// Daily calories = BMR × activity multiplier
pub fn estimate_daily_calories(
    gender: Gender,
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    activity_level: ActivityLevel,
) -> CalorieEstimate {
    let bmr = calculate_bmr(gender, weight_kg, height_cm, age_years);
    let multiplier = activity_level.multiplier();
    CalorieEstimate {
        bmr,
        activity_multiplier: multiplier,
        daily_calories: bmr * multiplier,
    }
}
