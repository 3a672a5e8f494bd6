//! Nutri Advisor WASM Module
//!
//! Browser bindings for the body metric calculators, so the form can show
//! BMI and calorie estimates before anything is submitted.

use nutri_advisor_shared::{
    calculate_bmi_result, estimate_daily_calories as estimate, ActivityLevel, BmiInfo, BmiScale,
    FoodList, Gender, ValidationError,
};
use wasm_bindgen::prelude::*;

fn scale(standard: bool) -> BmiScale {
    if standard {
        BmiScale::Standard
    } else {
        BmiScale::Legacy
    }
}

/// Calculate BMI from weight (kg) and height (cm); 0 for unusable input
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    nutri_advisor_shared::calculate_bmi(weight_kg, height_cm).unwrap_or(0.0)
}

/// Category key for a BMI value
#[wasm_bindgen]
pub fn classify_bmi(bmi: f64, standard: bool) -> String {
    nutri_advisor_shared::classify_bmi(bmi, scale(standard))
        .as_str()
        .to_string()
}

/// BMI, category and advice as JSON; empty string for unusable input
#[wasm_bindgen]
pub fn bmi_report(weight_kg: f64, height_cm: f64, standard: bool) -> String {
    calculate_bmi_result(weight_kg, height_cm, scale(standard))
        .map(BmiInfo::from)
        .and_then(|info| serde_json::to_string(&info).ok())
        .unwrap_or_default()
}

/// Daily calorie need (Mifflin-St Jeor BMR times the activity multiplier)
#[wasm_bindgen]
pub fn estimate_daily_calories(
    gender: &str,
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    activity_level: &str,
) -> Result<f64, JsValue> {
    daily_calories(gender, weight_kg, height_cm, age_years, activity_level)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Normalized food tokens as a JSON array
#[wasm_bindgen]
pub fn parse_foods(text: &str) -> String {
    serde_json::to_string(&FoodList::parse(text).items).unwrap_or_else(|_| "[]".to_string())
}

fn daily_calories(
    gender: &str,
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    activity_level: &str,
) -> Result<f64, ValidationError> {
    let gender: Gender = gender.parse()?;
    let activity: ActivityLevel = activity_level.parse()?;
    Ok(estimate(gender, weight_kg, height_cm, age_years, activity).daily_calories)
}
