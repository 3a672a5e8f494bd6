//! API request and response types

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::health_metrics::{
    in_legacy_gap, ActivityLevel, BmiCategory, BmiResult, BmiScale, CalorieEstimate, Gender,
    UserProfile,
};
use crate::prompts::PromptKind;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Metrics
// ============================================================================

/// BMI request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BmiRequest {
    #[validate(range(min = 50.0, max = 250.0, message = "Height must be between 50 and 250 cm"))]
    pub height_cm: f64,
    #[validate(range(min = 10.0, max = 300.0, message = "Weight must be between 10 and 300 kg"))]
    pub weight_kg: f64,
}

/// BMI information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiInfo {
    /// BMI rounded to two decimals
    pub bmi: f64,
    pub category: BmiCategory,
    pub advice: String,
    pub scale: BmiScale,
    /// Set when the value lies in a band the legacy scale leaves unmatched
    pub in_legacy_gap: bool,
}

impl From<BmiResult> for BmiInfo {
    fn from(result: BmiResult) -> Self {
        Self {
            bmi: (result.value * 100.0).round() / 100.0,
            category: result.category,
            advice: result.category.advice().to_string(),
            scale: result.scale,
            in_legacy_gap: in_legacy_gap(result.value),
        }
    }
}

/// Calorie estimate request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CalorieRequest {
    pub gender: Gender,
    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age_years: u32,
    #[validate(range(min = 50.0, max = 250.0, message = "Height must be between 50 and 250 cm"))]
    pub height_cm: f64,
    #[validate(range(min = 10.0, max = 300.0, message = "Weight must be between 10 and 300 kg"))]
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
}

/// Calorie estimate information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyInfo {
    pub bmr: f64,
    pub activity_level: ActivityLevel,
    pub activity_multiplier: f64,
    /// Daily calorie need rounded to whole kcal
    pub daily_calories: f64,
}

impl EnergyInfo {
    pub fn new(estimate: CalorieEstimate, activity_level: ActivityLevel) -> Self {
        Self {
            bmr: estimate.bmr,
            activity_level,
            activity_multiplier: estimate.activity_multiplier,
            daily_calories: estimate.daily_calories.round(),
        }
    }
}

/// One entry of the gender selector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenderOption {
    pub value: Gender,
    pub label: String,
}

/// One entry of the activity selector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityOption {
    pub value: ActivityLevel,
    pub label: String,
    pub description: String,
    pub multiplier: f64,
}

/// Choices offered by the profile form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileOptionsResponse {
    pub genders: Vec<GenderOption>,
    pub activity_levels: Vec<ActivityOption>,
    pub default_activity_level: ActivityLevel,
}

impl ProfileOptionsResponse {
    pub fn new() -> Self {
        Self {
            genders: Gender::ALL
                .iter()
                .map(|g| GenderOption {
                    value: *g,
                    label: g.label().to_string(),
                })
                .collect(),
            activity_levels: ActivityLevel::ALL
                .iter()
                .map(|a| ActivityOption {
                    value: *a,
                    label: a.label().to_string(),
                    description: a.description().to_string(),
                    multiplier: a.multiplier(),
                })
                .collect(),
            default_activity_level: ActivityLevel::default(),
        }
    }
}

impl Default for ProfileOptionsResponse {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Analysis
// ============================================================================

/// Full diet analysis request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalysisRequest {
    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age_years: Option<u32>,
    #[validate(range(min = 50.0, max = 250.0, message = "Height must be between 50 and 250 cm"))]
    pub height_cm: f64,
    #[validate(range(min = 10.0, max = 300.0, message = "Weight must be between 10 and 300 kg"))]
    pub weight_kg: f64,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    /// Comma-separated food items
    pub foods: String,
}

impl AnalysisRequest {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            age_years: self.age_years,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            gender: self.gender,
            activity_level: self.activity_level,
        }
    }
}

/// Full diet analysis response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub id: String,
    pub bmi: Option<BmiInfo>,
    pub energy: Option<EnergyInfo>,
    /// Parsed food tokens
    pub foods: Vec<String>,
    pub analysis: String,
    pub meal_plan: String,
    pub generated_at: DateTime<Utc>,
}

// ============================================================================
// Advice
// ============================================================================

/// Free-form question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

/// Symptom-based deficiency request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeficiencyRequest {
    pub symptoms: Vec<String>,
}

/// Meal photo, base64 encoded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    pub image_base64: String,
    #[serde(default = "default_image_mime")]
    pub mime_type: String,
}

fn default_image_mime() -> String {
    "image/jpeg".to_string()
}

/// Reply from the advice model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub kind: PromptKind,
    pub answer: String,
}

/// Symptom catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomListResponse {
    pub symptoms: Vec<String>,
}

// ============================================================================
// Charts and export
// ============================================================================

/// Caller-supplied chart data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartRequest {
    pub actual: BTreeMap<String, f64>,
    pub recommended: BTreeMap<String, f64>,
}

/// PDF page layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExportLayout {
    /// One output line per input line
    Plain,
    /// Blank-line separated sections with bold headings and a footer
    #[default]
    Sectioned,
}

/// Export arbitrary text as PDF
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfExportRequest {
    pub content: String,
    #[serde(default)]
    pub layout: ExportLayout,
}

/// Export an analysis and meal plan as one PDF report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportExportRequest {
    pub analysis: String,
    pub meal_plan: String,
    #[serde(default)]
    pub layout: ExportLayout,
}
