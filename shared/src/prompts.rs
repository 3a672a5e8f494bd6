//! Prompt templates sent to the advice model
//!
//! Every prompt is plain interpolation of user input into a fixed sentence.
//! User text is inserted verbatim, so the model sees exactly what was typed.

use serde::{Deserialize, Serialize};

use crate::health_metrics::BmiCategory;

/// Which template produced a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    DietAnalysis,
    MealPlan,
    ImageDescription,
    Question,
    Deficiency,
}

impl PromptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKind::DietAnalysis => "diet_analysis",
            PromptKind::MealPlan => "meal_plan",
            PromptKind::ImageDescription => "image_description",
            PromptKind::Question => "question",
            PromptKind::Deficiency => "deficiency",
        }
    }
}

/// A prompt ready to send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub kind: PromptKind,
    pub text: String,
}

impl Prompt {
    fn new(kind: PromptKind, text: String) -> Self {
        Self { kind, text }
    }
}

/// Category label as interpolated into prompts; empty when BMI is unknown
fn category_label(category: Option<BmiCategory>) -> &'static str {
    category.map(|c| c.as_str()).unwrap_or("")
}

/// Nutrient-deficiency analysis of the day's food
pub fn diet_analysis(food_text: &str, category: Option<BmiCategory>) -> Prompt {
    Prompt::new(
        PromptKind::DietAnalysis,
        format!(
            "The user consumed {food_text}. Their BMI category is {}. Based on this, \
             analyze potential nutrient deficiencies, provide detailed nutrition insights, \
             and recommend food-based improvements.",
            category_label(category)
        ),
    )
}

/// Next-day meal plan
pub fn meal_plan(food_text: &str, category: Option<BmiCategory>) -> Prompt {
    Prompt::new(
        PromptKind::MealPlan,
        format!(
            "Based on {food_text} and BMI category {}, suggest a healthy meal plan for the \
             next day that includes balanced macro and micronutrients.",
            category_label(category)
        ),
    )
}

/// Caption request sent together with a meal photo
pub fn image_description() -> Prompt {
    Prompt::new(
        PromptKind::ImageDescription,
        "Describe the food items visible in this image, estimate the portion sizes, and \
         summarize their approximate nutritional content."
            .to_string(),
    )
}

/// Free-form nutrition question, passed through unchanged
pub fn question(text: &str) -> Prompt {
    Prompt::new(PromptKind::Question, text.to_string())
}

/// Possible deficiencies behind a set of symptoms
pub fn deficiency_from_symptoms(symptoms: &[String]) -> Prompt {
    Prompt::new(
        PromptKind::Deficiency,
        format!(
            "The user is experiencing the following symptoms: {}. Identify the nutrient \
             deficiencies that could cause these symptoms and recommend foods that help \
             address them.",
            symptoms.join(", ")
        ),
    )
}
