//! Input validation functions
//!
//! This module provides validation utilities for user input.
//! Range checks on request structs use the `validator` derive; the checks
//! below cover what a derive cannot express.

use crate::errors::ValidationError;
use crate::nutrients::canonical_symptom;

/// Longest food list accepted, in characters
pub const MAX_FOOD_TEXT_CHARS: usize = 2_000;

/// Longest free-form question accepted, in characters
pub const MAX_QUESTION_CHARS: usize = 4_000;

/// Image types the vision endpoint understands
pub const SUPPORTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Validate height value (in cm)
/// Valid range: 50-250 cm
pub fn validate_height_cm(height_cm: f64) -> Result<(), ValidationError> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err(ValidationError::invalid("height_cm", "Height must be a valid number"));
    }
    if !(50.0..=250.0).contains(&height_cm) {
        return Err(ValidationError::invalid(
            "height_cm",
            "Height must be between 50 and 250 cm",
        ));
    }
    Ok(())
}

/// Validate weight value (in kg)
/// Valid range: 10-300 kg
pub fn validate_weight_kg(weight_kg: f64) -> Result<(), ValidationError> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err(ValidationError::invalid("weight_kg", "Weight must be a valid number"));
    }
    if !(10.0..=300.0).contains(&weight_kg) {
        return Err(ValidationError::invalid(
            "weight_kg",
            "Weight must be between 10 and 300 kg",
        ));
    }
    Ok(())
}

/// Validate the food list text
pub fn validate_food_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::invalid(
            "foods",
            "Please enter food items to analyze your diet",
        ));
    }
    if text.chars().count() > MAX_FOOD_TEXT_CHARS {
        return Err(ValidationError::invalid("foods", "Food list is too long"));
    }
    Ok(())
}

/// Validate a free-form question
pub fn validate_question(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::invalid("question", "Question cannot be empty"));
    }
    if text.chars().count() > MAX_QUESTION_CHARS {
        return Err(ValidationError::invalid("question", "Question is too long"));
    }
    Ok(())
}

/// Validate symptom selection and return canonical labels in input order,
/// without duplicates
pub fn validate_symptoms(symptoms: &[String]) -> Result<Vec<String>, ValidationError> {
    if symptoms.is_empty() {
        return Err(ValidationError::invalid("symptoms", "Select at least one symptom"));
    }
    let mut canonical: Vec<String> = Vec::with_capacity(symptoms.len());
    for symptom in symptoms {
        let label = canonical_symptom(symptom).ok_or_else(|| {
            ValidationError::invalid("symptoms", format!("Unknown symptom '{symptom}'"))
        })?;
        if !canonical.iter().any(|s| s == label) {
            canonical.push(label.to_string());
        }
    }
    Ok(canonical)
}

/// Validate an image MIME type
pub fn validate_image_mime(mime: &str) -> Result<(), ValidationError> {
    if SUPPORTED_IMAGE_TYPES.contains(&mime) {
        Ok(())
    } else {
        Err(ValidationError::invalid(
            "mime_type",
            format!("Unsupported image type '{mime}'"),
        ))
    }
}
