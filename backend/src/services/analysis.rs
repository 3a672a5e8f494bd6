//! Diet analysis service - the full submit flow
//!
//! Validates the submission, derives body metrics, then asks the advice model
//! for an analysis and a next-day meal plan, one prompt after the other.

use chrono::Utc;
use nutri_advisor_shared::health_metrics::BmiScale;
use nutri_advisor_shared::prompts;
use nutri_advisor_shared::types::{AnalysisRequest, AnalysisResponse, BmiInfo, EnergyInfo};
use nutri_advisor_shared::validation::{validate_food_text, validate_height_cm, validate_weight_kg};
use nutri_advisor_shared::FoodList;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use super::advice::AdviceService;
use crate::error::ApiError;

/// Diet analysis service
pub struct AnalysisService;

impl AnalysisService {
    #[instrument(skip(advice, request), fields(foods = tracing::field::Empty))]
    pub async fn analyze(
        advice: &AdviceService,
        scale: BmiScale,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, ApiError> {
        request.validate()?;
        validate_height_cm(request.height_cm)?;
        validate_weight_kg(request.weight_kg)?;
        validate_food_text(&request.foods)?;

        let foods = FoodList::parse(&request.foods);
        tracing::Span::current().record("foods", foods.items.len() as u64);

        let profile = request.profile();
        let bmi = profile.bmi(scale);
        let category = bmi.as_ref().map(|b| b.category);
        let energy = profile.calories().zip(profile.activity_level).map(|(estimate, activity)| {
            EnergyInfo::new(estimate, activity)
        });

        let analysis = advice
            .ask(&prompts::diet_analysis(&foods.raw, category), None)
            .await;
        let meal_plan = advice
            .ask(&prompts::meal_plan(&foods.raw, category), None)
            .await;

        info!(category = ?category, "diet analysis complete");

        Ok(AnalysisResponse {
            id: Uuid::new_v4().to_string(),
            bmi: bmi.map(BmiInfo::from),
            energy,
            foods: foods.items,
            analysis,
            meal_plan,
            generated_at: Utc::now(),
        })
    }
}
