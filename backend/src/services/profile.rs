//! Body metrics service - BMI and calorie estimates from submitted profiles

use nutri_advisor_shared::health_metrics::{calculate_bmi_result, estimate_daily_calories, BmiScale};
use nutri_advisor_shared::types::{BmiInfo, BmiRequest, CalorieRequest, EnergyInfo};
use nutri_advisor_shared::validation::{validate_height_cm, validate_weight_kg};
use validator::Validate;

use crate::error::ApiError;

/// Body metrics service
pub struct ProfileService;

impl ProfileService {
    /// Compute BMI and its category under `scale`
    pub fn bmi(request: &BmiRequest, scale: BmiScale) -> Result<BmiInfo, ApiError> {
        request.validate()?;
        validate_height_cm(request.height_cm)?;
        validate_weight_kg(request.weight_kg)?;

        calculate_bmi_result(request.weight_kg, request.height_cm, scale)
            .map(BmiInfo::from)
            .ok_or_else(|| ApiError::BadRequest("Height and weight must be positive".to_string()))
    }

    /// Compute BMR and daily calorie need
    pub fn calories(request: &CalorieRequest) -> Result<EnergyInfo, ApiError> {
        request.validate()?;
        validate_height_cm(request.height_cm)?;
        validate_weight_kg(request.weight_kg)?;

        let estimate = estimate_daily_calories(
            request.gender,
            request.weight_kg,
            request.height_cm,
            request.age_years,
            request.activity_level,
        );
        Ok(EnergyInfo::new(estimate, request.activity_level))
    }
}
