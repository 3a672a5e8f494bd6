//! Body metrics routes

use crate::error::ApiError;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use nutri_advisor_shared::types::{
    BmiInfo, BmiRequest, CalorieRequest, EnergyInfo, ProfileOptionsResponse,
};
use tracing::instrument;

/// Create body metrics routes
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/bmi", post(calculate_bmi))
        .route("/calories", post(estimate_calories))
        .route("/options", get(profile_options))
}

/// GET /api/v1/profile/options - gender and activity selector entries
async fn profile_options() -> Json<ProfileOptionsResponse> {
    Json(ProfileOptionsResponse::new())
}

/// POST /api/v1/profile/bmi - BMI and category
#[instrument(skip(state))]
async fn calculate_bmi(
    State(state): State<AppState>,
    Json(req): Json<BmiRequest>,
) -> Result<Json<BmiInfo>, ApiError> {
    let info = ProfileService::bmi(&req, state.config().health.bmi_scale)?;
    Ok(Json(info))
}

/// POST /api/v1/profile/calories - BMR and daily calorie need
#[instrument]
async fn estimate_calories(Json(req): Json<CalorieRequest>) -> Result<Json<EnergyInfo>, ApiError> {
    Ok(Json(ProfileService::calories(&req)?))
}
