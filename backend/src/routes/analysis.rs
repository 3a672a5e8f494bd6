//! Diet analysis routes

use crate::error::ApiError;
use crate::services::AnalysisService;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use nutri_advisor_shared::types::{AnalysisRequest, AnalysisResponse};

/// Create analysis routes
pub fn analysis_routes() -> Router<AppState> {
    Router::new().route("/analysis", post(analyze))
}

/// POST /api/v1/analysis - BMI, calorie estimate, AI analysis and meal plan
async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let response =
        AnalysisService::analyze(state.advice(), state.config().health.bmi_scale, &req).await?;
    Ok(Json(response))
}
