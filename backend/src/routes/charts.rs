//! Nutrient chart routes

use crate::error::ApiResult;
use crate::services::chart::render_grouped_bar_chart;
use crate::state::AppState;
use axum::{
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use nutri_advisor_shared::{types::ChartRequest, NutrientSnapshot};

const CHART_TITLE: &str = "Nutrient Intake vs. Recommended";

/// Create chart routes
pub fn chart_routes() -> Router<AppState> {
    Router::new().route("/nutrients", get(placeholder_chart).post(custom_chart))
}

/// GET /api/v1/charts/nutrients - built-in sample snapshot
async fn placeholder_chart() -> ApiResult<Response> {
    let snapshot = NutrientSnapshot::placeholder();
    svg(&snapshot.actual, &snapshot.recommended)
}

/// POST /api/v1/charts/nutrients - caller-supplied values
async fn custom_chart(Json(req): Json<ChartRequest>) -> ApiResult<Response> {
    svg(&req.actual, &req.recommended)
}

fn svg(
    actual: &std::collections::BTreeMap<String, f64>,
    recommended: &std::collections::BTreeMap<String, f64>,
) -> ApiResult<Response> {
    let body = render_grouped_bar_chart(CHART_TITLE, actual, recommended)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], body).into_response())
}
