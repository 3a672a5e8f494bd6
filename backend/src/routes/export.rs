//! PDF export routes

use crate::error::ApiResult;
use crate::services::pdf::{compose_report, export_pdf};
use crate::state::AppState;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use nutri_advisor_shared::types::{ExportLayout, PdfExportRequest, ReportExportRequest};
use tracing::{info, instrument};

/// Create export routes
pub fn export_routes() -> Router<AppState> {
    Router::new()
        .route("/pdf", post(export_text))
        .route("/report", post(export_report))
}

/// POST /api/v1/export/pdf - arbitrary text
#[instrument(skip(state, req), fields(layout = ?req.layout))]
async fn export_text(
    State(state): State<AppState>,
    Json(req): Json<PdfExportRequest>,
) -> ApiResult<Response> {
    pdf_response(&state, &req.content, req.layout)
}

/// POST /api/v1/export/report - analysis and meal plan in one document
#[instrument(skip(state, req), fields(layout = ?req.layout))]
async fn export_report(
    State(state): State<AppState>,
    Json(req): Json<ReportExportRequest>,
) -> ApiResult<Response> {
    let text = compose_report(&req.analysis, &req.meal_plan);
    pdf_response(&state, &text, req.layout)
}

fn pdf_response(state: &AppState, text: &str, layout: ExportLayout) -> ApiResult<Response> {
    let export = &state.config().export;
    let bytes = export_pdf(text, layout, &export.footer)?;
    info!(bytes = bytes.len() as u64, "PDF exported");

    let disposition = format!("attachment; filename=\"{}\"", export.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
