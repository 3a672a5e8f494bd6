//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nutri_advisor_shared::{ErrorDetail, ErrorResponse, ValidationError};
use thiserror::Error;
use tracing::error;

use crate::services::chart::ChartError;
use crate::services::pdf::PdfError;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    #[error("PDF generation failed: {0}")]
    Pdf(#[from] PdfError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, field) = match &self {
            ApiError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                err.message.clone(),
                Some(err.field.clone()),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None),
            ApiError::Chart(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "CHART_ERROR",
                err.to_string(),
                None,
            ),
            ApiError::Pdf(PdfError::EmptyDocument) => (
                StatusCode::BAD_REQUEST,
                "EMPTY_DOCUMENT",
                PdfError::EmptyDocument.to_string(),
                None,
            ),
            ApiError::Pdf(err) => {
                error!(error = %err, "PDF generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PDF_GENERATION_FAILED",
                    format!("PDF generation failed: {err}"),
                    None,
                )
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
