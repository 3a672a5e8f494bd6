//! Advice routes: free-form questions, symptom deficiency hints and meal photos
//!
//! Validation failures are 400s. Upstream failures are not: the advice
//! service folds them into the answer text and the route still returns 200.

use crate::error::{ApiError, ApiResult};
use crate::services::advice::ImagePayload;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use nutri_advisor_shared::{
    nutrients::SYMPTOMS,
    prompts,
    types::{AdviceResponse, DeficiencyRequest, ImageRequest, QuestionRequest, SymptomListResponse},
    validation::{validate_image_mime, validate_question, validate_symptoms},
};
use tracing::instrument;

/// Create advice routes
pub fn advice_routes() -> Router<AppState> {
    Router::new()
        .route("/ask", post(ask_question))
        .route("/symptoms", get(list_symptoms))
        .route("/deficiency", post(deficiency_advice))
        .route("/image", post(describe_image))
}

/// POST /api/v1/advice/ask
#[instrument(skip(state, req), fields(chars = req.question.chars().count() as u64))]
async fn ask_question(
    State(state): State<AppState>,
    Json(req): Json<QuestionRequest>,
) -> ApiResult<Json<AdviceResponse>> {
    validate_question(&req.question)?;
    let prompt = prompts::question(req.question.trim());
    let answer = state.advice().ask(&prompt, None).await;
    Ok(Json(AdviceResponse {
        kind: prompt.kind,
        answer,
    }))
}

/// GET /api/v1/advice/symptoms
async fn list_symptoms() -> Json<SymptomListResponse> {
    Json(SymptomListResponse {
        symptoms: SYMPTOMS.iter().map(|s| s.to_string()).collect(),
    })
}

/// POST /api/v1/advice/deficiency
#[instrument(skip(state, req), fields(count = req.symptoms.len() as u64))]
async fn deficiency_advice(
    State(state): State<AppState>,
    Json(req): Json<DeficiencyRequest>,
) -> ApiResult<Json<AdviceResponse>> {
    let symptoms = validate_symptoms(&req.symptoms)?;
    let prompt = prompts::deficiency_from_symptoms(&symptoms);
    let answer = state.advice().ask(&prompt, None).await;
    Ok(Json(AdviceResponse {
        kind: prompt.kind,
        answer,
    }))
}

/// POST /api/v1/advice/image
#[instrument(skip(state, req), fields(mime = %req.mime_type))]
async fn describe_image(
    State(state): State<AppState>,
    Json(req): Json<ImageRequest>,
) -> ApiResult<Json<AdviceResponse>> {
    let mime_type = req.mime_type.trim().to_ascii_lowercase();
    validate_image_mime(&mime_type)?;
    let image = decode_image(&req.image_base64, mime_type)?;

    let prompt = prompts::image_description();
    let answer = state.advice().ask(&prompt, Some(&image)).await;
    Ok(Json(AdviceResponse {
        kind: prompt.kind,
        answer,
    }))
}

fn decode_image(encoded: &str, mime_type: String) -> Result<ImagePayload, ApiError> {
    // Accept data URLs as well as bare base64
    let encoded = match encoded.split_once(";base64,") {
        Some((_, data)) => data,
        None => encoded,
    };
    let data = STANDARD
        .decode(encoded.trim())
        .map_err(|e| ApiError::BadRequest(format!("image_base64 is not valid base64: {e}")))?;
    if data.is_empty() {
        return Err(ApiError::BadRequest("image_base64 is empty".to_string()));
    }
    Ok(ImagePayload { mime_type, data })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_image_accepts_data_url() {
        let image = decode_image("data:image/png;base64,iVBORw0K", "image/png".into()).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(&image.data[..4], b"\x89PNG");
    }

    #[test]
    fn test_decode_image_rejects_garbage() {
        assert!(matches!(
            decode_image("not base64!!", "image/jpeg".into()),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            decode_image("", "image/jpeg".into()),
            Err(ApiError::BadRequest(_))
        ));
    }
}
