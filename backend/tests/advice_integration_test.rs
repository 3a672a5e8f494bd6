//! Integration tests for the advice endpoints

mod common;

use axum::http::StatusCode;
use common::{Script, TestApp};
use nutri_advisor_shared::types::{AdviceResponse, ErrorResponse, SymptomListResponse};
use nutri_advisor_shared::PromptKind;
use serde_json::json;

#[tokio::test]
async fn test_question_is_passed_through() {
    let app = TestApp::new("Spinach and lentils.");
    let body = json!({ "question": "Which foods are rich in iron?" });

    let (status, body) = app.post("/api/v1/advice/ask", &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let response: AdviceResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(response.kind, PromptKind::Question);
    assert_eq!(response.answer, "Spinach and lentils.");
    assert_eq!(app.prompts(), vec!["Which foods are rich in iron?"]);
}

#[tokio::test]
async fn test_blank_question_is_rejected() {
    let app = TestApp::new("unused");

    let (status, body) = app.post("/api/v1/advice/ask", r#"{"question": "  "}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(error.error.field.as_deref(), Some("question"));
    assert!(app.prompts().is_empty());
}

#[tokio::test]
async fn test_question_upstream_failure_is_reported_in_answer() {
    let app = TestApp::with_script(Script::Fail("quota exceeded".to_string()));

    let (status, body) = app.post("/api/v1/advice/ask", r#"{"question": "Hi?"}"#).await;

    assert_eq!(status, StatusCode::OK);
    let response: AdviceResponse = serde_json::from_str(&body).unwrap();
    assert!(response.answer.contains("quota exceeded"));
}

#[tokio::test]
async fn test_symptom_catalogue() {
    let app = TestApp::new("unused");

    let (status, body) = app.get("/api/v1/advice/symptoms").await;

    assert_eq!(status, StatusCode::OK);
    let response: SymptomListResponse = serde_json::from_str(&body).unwrap();
    assert!(response.symptoms.contains(&"Fatigue".to_string()));
    assert!(response.symptoms.contains(&"Hair loss".to_string()));
}

#[tokio::test]
async fn test_deficiency_prompt_uses_canonical_labels() {
    let app = TestApp::new("Possibly iron.");
    let body = json!({ "symptoms": ["fatigue", "HAIR LOSS", "Fatigue"] });

    let (status, body) = app.post("/api/v1/advice/deficiency", &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let response: AdviceResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(response.kind, PromptKind::Deficiency);
    assert!(app.prompts()[0].contains("symptoms: Fatigue, Hair loss."));
}

#[tokio::test]
async fn test_deficiency_rejects_unknown_and_empty() {
    let app = TestApp::new("unused");

    let (status, _) = app
        .post("/api/v1/advice/deficiency", r#"{"symptoms": ["telepathy"]}"#)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.post("/api/v1/advice/deficiency", r#"{"symptoms": []}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(app.prompts().is_empty());
}

#[tokio::test]
async fn test_image_is_forwarded_with_mime_type() {
    let app = TestApp::new("A bowl of rice.");
    let body = json!({ "image_base64": "iVBORw0KGgo=", "mime_type": "image/png" });

    let (status, body) = app.post("/api/v1/advice/image", &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let response: AdviceResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(response.kind, PromptKind::ImageDescription);
    assert_eq!(response.answer, "A bowl of rice.");

    let calls = app.client.calls.lock().unwrap();
    let image = calls[0].1.as_ref().unwrap();
    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.data, b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn test_image_rejects_unsupported_type_and_bad_data() {
    let app = TestApp::new("unused");

    let (status, _) = app
        .post(
            "/api/v1/advice/image",
            r#"{"image_base64": "iVBORw0KGgo=", "mime_type": "image/gif"}"#,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post("/api/v1/advice/image", r#"{"image_base64": "@@@"}"#)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(error.error.code, "BAD_REQUEST");

    assert!(app.prompts().is_empty());
}
