//! Common test utilities for integration tests
//!
//! The advice model is replaced by a scripted client so no test touches
//! the network unless it starts its own mock server.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::HeaderMap, Request, StatusCode},
    Router,
};
use nutri_advisor_backend::{
    config::AppConfig,
    routes,
    services::advice::{AdviceClient, AdviceError, ImagePayload},
    state::AppState,
};
use tower::ServiceExt;

/// What the scripted client answers
#[derive(Clone)]
pub enum Script {
    /// Echo a fixed reply
    Reply(String),
    /// Fail every call with an API error
    Fail(String),
    /// Succeed without any text
    Silent,
}

/// Scripted advice client that records every prompt it receives
pub struct ScriptedClient {
    script: Script,
    pub calls: Mutex<Vec<(String, Option<ImagePayload>)>>,
}

impl ScriptedClient {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AdviceClient for ScriptedClient {
    async fn generate(
        &self,
        prompt: &str,
        image: Option<&ImagePayload>,
    ) -> Result<Option<String>, AdviceError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), image.cloned()));
        match &self.script {
            Script::Reply(text) => Ok(Some(text.clone())),
            Script::Fail(message) => Err(AdviceError::Api {
                status: 403,
                message: message.clone(),
            }),
            Script::Silent => Ok(None),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub client: Arc<ScriptedClient>,
}

impl TestApp {
    /// Application whose advice model always answers `reply`
    pub fn new(reply: &str) -> Self {
        Self::with_script(Script::Reply(reply.to_string()))
    }

    pub fn with_script(script: Script) -> Self {
        Self::with_config(test_config(), script)
    }

    pub fn with_config(config: AppConfig, script: Script) -> Self {
        let client = Arc::new(ScriptedClient::new(script));
        let state = AppState::new(config, client.clone());
        let app = routes::create_router(state);
        Self { app, client }
    }

    /// Prompts sent to the advice model so far
    pub fn prompts(&self) -> Vec<String> {
        self.client
            .calls
            .lock()
            .unwrap()
            .iter()
            .map(|(prompt, _)| prompt.clone())
            .collect()
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let (status, _, body) = self.get_raw(path).await;
        (status, String::from_utf8(body).unwrap())
    }

    /// GET returning headers and raw bytes
    pub async fn get_raw(&self, path: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let (status, _, body) = self.post_raw(path, body).await;
        (status, String::from_utf8(body).unwrap())
    }

    /// POST returning headers and raw bytes
    pub async fn post_raw(&self, path: &str, body: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, body.to_vec())
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.port = 0;
    config.ai.api_key = Some("test-key".to_string());
    config
}
