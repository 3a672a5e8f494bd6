//! Advice service: sends prompts to the hosted model and always yields text
//!
//! Failures never propagate to the caller. Whatever goes wrong upstream
//! (transport, auth, quota, malformed reply, timeout) is folded into one
//! user-facing message that embeds the error, and the request carries on.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use nutri_advisor_shared::Prompt;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Shown when the model answers without any text
pub const NO_RESPONSE_FALLBACK: &str = "No response received. Try again.";

/// Image sent alongside a prompt
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Everything that can go wrong talking to the model
#[derive(Error, Debug)]
pub enum AdviceError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A hosted text/vision generation endpoint
#[async_trait]
pub trait AdviceClient: Send + Sync {
    /// Run one generation. `Ok(None)` means the model replied without text.
    async fn generate(
        &self,
        prompt: &str,
        image: Option<&ImagePayload>,
    ) -> Result<Option<String>, AdviceError>;

    /// Model identifier, for logs and readiness
    fn model(&self) -> &str;
}

/// User-facing message for a failed call
pub fn failure_message(err: &AdviceError) -> String {
    format!("Error fetching AI response. Please check your API key and model access. ({err})")
}

/// Wraps an [`AdviceClient`] with the single catch-all error path
#[derive(Clone)]
pub struct AdviceService {
    client: Arc<dyn AdviceClient>,
}

impl AdviceService {
    pub fn new(client: Arc<dyn AdviceClient>) -> Self {
        Self { client }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Send a prompt and return the reply, the fallback, or the error text
    #[instrument(skip(self, prompt, image), fields(kind = prompt.kind.as_str(), model = self.client.model()))]
    pub async fn ask(&self, prompt: &Prompt, image: Option<&ImagePayload>) -> String {
        let started = Instant::now();
        let result = self.client.generate(&prompt.text, image).await;
        metrics::histogram!("advice_request_duration_seconds", "kind" => prompt.kind.as_str())
            .record(started.elapsed().as_secs_f64());

        let (outcome, reply) = match result {
            Ok(Some(text)) if !text.trim().is_empty() => ("ok", text),
            Ok(_) => {
                warn!("advice model returned no text");
                ("empty", NO_RESPONSE_FALLBACK.to_string())
            }
            Err(err) => {
                warn!(error = %err, "advice request failed");
                ("error", failure_message(&err))
            }
        };
        metrics::counter!("advice_requests_total", "kind" => prompt.kind.as_str(), "outcome" => outcome)
            .increment(1);
        info!(outcome, elapsed_ms = started.elapsed().as_millis() as u64, "advice request finished");
        reply
    }
}


#[cfg(test)]
mod tests {
    use super::testing::StubClient;
    use super::*;
    use nutri_advisor_shared::prompts;

    #[tokio::test]
    async fn test_ask_returns_reply_text() {
        let service = AdviceService::new(Arc::new(StubClient::replying("Eat more greens.")));
        let reply = service.ask(&prompts::question("What should I eat?"), None).await;
        assert_eq!(reply, "Eat more greens.");
    }

    #[tokio::test]
    async fn test_ask_folds_transport_failure_into_text() {
        let service = AdviceService::new(Arc::new(StubClient::failing("connection refused")));
        let reply = service.ask(&prompts::question("hello"), None).await;
        assert!(reply.contains("connection refused"));
        assert!(reply.starts_with("Error fetching AI response"));
    }

    #[tokio::test]
    async fn test_ask_uses_fallback_when_no_text() {
        let service = AdviceService::new(Arc::new(StubClient::silent()));
        let reply = service.ask(&prompts::question("hello"), None).await;
        assert_eq!(reply, NO_RESPONSE_FALLBACK);
    }

    #[tokio::test]
    async fn test_ask_forwards_prompt_text() {
        let stub = Arc::new(StubClient::replying("ok"));
        let service = AdviceService::new(stub.clone());
        service
            .ask(&prompts::diet_analysis("rice, dal", None), None)
            .await;
        let seen = stub.prompts.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("rice, dal"));
    }

    #[test]
    fn test_failure_message_embeds_error() {
        let msg = failure_message(&AdviceError::Api {
            status: 403,
            message: "API key not valid".to_string(),
        });
        assert!(msg.contains("403"));
        assert!(msg.contains("API key not valid"));
    }
}
