//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::config::AppConfig;
use crate::services::{AdviceClient, AdviceService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
///
/// All fields are `Arc`-backed, so cloning per request is O(1).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Advice model behind the single catch-all error path
    pub advice: AdviceService,
    /// Prometheus renderer, present when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: AppConfig, client: Arc<dyn AdviceClient>) -> Self {
        Self {
            config: Arc::new(config),
            advice: AdviceService::new(client),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the advice service
    #[inline]
    pub fn advice(&self) -> &AdviceService {
        &self.advice
    }
}
