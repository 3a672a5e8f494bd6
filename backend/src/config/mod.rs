//! Configuration management for the Nutri Advisor backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: NUTRI__)
//!
//! The advice API key is never compiled in. It comes from `NUTRI__AI__API_KEY`,
//! `GEMINI_API_KEY`, or a config file, and its absence is a startup error.

use anyhow::Result;
use nutri_advisor_shared::BmiScale;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Fallback environment variable for the advice API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Upstream calls made one after another by a single analysis request
pub const ADVICE_CALLS_PER_ANALYSIS: u64 = 2;

/// Headroom the request timeout keeps beyond the worst-case upstream wait
pub const TIMEOUT_MARGIN_SECS: u64 = 10;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Whole-request timeout applied by the router
    pub request_timeout_secs: u64,
    /// Largest accepted request body (image uploads)
    pub max_body_bytes: usize,
}

/// Advice model configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Timeout for a single upstream call
    pub request_timeout_secs: u64,
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            request_timeout_secs: 60,
        }
    }
}

/// Health calculation settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HealthConfig {
    #[serde(default)]
    pub bmi_scale: BmiScale,
}

/// PDF export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub file_name: String,
    pub footer: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: "Meal_Plan.pdf".to_string(),
            footer: "Generated by Nutri Advisor. This report is not medical advice.".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                request_timeout_secs: 150,
                max_body_bytes: 10 * 1024 * 1024,
            },
            ai: AiConfig::default(),
            health: HealthConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with NUTRI__ prefix
    /// 4. `GEMINI_API_KEY`, if no key was set by the sources above
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (NUTRI__ prefix)
            // e.g., NUTRI__SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("NUTRI").separator("__"))
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;
        if app_config.ai.api_key.is_none() {
            app_config.ai.api_key = env::var(GEMINI_API_KEY_ENV).ok();
        }
        Ok(app_config)
    }

    /// Reject configurations the service cannot run with
    pub fn validate(&self) -> Result<()> {
        match self.ai.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => anyhow::bail!(
                "advice API key missing: set NUTRI__AI__API_KEY or {GEMINI_API_KEY_ENV}"
            ),
        }
        if self.ai.request_timeout_secs == 0 {
            anyhow::bail!("ai.request_timeout_secs must be greater than zero");
        }
        // Both sequential advice calls must time out before the router does
        let upstream_budget = ADVICE_CALLS_PER_ANALYSIS.saturating_mul(self.ai.request_timeout_secs);
        if self.server.request_timeout_secs < upstream_budget.saturating_add(TIMEOUT_MARGIN_SECS) {
            anyhow::bail!(
                "server.request_timeout_secs ({}) must be at least {} \
                 ({ADVICE_CALLS_PER_ANALYSIS} x ai.request_timeout_secs + {TIMEOUT_MARGIN_SECS})",
                self.server.request_timeout_secs,
                upstream_budget.saturating_add(TIMEOUT_MARGIN_SECS)
            );
        }
        if !self.export.file_name.to_lowercase().ends_with(".pdf") {
            anyhow::bail!("export.file_name must end in .pdf");
        }
        Ok(())
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ai.model, "gemini-1.5-flash");
        assert_eq!(config.health.bmi_scale, BmiScale::Legacy);
        assert_eq!(config.export.file_name, "Meal_Plan.pdf");
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let config = AppConfig::default();
        assert!(config.validate().is_err());

        let mut blank = AppConfig::default();
        blank.ai.api_key = Some("   ".to_string());
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_configured_api_key_passes() {
        let mut config = AppConfig::default();
        config.ai.api_key = Some("test-key".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_key_not_serialized_or_logged() {
        let mut config = AppConfig::default();
        config.ai.api_key = Some("super-secret".to_string());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn test_server_timeout_must_cover_upstream_calls() {
        let mut config = AppConfig::default();
        config.ai.api_key = Some("test-key".to_string());
        assert!(config.validate().is_ok());

        config.ai.request_timeout_secs = 60;
        config.server.request_timeout_secs = 120;
        assert!(config.validate().is_err());

        config.server.request_timeout_secs = 129;
        assert!(config.validate().is_err());

        config.server.request_timeout_secs = 130;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        // Default should be false (development)
        assert!(!AppConfig::is_production());
    }
}
