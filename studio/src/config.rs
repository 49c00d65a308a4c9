//! Configuration for the studio session layer.

use serde::{Deserialize, Serialize};

/// Connection settings for the platform API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Base URL of the platform API
    pub base_url: String,
    /// Bearer token attached to every request
    pub api_token: Option<String>,
    /// Per-request timeout (ms)
    pub request_timeout_ms: u64,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            api_token: None,
            request_timeout_ms: 10_000,
        }
    }
}

impl StudioConfig {
    /// Create a config pointing at an API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the bearer token.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
