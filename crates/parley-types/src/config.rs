//! Gateway configuration types for Parley.
//!
//! `GatewayConfig` is assembled from an optional `parley.toml`, then
//! environment overrides, then CLI flags. Secrets (API key, telemetry
//! token) are not part of it.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration for the gateway.
///
/// All fields have defaults, so an empty TOML document is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP server binds to.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Model identifier, optionally prefixed with `anthropic:`.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum output tokens requested per generation.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Upper bound on a single model call, in seconds.
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,

    /// Allowed CORS origins. `"*"` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Base URL of the Anthropic API (override for proxies and tests).
    #[serde(default = "default_anthropic_base_url")]
    pub anthropic_base_url: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_model() -> String {
    "claude-3-7-sonnet-20250219".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_upstream_timeout_secs() -> u64 {
    120
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_anthropic_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            upstream_timeout_secs: default_upstream_timeout_secs(),
            cors_origins: default_cors_origins(),
            anthropic_base_url: default_anthropic_base_url(),
        }
    }
}

impl GatewayConfig {
    /// `host:port` string for binding the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether CORS should allow any origin.
    pub fn cors_allows_any(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }

    /// Model name with any `anthropic:` prefix removed.
    ///
    /// Other provider prefixes are rejected: only the Anthropic backend
    /// is wired.
    pub fn model_name(&self) -> Result<&str, ConfigError> {
        let name = match self.model.split_once(':') {
            Some(("anthropic", name)) => name,
            Some((provider, _)) => {
                return Err(ConfigError::UnsupportedProvider(provider.to_string()));
            }
            None => self.model.as_str(),
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        Ok(name)
    }
}
