//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](parley_core::llm::LlmProvider)
//! for Anthropic Claude and a factory that builds a ready-to-use
//! [`ModelClient`] from the gateway configuration.

pub mod anthropic;

use std::time::Duration;

use secrecy::SecretString;

use parley_core::llm::{BoxLlmProvider, ModelClient};
use parley_types::config::GatewayConfig;
use parley_types::error::ConfigError;
use parley_types::llm::LlmError;

use self::anthropic::AnthropicProvider;

/// Errors while wiring the model backend.
#[derive(Debug, thiserror::Error)]
pub enum ProviderSetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Create a [`ModelClient`] backed by Anthropic from the gateway config.
///
/// The API key is optional: without one, the server still starts and each
/// generation fails with an upstream error.
pub fn create_model_client(
    config: &GatewayConfig,
    api_key: Option<SecretString>,
) -> Result<ModelClient, ProviderSetupError> {
    let model = config.model_name()?.to_string();
    let timeout = Duration::from_secs(config.upstream_timeout_secs);

    if api_key.is_none() {
        tracing::warn!("ANTHROPIC_API_KEY is not set; chat requests will fail until it is configured");
    }

    let provider =
        AnthropicProvider::new(api_key, timeout)?.with_base_url(&config.anthropic_base_url);

    Ok(
        ModelClient::new(BoxLlmProvider::new(provider), model, config.max_tokens)
            .with_timeout(timeout),
    )
}
