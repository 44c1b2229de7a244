//! Shared application state for the HTTP gateway.

use std::sync::Arc;

use secrecy::SecretString;

use parley_core::chat::ChatService;
use parley_core::session::SessionStore;
use parley_infra::llm::create_model_client;
use parley_types::config::GatewayConfig;

/// State handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    /// Wire the Anthropic-backed chat service from configuration.
    pub fn init(config: GatewayConfig, api_key: Option<SecretString>) -> anyhow::Result<Self> {
        let model = create_model_client(&config, api_key)?;
        let store = Arc::new(SessionStore::default());

        tracing::info!(
            provider = model.provider_name(),
            model = model.model(),
            "Chat service ready"
        );

        Ok(Self::from_parts(ChatService::new(store, model), config))
    }

    pub fn from_parts(chat_service: ChatService, config: GatewayConfig) -> Self {
        Self {
            chat_service: Arc::new(chat_service),
            config: Arc::new(config),
        }
    }
}
