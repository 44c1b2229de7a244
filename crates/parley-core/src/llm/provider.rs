//! LlmProvider trait definition.
//!
//! This is the port every model backend implements. Uses native async fn
//! in traits (RPITIT, Rust 2024 edition); see `BoxLlmProvider` for the
//! object-safe wrapper.

use parley_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends.
///
/// Implementations live in parley-infra (e.g., `AnthropicProvider`), and
/// in tests as in-memory mocks.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
