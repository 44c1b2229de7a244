//! ModelClient -- the gateway's single entry point to the model backend.
//!
//! Flattens history + system prompt into a transcript, sends it as one
//! user turn, and returns the generated text. One attempt per call, bounded
//! by a timeout. Every failure, including the timeout, comes back as an
//! [`UpstreamError`] carrying the original description.

use std::time::Duration;

use tracing::{Instrument, error, info, info_span};

use parley_types::chat::Message;
use parley_types::error::UpstreamError;
use parley_types::llm::{CompletionRequest, LlmError};

use super::box_provider::BoxLlmProvider;
use super::transcript::build_transcript;

/// Default upper bound on one generation call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Sends assembled conversations to an LLM provider.
pub struct ModelClient {
    provider: BoxLlmProvider,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

impl ModelClient {
    pub fn new(provider: BoxLlmProvider, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Generate a reply for `history` under `system_prompt`.
    pub async fn generate(
        &self,
        history: &[Message],
        system_prompt: &str,
    ) -> Result<String, UpstreamError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::user(build_transcript(history, system_prompt))],
            system: None,
            max_tokens: self.max_tokens,
            temperature: None,
        };

        info!(
            model = %self.model,
            message_count = history.len(),
            system_prompt_length = system_prompt.len(),
            "Model request"
        );

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.operation.name = "chat",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
        );

        let call = self.provider.complete(&request).instrument(span.clone());
        let result = match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(self.timeout.as_secs())),
        };

        match result {
            Ok(response) => {
                span.record("gen_ai.usage.input_tokens", response.usage.input_tokens);
                span.record("gen_ai.usage.output_tokens", response.usage.output_tokens);
                info!(
                    model = %self.model,
                    response_length = response.content.len(),
                    "Model response"
                );
                Ok(response.content)
            }
            Err(e) => {
                error!(model = %self.model, error = %e, "Model error");
                Err(UpstreamError(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use parley_types::llm::{CompletionResponse, Usage};

    use super::*;
    use crate::llm::provider::LlmProvider;

    struct CapturingProvider {
        seen: Arc<Mutex<Vec<CompletionRequest>>>,
    }

    impl LlmProvider for CapturingProvider {
        fn name(&self) -> &str {
            "capture"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<parley_types::llm::CompletionResponse, LlmError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(CompletionResponse {
                id: "msg_1".to_string(),
                content: "pong".to_string(),
                model: request.model.clone(),
                stop_reason: Some("end_turn".to_string()),
                usage: Usage {
                    input_tokens: 5,
                    output_tokens: 1,
                },
            })
        }
    }

    struct FailingProvider;

    impl LlmProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
            Err(LlmError::RateLimited)
        }
    }

    struct SlowProvider;

    impl LlmProvider for SlowProvider {
        fn name(&self) -> &str {
            "slow"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Err(LlmError::Provider {
                message: "unreachable".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_generate_sends_transcript_as_single_user_turn() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let client = ModelClient::new(
            BoxLlmProvider::new(CapturingProvider { seen: Arc::clone(&seen) }),
            "claude-test",
            256,
        );

        let reply = client
            .generate(&[Message::user("ping")], "Answer briefly.")
            .await
            .unwrap();
        assert_eq!(reply, "pong");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let request = &seen[0];
        assert_eq!(request.model, "claude-test");
        assert_eq!(request.max_tokens, 256);
        assert!(request.system.is_none());
        assert_eq!(request.messages, vec![Message::user("\nSystem: Answer briefly.\nUser: ping")]);
    }

    #[tokio::test]
    async fn test_generate_wraps_provider_failure() {
        let client = ModelClient::new(BoxLlmProvider::new(FailingProvider), "m", 16);
        let err = client.generate(&[], "s").await.unwrap_err();
        assert_eq!(err, UpstreamError("rate limited".to_string()));
    }

    #[tokio::test]
    async fn test_generate_times_out() {
        let client = ModelClient::new(BoxLlmProvider::new(SlowProvider), "m", 16)
            .with_timeout(Duration::from_millis(20));
        let err = client.generate(&[], "s").await.unwrap_err();
        assert!(err.0.contains("timed out"), "unexpected error: {err}");
    }

    #[test]
    fn test_accessors() {
        let client = ModelClient::new(BoxLlmProvider::new(FailingProvider), "m", 16);
        assert_eq!(client.model(), "m");
        assert_eq!(client.provider_name(), "failing");
    }
}
