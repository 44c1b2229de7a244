//! Chat service orchestrating sessions, prompts, and generation.
//!
//! ChatService owns the session store handle, the prompt catalog, and the
//! model client. A chat turn runs as:
//!
//! 1. resolve or create the session
//! 2. pick the effective system prompt (catalog name > custom prompt >
//!    stored prompt), persisting an explicit choice to the session
//! 3. append the incoming messages (deduplicated)
//! 4. generate from the full history
//! 5. append the assistant reply
//!
//! User turns are recorded before generation and are kept if generation
//! fails; a retried send of the same messages is then deduplicated.

use std::sync::Arc;

use tracing::{info, warn};

use parley_types::chat::{Message, SessionConfig};
use parley_types::error::{ChatError, SessionError};
use parley_types::prompt::PromptType;

use crate::llm::client::ModelClient;
use crate::prompt::{PromptCatalog, prompt_text};
use crate::session::store::SessionStore;

/// One inbound chat request.
#[derive(Debug, Clone, Default)]
pub struct ChatTurn {
    pub session_id: Option<String>,
    pub messages: Vec<Message>,
    /// Custom system prompt; blank values are ignored.
    pub system_prompt: Option<String>,
    /// Catalog prompt name; unknown names are ignored.
    pub prompt_type: Option<String>,
}

/// Result of a successful chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutcome {
    pub session_id: String,
    pub response: String,
    /// Whether the session was created by this turn.
    pub created: bool,
}

/// Orchestrates session state and model calls for the HTTP layer.
pub struct ChatService {
    store: Arc<SessionStore>,
    catalog: PromptCatalog,
    model: ModelClient,
}

impl ChatService {
    pub fn new(store: Arc<SessionStore>, model: ModelClient) -> Self {
        Self {
            store,
            catalog: PromptCatalog::new(),
            model,
        }
    }

    /// Access the session store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Access the model client.
    pub fn model(&self) -> &ModelClient {
        &self.model
    }

    /// Names of the built-in prompts.
    pub fn prompt_types(&self) -> Vec<&'static str> {
        self.catalog.list_names()
    }

    /// Run one chat turn end to end.
    pub async fn chat(&self, turn: ChatTurn) -> Result<ChatOutcome, ChatError> {
        let (session_id, created) = self.store.get_or_create(turn.session_id.as_deref());

        let system_prompt = self
            .resolve_prompt(
                &session_id,
                turn.prompt_type.as_deref(),
                turn.system_prompt.as_deref(),
            )
            .await?;

        self.store.append_messages(&session_id, &turn.messages).await?;
        info!(
            session_id = %session_id,
            message_count = turn.messages.len(),
            "Chat request"
        );

        let history = self.store.get_history(&session_id).await?;
        let response = self.model.generate(&history, &system_prompt).await.map_err(|e| {
            warn!(session_id = %session_id, error = %e, "Chat error");
            e
        })?;

        // The session may have been deleted while the model was running.
        // The caller still gets the reply; it is just not recorded.
        if let Err(e) = self
            .store
            .push_message(&session_id, Message::assistant(response.clone()))
            .await
        {
            warn!(session_id = %session_id, error = %e, "Reply not recorded");
        }

        info!(
            session_id = %session_id,
            response_length = response.len(),
            "Chat response"
        );

        Ok(ChatOutcome {
            session_id,
            response,
            created,
        })
    }

    /// Determine the prompt for this turn, persisting explicit choices.
    ///
    /// A known `prompt_type` wins, then a non-blank `system_prompt`, then
    /// whatever the session has stored.
    pub async fn resolve_prompt(
        &self,
        session_id: &str,
        prompt_type: Option<&str>,
        system_prompt: Option<&str>,
    ) -> Result<String, SessionError> {
        if let Some(name) = prompt_type {
            match name.parse::<PromptType>() {
                Ok(pt) => {
                    let text = prompt_text(pt).to_string();
                    self.store
                        .set_config(session_id, SessionConfig { system_prompt: text.clone() })
                        .await?;
                    info!(
                        session_id = %session_id,
                        prompt_type = %pt,
                        "System prompt updated from type"
                    );
                    return Ok(text);
                }
                Err(e) => warn!(session_id = %session_id, error = %e, "Ignoring prompt type"),
            }
        }

        if let Some(custom) = system_prompt.and_then(|p| SessionConfig::validated(p).ok()) {
            let text = custom.system_prompt.clone();
            self.store.set_config(session_id, custom).await?;
            info!(
                session_id = %session_id,
                prompt_length = text.len(),
                "System prompt updated from custom"
            );
            return Ok(text);
        }

        Ok(self.store.get_config(session_id).await?.system_prompt)
    }

    /// History of an existing session.
    pub async fn history(&self, session_id: &str) -> Result<Vec<Message>, SessionError> {
        self.store.get_history(session_id).await
    }

    /// Replace the stored prompt of an existing session.
    pub async fn update_system_prompt(
        &self,
        session_id: &str,
        system_prompt: String,
    ) -> Result<(), ChatError> {
        let config = SessionConfig::validated(system_prompt).map_err(ChatError::Validation)?;
        let prompt_length = config.system_prompt.len();
        self.store.set_config(session_id, config).await?;
        info!(
            session_id = %session_id,
            prompt_length,
            "System prompt updated via API"
        );
        Ok(())
    }

    /// Remove an existing session.
    pub async fn delete_session(&self, session_id: &str) -> Result<(), SessionError> {
        self.store.delete(session_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use parley_types::error::UpstreamError;
    use parley_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};

    use super::*;
    use crate::llm::box_provider::BoxLlmProvider;
    use crate::llm::provider::LlmProvider;

    /// Records every transcript it receives and replies with a counter,
    /// or with `fixed_reply` when set.
    struct EchoProvider {
        transcripts: Arc<Mutex<Vec<String>>>,
        fail: bool,
        fixed_reply: Option<String>,
    }

    impl LlmProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
            if self.fail {
                return Err(LlmError::Provider {
                    message: "backend down".to_string(),
                });
            }
            let mut transcripts = self.transcripts.lock().unwrap();
            transcripts.push(request.messages[0].content.clone());
            Ok(CompletionResponse {
                id: "msg".to_string(),
                content: self
                    .fixed_reply
                    .clone()
                    .unwrap_or_else(|| format!("reply {}", transcripts.len())),
                model: request.model.clone(),
                stop_reason: None,
                usage: Usage::default(),
            })
        }
    }

    fn service_with(fail: bool) -> (ChatService, Arc<Mutex<Vec<String>>>) {
        build_service(fail, None)
    }

    fn build_service(
        fail: bool,
        fixed_reply: Option<&str>,
    ) -> (ChatService, Arc<Mutex<Vec<String>>>) {
        let transcripts = Arc::new(Mutex::new(Vec::new()));
        let provider = EchoProvider {
            transcripts: Arc::clone(&transcripts),
            fail,
            fixed_reply: fixed_reply.map(str::to_string),
        };
        let model = ModelClient::new(BoxLlmProvider::new(provider), "test-model", 128);
        let service = ChatService::new(Arc::new(SessionStore::default()), model);
        (service, transcripts)
    }

    fn turn(session_id: Option<&str>, text: &str) -> ChatTurn {
        ChatTurn {
            session_id: session_id.map(str::to_string),
            messages: vec![Message::user(text)],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_chat_creates_session_and_records_reply() {
        let (service, _) = service_with(false);
        let outcome = service.chat(turn(None, "hello")).await.unwrap();
        assert!(outcome.created);
        assert_eq!(outcome.response, "reply 1");

        let history = service.history(&outcome.session_id).await.unwrap();
        assert_eq!(history, vec![Message::user("hello"), Message::assistant("reply 1")]);
    }

    #[tokio::test]
    async fn test_chat_accumulates_history_without_duplicates() {
        let (service, transcripts) = service_with(false);
        let first = service.chat(turn(None, "hello")).await.unwrap();

        let resend = ChatTurn {
            session_id: Some(first.session_id.clone()),
            messages: vec![Message::user("hello"), Message::user("and more")],
            ..Default::default()
        };
        let second = service.chat(resend).await.unwrap();
        assert!(!second.created);
        assert_eq!(second.session_id, first.session_id);

        let history = service.history(&first.session_id).await.unwrap();
        assert_eq!(
            history,
            vec![
                Message::user("hello"),
                Message::assistant("reply 1"),
                Message::user("and more"),
                Message::assistant("reply 2"),
            ]
        );
        let transcripts = transcripts.lock().unwrap();
        assert!(transcripts[1].ends_with("\nUser: hello\nAssistant: reply 1\nUser: and more"));
    }

    #[tokio::test]
    async fn test_identical_replies_are_both_recorded() {
        let (service, transcripts) = build_service(false, Some("OK"));
        let first = service.chat(turn(None, "first")).await.unwrap();
        service
            .chat(turn(Some(&first.session_id), "second"))
            .await
            .unwrap();

        let history = service.history(&first.session_id).await.unwrap();
        assert_eq!(
            history,
            vec![
                Message::user("first"),
                Message::assistant("OK"),
                Message::user("second"),
                Message::assistant("OK"),
            ]
        );

        service
            .chat(turn(Some(&first.session_id), "third"))
            .await
            .unwrap();
        let transcripts = transcripts.lock().unwrap();
        assert!(transcripts[2].ends_with(
            "\nUser: first\nAssistant: OK\nUser: second\nAssistant: OK\nUser: third"
        ));
    }

    #[tokio::test]
    async fn test_new_session_uses_default_prompt() {
        let (service, transcripts) = service_with(false);
        service.chat(turn(None, "hi")).await.unwrap();
        let expected = format!("\nSystem: {}", PromptCatalog::new().default_prompt());
        assert!(transcripts.lock().unwrap()[0].starts_with(&expected));
    }

    #[tokio::test]
    async fn test_prompt_type_wins_and_is_persisted() {
        let (service, _) = service_with(false);
        let outcome = service
            .chat(ChatTurn {
                prompt_type: Some("programming".to_string()),
                system_prompt: Some("ignored".to_string()),
                ..turn(None, "hi")
            })
            .await
            .unwrap();

        let config = service.store().get_config(&outcome.session_id).await.unwrap();
        assert_eq!(config.system_prompt, prompt_text(PromptType::Programming));
    }

    #[tokio::test]
    async fn test_unknown_prompt_type_falls_through_to_custom() {
        let (service, transcripts) = service_with(false);
        service
            .chat(ChatTurn {
                prompt_type: Some("poetry".to_string()),
                system_prompt: Some("Speak in rhyme.".to_string()),
                ..turn(None, "hi")
            })
            .await
            .unwrap();
        assert!(transcripts.lock().unwrap()[0].starts_with("\nSystem: Speak in rhyme.\n"));
    }

    #[tokio::test]
    async fn test_blank_custom_prompt_keeps_stored_prompt() {
        let (service, _) = service_with(false);
        let (id, _) = service.store().get_or_create(Some("s"));
        service.update_system_prompt(&id, "Stored.".to_string()).await.unwrap();

        let prompt = service.resolve_prompt(&id, None, Some("  ")).await.unwrap();
        assert_eq!(prompt, "Stored.");
    }

    #[tokio::test]
    async fn test_updated_prompt_is_used_by_next_chat() {
        let (service, transcripts) = service_with(false);
        let first = service.chat(turn(None, "hi")).await.unwrap();
        service
            .update_system_prompt(&first.session_id, "Only answer in French.".to_string())
            .await
            .unwrap();

        service.chat(turn(Some(&first.session_id), "next")).await.unwrap();
        assert!(transcripts.lock().unwrap()[1].starts_with("\nSystem: Only answer in French.\n"));
    }

    #[tokio::test]
    async fn test_update_system_prompt_validation_and_not_found() {
        let (service, _) = service_with(false);
        assert!(matches!(
            service.update_system_prompt("missing", "x".to_string()).await,
            Err(ChatError::Session(SessionError::NotFound(_)))
        ));

        let (id, _) = service.store().get_or_create(None);
        assert!(matches!(
            service.update_system_prompt(&id, "".to_string()).await,
            Err(ChatError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_generation_keeps_user_turn() {
        let (service, _) = service_with(true);
        let err = service.chat(turn(Some("s1"), "hello")).await.unwrap_err();
        assert!(matches!(
            err,
            ChatError::Upstream(UpstreamError(ref msg)) if msg.contains("backend down")
        ));
        assert_eq!(service.history("s1").await.unwrap(), vec![Message::user("hello")]);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let (service, _) = service_with(false);
        let outcome = service.chat(turn(None, "hi")).await.unwrap();
        service.delete_session(&outcome.session_id).await.unwrap();
        assert!(service.history(&outcome.session_id).await.is_err());
        assert!(service.delete_session(&outcome.session_id).await.is_err());
    }

    #[test]
    fn test_prompt_types() {
        let (service, _) = service_with(false);
        assert_eq!(service.prompt_types().len(), 4);
    }
}
