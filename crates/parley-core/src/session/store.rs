//! Concurrent in-memory session store.
//!
//! `SessionStore` is a `DashMap` from session id to a per-session record
//! behind its own `tokio::sync::Mutex`:
//!
//! - first-touch creation goes through `DashMap::entry`, so concurrent
//!   callers racing on the same unknown id create exactly one record;
//! - every read or write of one session takes that session's lock, so
//!   two requests on the same id never lose each other's updates;
//! - different ids share nothing but a map shard, and only briefly.
//!
//! The record `Arc` is cloned out of the map before locking. A `DashMap`
//! guard is never held across an `.await`.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use parley_types::chat::{Message, SessionConfig};
use parley_types::error::SessionError;

use crate::prompt::PromptCatalog;

#[derive(Debug)]
struct SessionRecord {
    history: Vec<Message>,
    config: SessionConfig,
    /// Set under the lock by `delete`, for holders of a stale `Arc`.
    deleted: bool,
}

impl SessionRecord {
    fn new(system_prompt: String) -> Self {
        Self {
            history: Vec::new(),
            config: SessionConfig { system_prompt },
            deleted: false,
        }
    }
}

/// In-memory store of chat sessions.
///
/// Inject one instance per application (or per test); there is no
/// process-wide session state.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, Arc<Mutex<SessionRecord>>>,
    default_prompt: String,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(PromptCatalog::new().default_prompt())
    }
}

impl SessionStore {
    /// Create an empty store whose new sessions start with `default_prompt`.
    pub fn new(default_prompt: impl Into<String>) -> Self {
        Self {
            sessions: DashMap::new(),
            default_prompt: default_prompt.into(),
        }
    }

    /// Return an existing session id, or register a new session.
    ///
    /// An absent or empty `id` gets a freshly generated UUID. A given but
    /// unknown `id` is registered as-is. The boolean is `true` when a
    /// record was created by this call.
    pub fn get_or_create(&self, id: Option<&str>) -> (String, bool) {
        let session_id = match id.filter(|s| !s.is_empty()) {
            Some(id) => id.to_string(),
            None => Uuid::now_v7().to_string(),
        };

        let mut created = false;
        self.sessions.entry(session_id.clone()).or_insert_with(|| {
            created = true;
            Arc::new(Mutex::new(SessionRecord::new(self.default_prompt.clone())))
        });

        if created {
            info!(session_id = %session_id, "Session created");
        }
        (session_id, created)
    }

    /// Whether a session with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// A copy of the session's history, in conversation order.
    pub async fn get_history(&self, id: &str) -> Result<Vec<Message>, SessionError> {
        let record = self.record(id)?;
        let guard = record.lock().await;
        Self::ensure_live(id, guard.deleted)?;
        Ok(guard.history.clone())
    }

    /// Append messages not already present in the history.
    ///
    /// Order of `new_messages` is preserved. A message equal by value to
    /// any existing entry (including one appended earlier in this same
    /// call) is skipped. Returns how many messages were appended.
    pub async fn append_messages(
        &self,
        id: &str,
        new_messages: &[Message],
    ) -> Result<usize, SessionError> {
        let record = self.record(id)?;
        let mut guard = record.lock().await;
        Self::ensure_live(id, guard.deleted)?;

        let before = guard.history.len();
        for message in new_messages {
            if !guard.history.contains(message) {
                guard.history.push(message.clone());
            }
        }
        let appended = guard.history.len() - before;
        debug!(
            session_id = %id,
            appended,
            skipped = new_messages.len() - appended,
            "Messages appended"
        );
        Ok(appended)
    }

    /// Append one message unconditionally, even if an equal one exists.
    ///
    /// Generated replies are recorded through this.
    pub async fn push_message(&self, id: &str, message: Message) -> Result<(), SessionError> {
        let record = self.record(id)?;
        let mut guard = record.lock().await;
        Self::ensure_live(id, guard.deleted)?;
        guard.history.push(message);
        Ok(())
    }

    /// A copy of the session's configuration.
    pub async fn get_config(&self, id: &str) -> Result<SessionConfig, SessionError> {
        let record = self.record(id)?;
        let guard = record.lock().await;
        Self::ensure_live(id, guard.deleted)?;
        Ok(guard.config.clone())
    }

    /// Replace the session's configuration.
    pub async fn set_config(&self, id: &str, config: SessionConfig) -> Result<(), SessionError> {
        let record = self.record(id)?;
        let mut guard = record.lock().await;
        Self::ensure_live(id, guard.deleted)?;
        guard.config = config;
        Ok(())
    }

    /// Remove a session's history and configuration.
    ///
    /// Not idempotent: deleting an unknown or already-deleted id fails.
    pub async fn delete(&self, id: &str) -> Result<(), SessionError> {
        let (_, record) = self
            .sessions
            .remove(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        record.lock().await.deleted = true;
        info!(session_id = %id, "Session deleted");
        Ok(())
    }

    fn record(&self, id: &str) -> Result<Arc<Mutex<SessionRecord>>, SessionError> {
        self.sessions
            .get(id)
            .map(|r| Arc::clone(r.value()))
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn ensure_live(id: &str, deleted: bool) -> Result<(), SessionError> {
        if deleted {
            return Err(SessionError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
