//! Chat endpoint.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use parley_core::chat::ChatTurn;
use parley_types::chat::Message;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<Message>,
    pub session_id: Option<String>,
    pub system_prompt: Option<String>,
    pub prompt_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

/// POST /chat -- append the caller's turns, ask the model, return the reply.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let outcome = state
        .chat_service
        .chat(ChatTurn {
            session_id: req.session_id,
            messages: req.messages,
            system_prompt: req.system_prompt,
            prompt_type: req.prompt_type,
        })
        .await?;

    Ok(Json(ChatResponse {
        response: outcome.response,
        session_id: outcome.session_id,
    }))
}
