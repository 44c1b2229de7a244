//! Session inspection and management endpoints.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use parley_types::chat::Message;

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub messages: Vec<Message>,
}

/// Request body for PUT /sessions/{session_id}/system-prompt.
#[derive(Debug, Deserialize)]
pub struct SystemPromptRequest {
    pub system_prompt: String,
}

/// GET /sessions/{session_id} -- full history of a session.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let messages = state.chat_service.history(&session_id).await?;
    Ok(Json(SessionResponse {
        session_id,
        messages,
    }))
}

/// PUT /sessions/{session_id}/system-prompt -- replace the stored prompt.
pub async fn update_system_prompt(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SystemPromptRequest>,
) -> Result<Json<Value>, AppError> {
    state
        .chat_service
        .update_system_prompt(&session_id, req.system_prompt)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "message": "System prompt updated",
        "session_id": session_id,
    })))
}

/// DELETE /sessions/{session_id} -- drop a session and its history.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state.chat_service.delete_session(&session_id).await?;

    Ok(Json(json!({
        "status": "success",
        "message": format!("Session {session_id} deleted"),
    })))
}
