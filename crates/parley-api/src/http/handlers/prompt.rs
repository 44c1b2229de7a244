//! Built-in prompt listing.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PromptTypesResponse {
    pub prompt_types: Vec<&'static str>,
}

/// GET /prompts -- names accepted as `prompt_type`.
pub async fn list_prompts(State(state): State<AppState>) -> Json<PromptTypesResponse> {
    Json(PromptTypesResponse {
        prompt_types: state.chat_service.prompt_types(),
    })
}
