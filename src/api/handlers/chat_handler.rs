use axum::{Json, extract::State, response::IntoResponse};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::chat_dto::*, extract::AppJson},
    error::AppError,
    security::validation::RequestValidator,
};

pub async fn chat(
    State(state): State<AppState>,
    AppJson(request): AppJson<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    let message = state
        .validator
        .validate_message(request.message.as_deref())?;
    let message = RequestValidator::sanitize_string(message);
    debug!("Chat message received: {} chars", message.chars().count());

    let response = state.chatbot.chat(&message);
    state.metrics.record_chat_message();

    Ok(Json(ChatResponse {
        success: true,
        response,
    }))
}

pub async fn get_history(State(state): State<AppState>) -> impl IntoResponse {
    let history = state.chatbot.history();
    debug!("Chat history: {} turns", history.len());

    Json(ChatHistoryResponse {
        success: true,
        count: history.len(),
        history,
    })
}

pub async fn clear_history(State(state): State<AppState>) -> impl IntoResponse {
    state.chatbot.clear();
    debug!("Chat history cleared");

    Json(ClearHistoryResponse {
        success: true,
        message: "Conversation history cleared".to_string(),
    })
}
