use axum::{Json, extract::State, response::IntoResponse};
use tracing::debug;

use crate::api::{app_state::AppState, dto::health_dto::*};

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    debug!("Health check, predictor_loaded={}", state.predictor_loaded());

    Json(HealthResponse {
        success: true,
        status: "healthy".to_string(),
        predictor_loaded: state.predictor_loaded(),
        version: state.version.clone(),
    })
}
