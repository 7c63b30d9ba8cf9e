//! API 模块
//!
//! 提供 REST API 支持。

#[cfg(test)]
mod api_tests;
pub mod app_state;
pub mod dto;
pub mod extract;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use crate::error::AppError;
use crate::observability::metrics_middleware;
use crate::security::middleware::security_headers_middleware;
use axum::{Router, extract::DefaultBodyLimit};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn create_router(app_state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::health_routes::create_health_router())
        .merge(routes::prediction_routes::create_prediction_router())
        .merge(routes::symptom_routes::create_symptom_router())
        .merge(routes::chat_routes::create_chat_router())
        .merge(routes::doctor_routes::create_doctor_router());

    let metrics = app_state.metrics.clone();
    let max_upload_size = app_state.max_upload_size;

    Router::new()
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(max_upload_size))
        .layer(axum::middleware::from_fn_with_state(
            metrics,
            metrics_middleware,
        ))
        // Add security headers middleware to all routes
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub async fn initialize_api(app_state: AppState) -> Result<Router, AppError> {
    tracing::info!("Initializing API router...");
    Ok(create_router(app_state))
}
