//! Health Routes

use crate::api::handlers::health_handler::*;
use axum::{Router, routing::get};

use crate::api::app_state::AppState;

/// 创建健康检查路由器
pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
