//! Symptom Routes

use crate::api::handlers::symptom_handler::*;
use axum::{Router, routing::post};

use crate::api::app_state::AppState;

/// 创建症状分析路由器
pub fn create_symptom_router() -> Router<AppState> {
    Router::new().route("/symptoms/analyze", post(analyze_symptoms))
}
