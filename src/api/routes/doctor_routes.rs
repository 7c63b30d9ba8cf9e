//! Doctor Routes
//!
//! 定义医生推荐相关的 API 路由。

use crate::api::handlers::doctor_handler::*;
use axum::{Router, routing::get};

use crate::api::app_state::AppState;

/// 创建医生推荐路由器
pub fn create_doctor_router() -> Router<AppState> {
    Router::new()
        .route("/doctors", get(list_doctors))
        .route("/doctors/emergency", get(emergency_doctors))
        .route("/doctors/search", get(search_doctors))
        .route("/doctors/locations", get(list_locations))
        .route("/doctors/specializations", get(list_specializations))
}
