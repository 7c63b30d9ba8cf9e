//! Prediction Routes
//!
//! 定义风险分类和文件上传相关的 API 路由。

use crate::api::handlers::{prediction_handler::*, upload_handler::*};
use axum::{Router, routing::post};

use crate::api::app_state::AppState;

/// 创建预测路由器
pub fn create_prediction_router() -> Router<AppState> {
    Router::new()
        .route("/predict", post(predict))
        .route("/predict/batch", post(predict_batch))
        .route("/upload", post(upload_file))
}
