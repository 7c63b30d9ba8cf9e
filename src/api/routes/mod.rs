//! Routes 模块
//!
//! 定义 API 路由。

pub mod chat_routes;
pub mod doctor_routes;
pub mod health_routes;
pub mod prediction_routes;
pub mod symptom_routes;
