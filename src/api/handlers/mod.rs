//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod chat_handler;
pub mod doctor_handler;
pub mod health_handler;
pub mod prediction_handler;
pub mod symptom_handler;
pub mod upload_handler;

pub use chat_handler::*;
pub use doctor_handler::*;
pub use health_handler::*;
pub use prediction_handler::*;
pub use symptom_handler::*;
pub use upload_handler::*;
