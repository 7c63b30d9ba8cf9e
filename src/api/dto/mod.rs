//! DTO 模块
//!
//! 数据传输对象，用于 API 请求和响应的序列化。

pub mod chat_dto;
pub mod doctor_dto;
pub mod health_dto;
pub mod prediction_dto;
pub mod symptom_dto;
pub mod upload_dto;

pub use chat_dto::*;
pub use doctor_dto::*;
pub use health_dto::*;
pub use prediction_dto::*;
pub use symptom_dto::*;
pub use upload_dto::*;
