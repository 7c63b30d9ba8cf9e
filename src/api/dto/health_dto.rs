//! 健康检查 DTO

use serde::{Deserialize, Serialize};

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub success: bool,
    /// 服务状态
    pub status: String,
    /// 分类模型是否加载成功
    pub predictor_loaded: bool,
    /// 服务版本
    pub version: String,
}
