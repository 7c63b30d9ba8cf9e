//! 预测 DTO
//!
//! 定义风险分类相关的请求和响应数据结构。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::classification::ClassificationResult;

/// 单样本预测请求
///
/// `features` 保留原始 JSON，由处理程序转换为特征输入，
/// 形状不符时返回 InvalidInput 而不是反序列化拒绝。
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct PredictRequest {
    pub features: Option<Value>,
}

/// 单样本预测响应
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    pub result: ClassificationResult,
}

/// 批量预测请求
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct BatchPredictRequest {
    pub samples: Option<Vec<Value>>,
}

/// 批量预测响应
#[derive(Debug, Serialize)]
pub struct BatchPredictResponse {
    pub success: bool,
    pub count: usize,
    pub results: Vec<ClassificationResult>,
}
