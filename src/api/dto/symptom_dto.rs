//! 症状分析 DTO

use serde::{Deserialize, Serialize};

use crate::models::symptom::SymptomReport;

/// 症状分析请求
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AnalyzeSymptomsRequest {
    /// 症状自由文本
    pub symptoms: Option<String>,
}

/// 症状分析响应
#[derive(Debug, Serialize)]
pub struct AnalyzeSymptomsResponse {
    pub success: bool,
    pub result: SymptomReport,
}
