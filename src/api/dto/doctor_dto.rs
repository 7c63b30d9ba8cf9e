//! 医生推荐 DTO
//!
//! 定义医生查询参数和响应数据结构。

use serde::{Deserialize, Serialize};

use crate::models::provider::ProviderRecord;

/// 默认返回条数
pub const DEFAULT_TOP_N: usize = 5;

/// 医生推荐查询参数
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct DoctorQueryParams {
    /// 地区（子串匹配）
    pub location: Option<String>,
    /// 专业（子串匹配）
    pub specialization: Option<String>,
    /// "true"（大小写不敏感）时仅返回接诊急诊的医生
    pub emergency: Option<String>,
    /// 风险等级，HIGH 等同于 emergency
    pub risk_level: Option<String>,
    /// 返回条数（1-100）
    pub top_n: Option<usize>,
}

impl DoctorQueryParams {
    pub fn emergency(&self) -> bool {
        self.emergency
            .as_deref()
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }
}

/// 按姓名搜索参数
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct DoctorSearchParams {
    pub name: Option<String>,
}

/// 医生列表响应
#[derive(Debug, Serialize)]
pub struct DoctorsResponse {
    pub success: bool,
    pub count: usize,
    pub doctors: Vec<ProviderRecord>,
    /// 纯文本渲染
    pub formatted: String,
}

impl DoctorsResponse {
    pub fn new(doctors: Vec<ProviderRecord>) -> Self {
        Self {
            success: true,
            count: doctors.len(),
            formatted: crate::services::recommendations_text(&doctors),
            doctors,
        }
    }
}

/// 地区列表响应
#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub success: bool,
    pub locations: Vec<String>,
}

/// 专业列表响应
#[derive(Debug, Serialize)]
pub struct SpecializationsResponse {
    pub success: bool,
    pub specializations: Vec<String>,
}
