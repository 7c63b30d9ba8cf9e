//! SeizureGuard - 癫痫发作风险分诊服务
//!
//! 组合表格分类器、症状关键词分析、规则对话助手、医生目录查询
//! 以及 CSV / PDF / 图片 / EDF 文件特征提取，并通过 HTTP 对外提供。

pub mod api;
pub mod config;
pub mod error;
pub mod ml;
pub mod models;
pub mod observability;
pub mod security;
pub mod services;
pub mod storage;
