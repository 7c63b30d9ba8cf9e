//! 上传 DTO

use serde::Serialize;

use crate::models::processed_file::ProcessedFile;

/// 文件上传响应，模型已加载时 `result.prediction` 携带分类结果
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub result: ProcessedFile,
}
