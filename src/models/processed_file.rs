use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::classification::ClassificationResult;
use crate::models::feature::FeatureVector;

/// 支持的上传文件类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Csv,
    Pdf,
    Image,
    Edf,
}

impl FileKind {
    /// 支持的扩展名
    pub const SUPPORTED_EXTENSIONS: [&'static str; 6] = ["csv", "pdf", "png", "jpg", "jpeg", "edf"];

    /// 从文件名推断类型（扩展名大小写不敏感）
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = std::path::Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase())?;

        match extension.as_str() {
            "csv" => Some(FileKind::Csv),
            "pdf" => Some(FileKind::Pdf),
            "png" | "jpg" | "jpeg" => Some(FileKind::Image),
            "edf" => Some(FileKind::Edf),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Csv => "csv",
            FileKind::Pdf => "pdf",
            FileKind::Image => "image",
            FileKind::Edf => "edf",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 各类文件的附加信息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FileDetails {
    Table {
        rows: usize,
        columns: Vec<String>,
    },
    Image {
        text: String,
        /// (高, 宽, 通道数)
        image_shape: (u32, u32, u8),
    },
    Text {
        text: String,
    },
    Signal {
        channels: Vec<String>,
        sampling_rate: f64,
        duration_seconds: f64,
    },
}

/// 文件处理结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedFile {
    pub file_type: FileKind,
    pub features: FeatureVector,
    pub message: String,
    #[serde(flatten)]
    pub details: FileDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<ClassificationResult>,
}

impl ProcessedFile {
    pub fn new(
        file_type: FileKind,
        features: FeatureVector,
        message: String,
        details: FileDetails,
    ) -> Self {
        Self {
            file_type,
            features,
            message,
            details,
            prediction: None,
        }
    }

    pub fn with_prediction(mut self, prediction: ClassificationResult) -> Self {
        self.prediction = Some(prediction);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_file_name() {
        assert_eq!(FileKind::from_file_name("eeg.CSV"), Some(FileKind::Csv));
        assert_eq!(FileKind::from_file_name("scan.jpeg"), Some(FileKind::Image));
        assert_eq!(FileKind::from_file_name("report.pdf"), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_file_name("rec.edf"), Some(FileKind::Edf));
        assert_eq!(FileKind::from_file_name("notes.docx"), None);
        assert_eq!(FileKind::from_file_name("no_extension"), None);
    }

    #[test]
    fn test_details_flatten_into_result() {
        let processed = ProcessedFile::new(
            FileKind::Pdf,
            FeatureVector::fallback(),
            "ok".into(),
            FileDetails::Text {
                text: "hello".into(),
            },
        );
        let json = serde_json::to_value(&processed).unwrap();
        assert_eq!(json["file_type"], "pdf");
        assert_eq!(json["text"], "hello");
        assert!(json.get("prediction").is_none());
    }
}
