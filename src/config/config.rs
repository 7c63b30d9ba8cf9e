use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 上传文件大小上限（字节）
    pub max_upload_size: usize,
}

/// 模型构件配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ModelConfig {
    /// 模型目录
    pub model_dir: PathBuf,
    /// 分类器文件名
    pub model_file: String,
    /// 标准化器文件名
    pub scaler_file: String,
    /// 特征列文件名
    pub features_file: String,
}

impl ModelConfig {
    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(&self.model_file)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.model_dir.join(&self.scaler_file)
    }

    pub fn features_path(&self) -> PathBuf {
        self.model_dir.join(&self.features_file)
    }
}

/// 医生数据配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProvidersConfig {
    /// 外部 CSV 数据文件，不存在时使用内置种子数据
    pub data_path: Option<PathBuf>,
}

/// 文件提取配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExtractionConfig {
    /// tesseract 可执行文件路径
    pub tesseract_path: PathBuf,
    /// OCR 语言
    pub ocr_language: String,
}

/// 训练配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TrainingConfig {
    /// 数据集路径
    pub dataset_path: PathBuf,
    /// 测试集比例
    pub test_size: f64,
    /// 决策树数量
    pub n_estimators: usize,
    /// 最大深度
    pub max_depth: usize,
    /// 随机种子
    pub seed: u64,
    /// 数据集不存在时生成合成数据
    pub generate_if_missing: bool,
    /// 合成样本数
    pub sample_count: usize,
    /// 合成特征数
    pub sample_features: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 模型配置
    pub model: ModelConfig,
    /// 医生数据配置
    pub providers: ProvidersConfig,
    /// 文件提取配置
    pub extraction: ExtractionConfig,
    /// 训练配置
    pub training: TrainingConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 5000,
                max_upload_size: 16 * 1024 * 1024,
            },
            model: ModelConfig {
                model_dir: PathBuf::from("models"),
                model_file: "seizure_model.json".into(),
                scaler_file: "scaler.json".into(),
                features_file: "feature_columns.json".into(),
            },
            providers: ProvidersConfig {
                data_path: Some(PathBuf::from("datasets/neurologists.csv")),
            },
            extraction: ExtractionConfig {
                tesseract_path: PathBuf::from("tesseract"),
                ocr_language: "eng".into(),
            },
            training: TrainingConfig {
                dataset_path: PathBuf::from("datasets/seizure_dataset.csv"),
                test_size: 0.2,
                n_estimators: 100,
                max_depth: 10,
                seed: 42,
                generate_if_missing: true,
                sample_count: 1000,
                sample_features: 20,
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            app_name: "seizureguard".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config.logging.log_dir = Some(PathBuf::from("./logs"));
        config.training.generate_if_missing = false;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_paths_join_model_dir() {
        let config = AppConfig::development();
        assert_eq!(
            config.model.model_path(),
            PathBuf::from("models").join("seizure_model.json")
        );
        assert_eq!(
            config.model.features_path(),
            PathBuf::from("models").join("feature_columns.json")
        );
    }

    #[test]
    fn test_production_overrides() {
        let config = AppConfig::production();
        assert_eq!(config.environment, "production");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.structured);
        assert!(!config.training.generate_if_missing);
    }
}
