use crate::config::config::{AppConfig, ModelConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "SEIZUREGUARD_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 合并顺序：
    /// 1. 开发环境默认值
    /// 2. ./config.toml
    /// 3. 环境变量（`SEIZUREGUARD_SERVER__PORT=9000`）
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, figment::Error> {
        Self::figment(path.as_ref()).extract()
    }

    /// 仅加载模型配置
    pub fn load_model_config() -> Result<ModelConfig, figment::Error> {
        Self::figment(&default_config_path())
            .focus("model")
            .extract()
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::development()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.model.model_dir.as_os_str().is_empty() {
            return Err(ConfigValidationError::MissingModelDir);
        }

        if !(config.training.test_size > 0.0 && config.training.test_size < 1.0) {
            return Err(ConfigValidationError::InvalidTestSize(
                config.training.test_size,
            ));
        }

        if config.training.n_estimators == 0 {
            return Err(ConfigValidationError::InvalidEstimators);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("模型目录未配置")]
    MissingModelDir,

    #[error("测试集比例无效，必须在 (0, 1) 之间: {0}")]
    InvalidTestSize(f64),

    #[error("决策树数量无效，必须大于 0")]
    InvalidEstimators,
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}

/// 检查配置文件是否存在
pub fn config_exists() -> bool {
    default_config_path().exists()
}
