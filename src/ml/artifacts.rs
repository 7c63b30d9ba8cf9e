//! 模型构件的加载与保存

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::config::ModelConfig;
use crate::error::{AppError, Result};
use crate::ml::classifier::ClassifierModel;
use crate::ml::scaler::StandardScaler;

/// 训练产出的三个构件：分类器、标准化器、有序特征列
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub model: ClassifierModel,
    pub scaler: StandardScaler,
    pub feature_columns: Vec<String>,
}

impl ModelArtifacts {
    /// 组装并校验构件之间的维度一致性
    pub fn new(
        model: ClassifierModel,
        scaler: StandardScaler,
        feature_columns: Vec<String>,
    ) -> Result<Self> {
        let width = feature_columns.len();
        if width == 0 {
            return Err(AppError::InvalidArtifact("feature column list is empty".into()));
        }
        if scaler.width() != width {
            return Err(AppError::InvalidArtifact(format!(
                "scaler expects {} features but {} columns were recorded",
                scaler.width(),
                width
            )));
        }
        if model.n_features() != width {
            return Err(AppError::InvalidArtifact(format!(
                "model expects {} features but {} columns were recorded",
                model.n_features(),
                width
            )));
        }
        model.validate()?;

        Ok(Self {
            model,
            scaler,
            feature_columns,
        })
    }

    /// 从模型目录加载，任一文件缺失即失败
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let model: ClassifierModel = read_json(&config.model_path())?;
        let scaler: StandardScaler = read_json(&config.scaler_path())?;
        let feature_columns: Vec<String> = read_json(&config.features_path())?;

        let artifacts = Self::new(model, scaler, feature_columns)?;
        info!(
            "Model artifacts loaded from {} ({} features, {} classes)",
            config.model_dir.display(),
            artifacts.feature_columns.len(),
            artifacts.model.classes().len()
        );
        Ok(artifacts)
    }

    /// 写入模型目录（不存在时创建）
    pub fn save(&self, config: &ModelConfig) -> Result<()> {
        fs::create_dir_all(&config.model_dir)?;
        write_json(&config.model_path(), &self.model)?;
        write_json(&config.scaler_path(), &self.scaler)?;
        write_json(&config.features_path(), &self.feature_columns)?;

        info!("Model saved to: {}", config.model_path().display());
        info!("Scaler saved to: {}", config.scaler_path().display());
        info!("Features saved to: {}", config.features_path().display());
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(AppError::ArtifactMissing(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| AppError::InvalidArtifact(format!("{}: {}", path.display(), e)))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::classifier::{DecisionTree, TreeNode};

    fn model_config(dir: &Path) -> ModelConfig {
        ModelConfig {
            model_dir: dir.to_path_buf(),
            model_file: "seizure_model.json".into(),
            scaler_file: "scaler.json".into(),
            features_file: "feature_columns.json".into(),
        }
    }

    fn single_leaf_forest(n_features: usize) -> ClassifierModel {
        ClassifierModel::RandomForest {
            classes: vec![0, 1, 2],
            n_features,
            trees: vec![DecisionTree {
                nodes: vec![TreeNode::Leaf {
                    value: vec![1.0, 0.0, 0.0],
                }],
            }],
        }
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = model_config(dir.path());

        let artifacts = ModelArtifacts::new(
            single_leaf_forest(2),
            StandardScaler::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap(),
            vec!["a".into(), "b".into()],
        )
        .unwrap();
        artifacts.save(&config).unwrap();

        let loaded = ModelArtifacts::load(&config).unwrap();
        assert_eq!(loaded.feature_columns, vec!["a", "b"]);
        assert_eq!(loaded.model, artifacts.model);
    }

    #[test]
    fn test_missing_artifact_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let result = ModelArtifacts::load(&model_config(dir.path()));
        assert!(matches!(result, Err(AppError::ArtifactMissing(_))));
    }

    #[test]
    fn test_width_mismatch_is_invalid() {
        let result = ModelArtifacts::new(
            single_leaf_forest(3),
            StandardScaler::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap(),
            vec!["a".into(), "b".into()],
        );
        assert!(matches!(result, Err(AppError::InvalidArtifact(_))));
    }
}
