//! 风险分类服务
//!
//! 对齐特征列 → 标准化 → 模型推理 → 推导风险等级与说明。

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::ml::artifacts::ModelArtifacts;
use crate::ml::classifier::argmax;
use crate::models::classification::{ClassificationResult, PredictionClass};
use crate::models::feature::FeatureInput;

/// 分类服务 trait
pub trait PredictionService: Send + Sync {
    /// 对单个样本分类
    fn predict(&self, input: &FeatureInput) -> Result<ClassificationResult>;

    /// 按顺序逐个分类，遇到第一个错误即返回
    fn predict_batch(&self, inputs: &[FeatureInput]) -> Result<Vec<ClassificationResult>> {
        inputs.iter().map(|input| self.predict(input)).collect()
    }

    /// 训练时记录的特征列
    fn feature_columns(&self) -> &[String];
}

/// 基于持久化构件的分类器
pub struct Predictor {
    artifacts: ModelArtifacts,
}

impl Predictor {
    pub fn new(artifacts: ModelArtifacts) -> Self {
        Self { artifacts }
    }

    /// 把各种输入形式转换为按训练列排序的一行
    fn prepare_input(&self, input: &FeatureInput) -> Result<Vec<f64>> {
        let columns = &self.artifacts.feature_columns;
        match input {
            FeatureInput::Named(features) => Ok(features.align(columns)),
            FeatureInput::Table(rows) => rows
                .first()
                .map(|row| row.align(columns))
                .ok_or_else(|| AppError::InvalidInput("feature table is empty".into())),
            FeatureInput::Row(values) => self.check_width(values).map(|_| values.clone()),
            FeatureInput::Matrix(rows) => {
                let first = rows
                    .first()
                    .ok_or_else(|| AppError::InvalidInput("feature matrix is empty".into()))?;
                self.check_width(first)?;
                Ok(first.clone())
            }
        }
    }

    fn check_width(&self, values: &[f64]) -> Result<()> {
        let expected = self.artifacts.feature_columns.len();
        if values.len() != expected {
            return Err(AppError::InvalidInput(format!(
                "expected {} feature values, got {}",
                expected,
                values.len()
            )));
        }
        Ok(())
    }
}

impl PredictionService for Predictor {
    fn predict(&self, input: &FeatureInput) -> Result<ClassificationResult> {
        let row = self.prepare_input(input)?;
        let scaled = self.artifacts.scaler.transform(&row)?;
        let proba = self.artifacts.model.predict_proba(&scaled)?;

        let classes = self.artifacts.model.classes();
        let index = argmax(&proba);
        let prediction = PredictionClass::from_label(classes[index]);
        let confidence = proba[index] * 100.0;

        let probabilities: BTreeMap<String, f64> = classes
            .iter()
            .zip(&proba)
            .map(|(label, p)| (PredictionClass::from_label(*label).name(), p * 100.0))
            .collect();

        debug!(
            "Prediction: {} ({:.1}% confidence)",
            prediction.name(),
            confidence
        );
        Ok(ClassificationResult::new(prediction, confidence, probabilities))
    }

    fn feature_columns(&self) -> &[String] {
        &self.artifacts.feature_columns
    }
}

pub fn create_prediction_service(artifacts: ModelArtifacts) -> Arc<dyn PredictionService> {
    Arc::new(Predictor::new(artifacts))
}
