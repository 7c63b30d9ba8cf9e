use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 占位特征数量（无法提取数值时使用）
pub const FALLBACK_FEATURE_COUNT: usize = 20;

/// 命名特征向量
///
/// 特征名到数值的映射。送入分类器前会按训练时记录的列顺序重排。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(BTreeMap<String, f64>);

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 全零占位特征 `feature_0` … `feature_19`
    pub fn fallback() -> Self {
        (0..FALLBACK_FEATURE_COUNT)
            .map(|i| (format!("feature_{}", i), 0.0))
            .collect()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }

    /// 按给定列顺序对齐，缺失列补 0.0，多余列丢弃
    pub fn align(&self, columns: &[String]) -> Vec<f64> {
        columns
            .iter()
            .map(|c| self.0.get(c).copied().unwrap_or(0.0))
            .collect()
    }
}

impl FromIterator<(String, f64)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, f64>> for FeatureVector {
    fn from(map: BTreeMap<String, f64>) -> Self {
        Self(map)
    }
}

/// 分类器输入
///
/// 命名映射、单行表格（映射列表，取第一行）或与特征列对齐的数值数组。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureInput {
    /// 命名特征
    Named(FeatureVector),
    /// 表格（仅使用第一行）
    Table(Vec<FeatureVector>),
    /// 单行数值
    Row(Vec<f64>),
    /// 数值矩阵（仅使用第一行）
    Matrix(Vec<Vec<f64>>),
}

impl From<FeatureVector> for FeatureInput {
    fn from(features: FeatureVector) -> Self {
        FeatureInput::Named(features)
    }
}
