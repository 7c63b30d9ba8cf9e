//! 统计特征提取

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::feature::FeatureVector;

/// 表格最多统计的数值列数
pub const MAX_TABLE_COLUMNS: usize = 20;
/// 文本中逐个记录的数值个数
pub const MAX_TEXT_VALUES: usize = 15;
/// 信号最多统计的通道数
pub const MAX_SIGNAL_CHANNELS: usize = 8;

const NUMBER_PATTERN: &str = r"-?\d+\.?\d*";

/// 表格特征：前 20 个数值列的均值、样本标准差、最大值、最小值
///
/// `columns` 为 (列名, 该列所有非空数值)。没有数值列时返回全零占位特征。
pub fn table_features(columns: &[(String, Vec<f64>)]) -> FeatureVector {
    if columns.is_empty() {
        return FeatureVector::fallback();
    }

    let mut features = FeatureVector::new();
    for (name, values) in columns.iter().take(MAX_TABLE_COLUMNS) {
        features.insert(format!("{}_mean", name), mean(values));
        features.insert(format!("{}_std", name), sample_std(values));
        features.insert(format!("{}_max", name), max(values));
        features.insert(format!("{}_min", name), min(values));
    }
    features
}

/// 文本特征：提取所有数字后计算统计量，并记录前 15 个数值
pub fn text_features(text: &str) -> Result<FeatureVector> {
    let numbers = numeric_tokens(text)?;
    if numbers.is_empty() {
        return Ok(FeatureVector::fallback());
    }

    let mut features = FeatureVector::new();
    features.insert("text_mean", mean(&numbers));
    features.insert("text_std", population_std(&numbers));
    features.insert("text_max", max(&numbers));
    features.insert("text_min", min(&numbers));
    features.insert("text_count", numbers.len() as f64);
    for (i, value) in numbers.iter().take(MAX_TEXT_VALUES).enumerate() {
        features.insert(format!("value_{}", i), *value);
    }
    Ok(features)
}

/// 信号特征：前 8 个通道的均值、总体标准差、最大值、最小值、能量
pub fn signal_features(channels: &[Vec<f64>]) -> FeatureVector {
    let mut features = FeatureVector::new();
    for (i, samples) in channels.iter().take(MAX_SIGNAL_CHANNELS).enumerate() {
        features.insert(format!("ch{}_mean", i), mean(samples));
        features.insert(format!("ch{}_std", i), population_std(samples));
        features.insert(format!("ch{}_max", i), max(samples));
        features.insert(format!("ch{}_min", i), min(samples));
        features.insert(
            format!("ch{}_energy", i),
            samples.iter().map(|x| x * x).sum(),
        );
    }
    features
}

/// 按出现顺序提取文本中的数字
pub fn numeric_tokens(text: &str) -> Result<Vec<f64>> {
    let re = Regex::new(NUMBER_PATTERN)
        .map_err(|e| AppError::Internal(format!("invalid number pattern: {}", e)))?;
    Ok(re
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect())
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// ddof = 1，少于两个值时为 0.0
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}
