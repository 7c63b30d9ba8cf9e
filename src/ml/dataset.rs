//! 训练数据集

use rand::SeedableRng;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use statrs::distribution::Normal;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::error::{AppError, Result};

/// 候选目标列名，按优先级排列
const TARGET_CANDIDATES: [&str; 3] = ["target", "label", "class"];

/// 带标签的表格数据
#[derive(Debug, Clone)]
pub struct Dataset {
    pub feature_columns: Vec<String>,
    pub target_column: String,
    pub rows: Vec<Vec<f64>>,
    pub labels: Vec<i64>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let dataset = Self::from_reader(file)?;
        info!(
            "Dataset loaded: {} rows, {} features, target '{}'",
            dataset.len(),
            dataset.feature_columns.len(),
            dataset.target_column
        );
        Ok(dataset)
    }

    /// 解析 CSV；目标列为 target/label/class 之一，否则取最后一列
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        if headers.len() < 2 {
            return Err(AppError::InvalidInput(
                "dataset needs at least one feature column and a target column".into(),
            ));
        }

        let target_index = TARGET_CANDIDATES
            .iter()
            .find_map(|c| headers.iter().position(|h| h == c))
            .unwrap_or(headers.len() - 1);

        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for (line, record) in csv_reader.records().enumerate() {
            let record = record?;
            let mut row = Vec::with_capacity(headers.len() - 1);
            for (i, cell) in record.iter().enumerate() {
                let value: f64 = cell.trim().parse().map_err(|_| {
                    AppError::InvalidInput(format!(
                        "row {}: column '{}' is not numeric: '{}'",
                        line + 1,
                        headers[i],
                        cell
                    ))
                })?;
                if i == target_index {
                    labels.push(value.round() as i64);
                } else {
                    row.push(value);
                }
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(AppError::InvalidInput("dataset has no rows".into()));
        }

        let target_column = headers[target_index].clone();
        let feature_columns = headers
            .into_iter()
            .enumerate()
            .filter(|(i, _)| *i != target_index)
            .map(|(_, h)| h)
            .collect();

        Ok(Self {
            feature_columns,
            target_column,
            rows,
            labels,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 排序去重后的标签
    pub fn classes(&self) -> Vec<i64> {
        let mut classes = self.labels.clone();
        classes.sort_unstable();
        classes.dedup();
        classes
    }

    fn subset(&self, indices: &[usize]) -> Self {
        Self {
            feature_columns: self.feature_columns.clone(),
            target_column: self.target_column.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }

    /// 分层划分训练集与测试集
    pub fn stratified_split(&self, test_size: f64, seed: u64) -> (Self, Self) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut train = Vec::new();
        let mut test = Vec::new();

        for class in self.classes() {
            let mut indices: Vec<usize> = (0..self.len())
                .filter(|&i| self.labels[i] == class)
                .collect();
            indices.shuffle(&mut rng);
            let n_test = ((indices.len() as f64) * test_size).round() as usize;
            let n_test = n_test.min(indices.len().saturating_sub(1));
            test.extend_from_slice(&indices[..n_test]);
            train.extend_from_slice(&indices[n_test..]);
        }

        train.shuffle(&mut rng);
        test.shuffle(&mut rng);
        (self.subset(&train), self.subset(&test))
    }

    /// 写出 CSV（特征列 + 目标列）
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(path)?;
        let mut header = self.feature_columns.clone();
        header.push(self.target_column.clone());
        writer.write_record(&header)?;
        for (row, label) in self.rows.iter().zip(&self.labels) {
            let mut record: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            record.push(label.to_string());
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// 生成三分类合成数据集
///
/// 正常：N(0, 0.5)；发作前期：N(0.5, 1.0)；发作：N(1.0, 1.5)。
pub fn generate_synthetic(n_samples: usize, n_features: usize, seed: u64) -> Result<Dataset> {
    let mut rng = StdRng::seed_from_u64(seed);
    let per_class = n_samples / 3;
    let params = [(0_i64, 0.0, 0.5), (1, 0.5, 1.0), (2, 1.0, 1.5)];

    let mut samples: Vec<(Vec<f64>, i64)> = Vec::with_capacity(per_class * 3);
    for (label, mean, std) in params {
        let normal = Normal::new(mean, std)
            .map_err(|e| AppError::Internal(format!("正态分布参数无效: {}", e)))?;
        for _ in 0..per_class {
            let row = (0..n_features).map(|_| normal.sample(&mut rng)).collect();
            samples.push((row, label));
        }
    }
    samples.shuffle(&mut rng);

    let (rows, labels) = samples.into_iter().unzip();
    Ok(Dataset {
        feature_columns: (1..=n_features).map(|i| format!("feature_{}", i)).collect(),
        target_column: "target".to_string(),
        rows,
        labels,
    })
}
