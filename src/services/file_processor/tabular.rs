//! CSV 文件处理

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::models::feature::FeatureVector;
use crate::models::processed_file::{FileDetails, FileKind, ProcessedFile};

use super::features::table_features;

/// 已解析的表格
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = dedup_headers(csv_reader.headers()?.iter());
        let rows = csv_reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<std::result::Result<Vec<Vec<String>>, _>>()?;
        Ok(Self { headers, rows })
    }

    /// 数值列：所有非空单元格都能解析为数字，且至少有一个
    pub fn numeric_columns(&self) -> Vec<(String, Vec<f64>)> {
        self.headers
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                let mut values = Vec::with_capacity(self.rows.len());
                for row in &self.rows {
                    let cell = row.get(i).map(|c| c.trim()).unwrap_or("");
                    if cell.is_empty() {
                        continue;
                    }
                    values.push(cell.parse::<f64>().ok()?);
                }
                (!values.is_empty()).then(|| (name.clone(), values))
            })
            .collect()
    }

    pub fn features(&self) -> FeatureVector {
        table_features(&self.numeric_columns())
    }
}

/// 重复列名依次加 `.1`、`.2` 后缀
fn dedup_headers<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut headers = Vec::new();
    for name in names {
        let mut candidate = name.to_string();
        let mut suffix = 1;
        while !seen.insert(candidate.clone()) {
            candidate = format!("{}.{}", name, suffix);
            suffix += 1;
        }
        headers.push(candidate);
    }
    headers
}

pub fn process_csv(path: &Path) -> Result<ProcessedFile> {
    let file = std::fs::File::open(path)?;
    let table = Table::from_reader(file)?;
    debug!(
        "CSV loaded: {} rows x {} columns",
        table.rows.len(),
        table.headers.len()
    );

    let features = table.features();
    let rows = table.rows.len();
    Ok(ProcessedFile::new(
        FileKind::Csv,
        features,
        format!("Successfully processed CSV with {} rows", rows),
        FileDetails::Table {
            rows,
            columns: table.headers,
        },
    ))
}
