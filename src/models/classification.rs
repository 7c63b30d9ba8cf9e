use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 风险等级
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
    Minimal,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
            RiskLevel::Minimal => "MINIMAL",
        }
    }

    /// 解析风险等级（大小写不敏感）
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Some(RiskLevel::High),
            "MEDIUM" => Some(RiskLevel::Medium),
            "LOW" => Some(RiskLevel::Low),
            "MINIMAL" => Some(RiskLevel::Minimal),
            _ => None,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 预测类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictionClass {
    Normal,
    Preictal,
    Seizure,
    /// 训练数据中出现的其他标签
    Other(i64),
}

impl PredictionClass {
    /// 训练标签到类别：0 正常，1 发作前期，2 发作
    pub fn from_label(label: i64) -> Self {
        match label {
            0 => PredictionClass::Normal,
            1 => PredictionClass::Preictal,
            2 => PredictionClass::Seizure,
            other => PredictionClass::Other(other),
        }
    }

    pub fn name(&self) -> String {
        match self {
            PredictionClass::Normal => "NORMAL".to_string(),
            PredictionClass::Preictal => "PREICTAL".to_string(),
            PredictionClass::Seizure => "SEIZURE".to_string(),
            PredictionClass::Other(label) => format!("CLASS_{}", label),
        }
    }

    /// 由类别和置信度推导风险等级
    pub fn risk_level(&self, confidence: f64) -> RiskLevel {
        match self {
            PredictionClass::Seizure if confidence >= 80.0 => RiskLevel::High,
            PredictionClass::Seizure => RiskLevel::Medium,
            PredictionClass::Preictal if confidence >= 70.0 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn explanation(&self, confidence: f64) -> String {
        match self {
            PredictionClass::Normal => format!(
                "The EEG pattern appears normal with {:.1}% confidence. No seizure activity detected.",
                confidence
            ),
            PredictionClass::Preictal => format!(
                "Pre-seizure state detected with {:.1}% confidence. This indicates potential seizure risk. Monitor closely and consult a neurologist.",
                confidence
            ),
            PredictionClass::Seizure => format!(
                "Seizure activity detected with {:.1}% confidence. Immediate medical attention recommended. Contact emergency services if experiencing symptoms.",
                confidence
            ),
            PredictionClass::Other(_) => "Unable to generate explanation.".to_string(),
        }
    }
}

impl fmt::Display for PredictionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl Serialize for PredictionClass {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

impl<'de> Deserialize<'de> for PredictionClass {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        match name.as_str() {
            "NORMAL" => Ok(PredictionClass::Normal),
            "PREICTAL" => Ok(PredictionClass::Preictal),
            "SEIZURE" => Ok(PredictionClass::Seizure),
            other => other
                .strip_prefix("CLASS_")
                .and_then(|n| n.parse().ok())
                .map(PredictionClass::Other)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown class: {}", other))),
        }
    }
}

/// 分类结果
///
/// 生成后不可变。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// 预测类别
    pub prediction: PredictionClass,
    /// 置信度（0-100）
    pub confidence: f64,
    /// 风险等级
    pub risk_level: RiskLevel,
    /// 各类别概率（百分比）
    pub probabilities: BTreeMap<String, f64>,
    /// 说明文字
    pub explanation: String,
}

impl ClassificationResult {
    pub fn new(
        prediction: PredictionClass,
        confidence: f64,
        probabilities: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            prediction,
            confidence,
            risk_level: prediction.risk_level(confidence),
            probabilities,
            explanation: prediction.explanation(confidence),
        }
    }
}
