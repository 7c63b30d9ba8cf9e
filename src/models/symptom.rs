use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::classification::RiskLevel;

/// 症状严重程度
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    High,
    Medium,
    LowMedium,
}

/// 检测到的症状
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymptomFinding {
    /// 症状关键词
    pub symptom: String,
    /// 权重（1-10）
    pub weight: u32,
    /// 严重程度
    pub severity: Severity,
}

/// 可能的病情阶段
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Condition {
    #[serde(rename = "SEIZURE")]
    Seizure,
    #[serde(rename = "PREICTAL")]
    Preictal,
    #[serde(rename = "POST-ICTAL")]
    PostIctal,
    #[serde(rename = "NORMAL")]
    Normal,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Seizure => "SEIZURE",
            Condition::Preictal => "PREICTAL",
            Condition::PostIctal => "POST-ICTAL",
            Condition::Normal => "NORMAL",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 就诊紧急程度
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Urgency {
    #[serde(rename = "IMMEDIATE")]
    Immediate,
    #[serde(rename = "URGENT")]
    Urgent,
    #[serde(rename = "ROUTINE")]
    Routine,
    #[serde(rename = "NON-URGENT")]
    NonUrgent,
}

impl From<RiskLevel> for Urgency {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::High => Urgency::Immediate,
            RiskLevel::Medium => Urgency::Urgent,
            RiskLevel::Low => Urgency::Routine,
            RiskLevel::Minimal => Urgency::NonUrgent,
        }
    }
}

/// 症状分析报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomReport {
    pub detected_symptoms: Vec<SymptomFinding>,
    /// 风险分数（0-100，保留两位小数）
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub possible_condition: Condition,
    pub recommendations: Vec<String>,
    pub urgency: Urgency,
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_value(Severity::LowMedium).unwrap(),
            "low-medium"
        );
        assert_eq!(
            serde_json::to_value(Condition::PostIctal).unwrap(),
            "POST-ICTAL"
        );
        assert_eq!(
            serde_json::to_value(Urgency::NonUrgent).unwrap(),
            "NON-URGENT"
        );
    }

    #[test]
    fn test_urgency_from_risk_level() {
        assert_eq!(Urgency::from(RiskLevel::High), Urgency::Immediate);
        assert_eq!(Urgency::from(RiskLevel::Minimal), Urgency::NonUrgent);
    }
}
