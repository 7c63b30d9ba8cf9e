//! 症状分析服务
//!
//! 关键词加权打分：子串匹配固定词典，按命中权重归一化到 0-100，
//! 再推导风险等级、病情阶段、建议和紧急程度。

use tracing::debug;

use crate::models::classification::RiskLevel;
use crate::models::symptom::{Condition, Severity, SymptomFinding, SymptomReport, Urgency};

/// 症状词典，顺序即输出顺序
const SYMPTOM_DICTIONARY: [(&str, u32, Severity); 28] = [
    ("seizure", 10, Severity::High),
    ("convulsion", 10, Severity::High),
    ("unconscious", 10, Severity::High),
    ("collapse", 9, Severity::High),
    ("jerking", 9, Severity::High),
    ("stiffness", 8, Severity::High),
    ("twitching", 8, Severity::High),
    ("confusion", 7, Severity::Medium),
    ("dizziness", 6, Severity::Medium),
    ("disorientation", 7, Severity::Medium),
    ("memory loss", 6, Severity::Medium),
    ("blank stare", 6, Severity::Medium),
    ("unresponsive", 7, Severity::Medium),
    ("tremor", 6, Severity::Medium),
    ("shaking", 6, Severity::Medium),
    ("headache", 4, Severity::LowMedium),
    ("nausea", 4, Severity::LowMedium),
    ("fatigue", 3, Severity::LowMedium),
    ("weakness", 4, Severity::LowMedium),
    ("numbness", 5, Severity::LowMedium),
    ("tingling", 4, Severity::LowMedium),
    ("aura", 7, Severity::Medium),
    ("strange smell", 6, Severity::Medium),
    ("strange taste", 6, Severity::Medium),
    ("visual disturbance", 6, Severity::Medium),
    ("déjà vu", 5, Severity::Medium),
    ("anxiety", 4, Severity::LowMedium),
    ("fear", 5, Severity::Medium),
];

/// 各病情阶段的特征症状，按枚举顺序比较，平局取先出现者
///
/// confusion 同时计入发作前期和发作后期。
const CONDITION_PATTERNS: [(Condition, &[&str]); 4] = [
    (
        Condition::Seizure,
        &["seizure", "convulsion", "unconscious", "jerking", "collapse"],
    ),
    (
        Condition::Preictal,
        &[
            "aura",
            "confusion",
            "dizziness",
            "strange smell",
            "strange taste",
            "anxiety",
        ],
    ),
    (
        Condition::PostIctal,
        &["confusion", "fatigue", "memory loss", "weakness", "headache"],
    ),
    (Condition::Normal, &[]),
];

const HIGH_RECOMMENDATIONS: [&str; 5] = [
    "⚠️ URGENT: Seek immediate medical attention",
    "Call emergency services (911) if experiencing active seizure",
    "Do not leave the person alone",
    "Ensure safety - remove nearby hazards",
    "Time the seizure duration",
];

const MEDIUM_RECOMMENDATIONS: [&str; 5] = [
    "Consult a neurologist as soon as possible",
    "Monitor symptoms closely",
    "Avoid driving or operating machinery",
    "Stay in a safe environment",
    "Keep a symptom diary",
];

const LOW_RECOMMENDATIONS: [&str; 5] = [
    "Schedule an appointment with a neurologist",
    "Track your symptoms",
    "Maintain regular sleep schedule",
    "Avoid known triggers (stress, lack of sleep, alcohol)",
    "Consider keeping a seizure diary",
];

const MINIMAL_RECOMMENDATIONS: [&str; 3] = [
    "Continue monitoring your health",
    "Maintain healthy lifestyle habits",
    "Consult a doctor if symptoms worsen",
];

const PREICTAL_RECOMMENDATION: &str =
    "You may be experiencing pre-seizure warning signs - take precautions";

/// 症状分析器（无状态）
#[derive(Debug, Clone, Default)]
pub struct SymptomChecker;

impl SymptomChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, text: &str) -> SymptomReport {
        let text = text.trim().to_lowercase();

        let detected_symptoms = detect_symptoms(&text);
        let risk_score = risk_score(&detected_symptoms);
        let risk_level = risk_level(risk_score);
        let possible_condition = identify_condition(&detected_symptoms);
        let recommendations = recommendations(risk_level, possible_condition);
        let explanation = explanation(&detected_symptoms, risk_level, possible_condition);

        debug!(
            "Symptom analysis: {} findings, score {}, level {}",
            detected_symptoms.len(),
            risk_score,
            risk_level
        );

        SymptomReport {
            detected_symptoms,
            risk_score,
            risk_level,
            possible_condition,
            recommendations,
            urgency: Urgency::from(risk_level),
            explanation,
        }
    }
}

fn detect_symptoms(text: &str) -> Vec<SymptomFinding> {
    SYMPTOM_DICTIONARY
        .iter()
        .filter(|(keyword, _, _)| text.contains(keyword))
        .map(|(keyword, weight, severity)| SymptomFinding {
            symptom: keyword.to_string(),
            weight: *weight,
            severity: *severity,
        })
        .collect()
}

/// `min(100, 100 × Σ权重 / (10 × 命中数))`，保留两位小数
fn risk_score(findings: &[SymptomFinding]) -> f64 {
    if findings.is_empty() {
        return 0.0;
    }
    let total: u32 = findings.iter().map(|f| f.weight).sum();
    let max_possible = 10.0 * findings.len() as f64;
    let score = (total as f64 / max_possible * 100.0).min(100.0);
    (score * 100.0).round() / 100.0
}

fn risk_level(score: f64) -> RiskLevel {
    if score >= 70.0 {
        RiskLevel::High
    } else if score >= 40.0 {
        RiskLevel::Medium
    } else if score >= 20.0 {
        RiskLevel::Low
    } else {
        RiskLevel::Minimal
    }
}

fn identify_condition(findings: &[SymptomFinding]) -> Condition {
    if findings.is_empty() {
        return Condition::Normal;
    }

    let mut best = (Condition::Normal, 0);
    for (condition, keywords) in CONDITION_PATTERNS {
        let matches = keywords
            .iter()
            .filter(|k| findings.iter().any(|f| f.symptom == **k))
            .count();
        if matches > best.1 {
            best = (condition, matches);
        }
    }

    if best.1 > 0 {
        best.0
    } else if findings.iter().any(|f| f.severity == Severity::High) {
        Condition::Seizure
    } else {
        Condition::Preictal
    }
}

fn recommendations(level: RiskLevel, condition: Condition) -> Vec<String> {
    let base: &[&str] = match level {
        RiskLevel::High => &HIGH_RECOMMENDATIONS,
        RiskLevel::Medium => &MEDIUM_RECOMMENDATIONS,
        RiskLevel::Low => &LOW_RECOMMENDATIONS,
        RiskLevel::Minimal => &MINIMAL_RECOMMENDATIONS,
    };

    let mut recommendations: Vec<String> = base.iter().map(|r| r.to_string()).collect();
    if condition == Condition::Preictal {
        recommendations.push(PREICTAL_RECOMMENDATION.to_string());
    }
    recommendations
}

fn explanation(findings: &[SymptomFinding], level: RiskLevel, condition: Condition) -> String {
    if findings.is_empty() {
        return "No significant seizure-related symptoms detected. Continue monitoring your health."
            .to_string();
    }

    let names = findings
        .iter()
        .map(|f| f.symptom.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let condition = condition.as_str().to_lowercase();

    let assessment = match level {
        RiskLevel::High => format!(
            "you are showing signs of {} which requires immediate medical attention. ",
            condition
        ),
        RiskLevel::Medium => format!(
            "you may be experiencing {} symptoms. Medical consultation is recommended. ",
            condition
        ),
        _ => "you have mild symptoms that should be monitored. ".to_string(),
    };

    format!(
        "Based on your symptoms ({}), {}Risk level: {}. Please follow the recommendations provided.",
        names, assessment, level
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_seizure_and_confusion_is_high() {
        let report = SymptomChecker::new().analyze("I had a seizure and confusion afterwards");

        let names: Vec<&str> = report
            .detected_symptoms
            .iter()
            .map(|f| f.symptom.as_str())
            .collect();
        assert_eq!(names, vec!["seizure", "confusion"]);
        assert_eq!(report.risk_score, 85.0);
        assert_eq!(report.risk_level, RiskLevel::High);
        assert_eq!(report.possible_condition, Condition::Seizure);
        assert_eq!(report.urgency, Urgency::Immediate);
        assert_eq!(report.recommendations.len(), 5);
        assert_eq!(
            report.explanation,
            "Based on your symptoms (seizure, confusion), you are showing signs of seizure which requires immediate medical attention. Risk level: HIGH. Please follow the recommendations provided."
        );
    }

    #[test]
    fn test_no_symptoms() {
        let report = SymptomChecker::new().analyze("Just feeling a bit tired");
        assert!(report.detected_symptoms.is_empty());
        assert_eq!(report.risk_score, 0.0);
        assert_eq!(report.risk_level, RiskLevel::Minimal);
        assert_eq!(report.possible_condition, Condition::Normal);
        assert_eq!(report.urgency, Urgency::NonUrgent);
        assert_eq!(report.recommendations.len(), 3);
    }

    #[test]
    fn test_preictal_adds_warning() {
        let report = SymptomChecker::new().analyze("I noticed an AURA and a strange smell");
        assert_eq!(report.possible_condition, Condition::Preictal);
        assert_eq!(report.risk_score, 65.0);
        assert_eq!(report.risk_level, RiskLevel::Medium);
        assert_eq!(
            report.recommendations.last().map(String::as_str),
            Some(PREICTAL_RECOMMENDATION)
        );
    }

    #[test]
    fn test_confusion_counts_for_both_stages() {
        // confusion 计入两个阶段，平局取发作前期
        let report = SymptomChecker::new().analyze("confusion");
        assert_eq!(report.possible_condition, Condition::Preictal);

        let report = SymptomChecker::new().analyze("confusion and fatigue");
        assert_eq!(report.possible_condition, Condition::PostIctal);
    }

    #[rstest]
    #[case("stiffness", Condition::Seizure)]
    #[case("tremor", Condition::Preictal)]
    fn test_fallback_condition_uses_severity(#[case] text: &str, #[case] expected: Condition) {
        assert_eq!(SymptomChecker::new().analyze(text).possible_condition, expected);
    }

    #[rstest]
    #[case(70.0, RiskLevel::High)]
    #[case(69.99, RiskLevel::Medium)]
    #[case(40.0, RiskLevel::Medium)]
    #[case(20.0, RiskLevel::Low)]
    #[case(19.99, RiskLevel::Minimal)]
    fn test_risk_tiers(#[case] score: f64, #[case] expected: RiskLevel) {
        assert_eq!(risk_level(score), expected);
    }

    #[test]
    fn test_score_rounds_to_two_decimals() {
        // (10 + 6 + 4) / 30
        let report = SymptomChecker::new().analyze("seizure, dizziness, headache");
        assert_eq!(report.risk_score, 66.67);
    }

    #[test]
    fn test_each_keyword_matches_once() {
        let report = SymptomChecker::new().analyze("seizure seizure seizure");
        assert_eq!(report.detected_symptoms.len(), 1);
    }
}
