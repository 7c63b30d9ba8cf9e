//! 医生推荐服务
//!
//! 对只读目录做过滤和排序，不修改目录本身。

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::models::classification::RiskLevel;
use crate::models::provider::{ProviderQuery, ProviderRecord};
use crate::storage::provider_store::ProviderStore;

/// 急诊联系人数量
pub const EMERGENCY_CONTACT_LIMIT: usize = 3;

pub struct ProviderDirectory {
    store: Arc<ProviderStore>,
}

impl ProviderDirectory {
    pub fn new(store: Arc<ProviderStore>) -> Self {
        Self { store }
    }

    /// 推荐医生
    ///
    /// `emergency` 或高风险时只保留接诊急诊的医生；地点、专科做大小写不敏感的子串过滤；
    /// 按评分、从业年限降序。
    pub fn recommend(&self, query: &ProviderQuery) -> Vec<ProviderRecord> {
        let emergency_only = query.emergency || query.risk_level == Some(RiskLevel::High);
        let location = normalized(query.location.as_deref());
        let specialization = normalized(query.specialization.as_deref());

        let mut matches: Vec<ProviderRecord> = self
            .store
            .records()
            .iter()
            .filter(|r| !emergency_only || r.accepts_emergency)
            .filter(|r| location.as_ref().is_none_or(|l| contains_ci(&r.location, l)))
            .filter(|r| {
                specialization
                    .as_ref()
                    .is_none_or(|s| contains_ci(&r.specialization, s))
            })
            .cloned()
            .collect();

        matches.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
                .then(b.experience_years.cmp(&a.experience_years))
        });
        matches.truncate(query.limit);
        matches
    }

    pub fn emergency_contacts(&self) -> Vec<ProviderRecord> {
        let query = ProviderQuery {
            emergency: true,
            ..ProviderQuery::new(EMERGENCY_CONTACT_LIMIT)
        };
        self.recommend(&query)
    }

    /// 按姓名搜索，保持目录顺序
    pub fn search_by_name(&self, name: &str) -> Vec<ProviderRecord> {
        let needle = name.to_lowercase();
        self.store
            .records()
            .iter()
            .filter(|r| contains_ci(&r.name, &needle))
            .cloned()
            .collect()
    }

    pub fn locations(&self) -> Vec<String> {
        unique_sorted(self.store.records().iter().map(|r| r.location.as_str()))
    }

    pub fn specializations(&self) -> Vec<String> {
        unique_sorted(self.store.records().iter().map(|r| r.specialization.as_str()))
    }
}

/// 多条推荐渲染为纯文本
pub fn recommendations_text(records: &[ProviderRecord]) -> String {
    if records.is_empty() {
        return "No doctors found matching your criteria.".to_string();
    }

    let mut text = format!(
        "**Found {} Recommended Neurologist(s):**\n\n",
        records.len()
    );
    for (i, record) in records.iter().enumerate() {
        text.push_str(&format!("{}. {}\n\n", i + 1, record.to_text()));
    }
    text
}

/// 空串视为未指定
fn normalized(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

fn contains_ci(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

fn unique_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn create_provider_directory(store: Arc<ProviderStore>) -> Arc<ProviderDirectory> {
    Arc::new(ProviderDirectory::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> ProviderDirectory {
        ProviderDirectory::new(Arc::new(ProviderStore::seed()))
    }

    fn names(records: &[ProviderRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_emergency_in_california() {
        let query = ProviderQuery {
            location: Some("CA".into()),
            emergency: true,
            ..ProviderQuery::new(5)
        };
        let results = directory().recommend(&query);
        assert_eq!(names(&results), vec!["Dr. Michael Chen"]);
    }

    #[test]
    fn test_california_sorted_by_rating_then_experience() {
        let query = ProviderQuery {
            location: Some("ca".into()),
            ..ProviderQuery::new(5)
        };
        let results = directory().recommend(&query);
        // 子串匹配，Chicago 也包含 "ca"
        assert_eq!(
            names(&results),
            vec![
                "Dr. Christopher Lee",
                "Dr. Michael Chen",
                "Dr. David Kim",
                "Dr. Emily Rodriguez"
            ]
        );
    }

    #[test]
    fn test_high_risk_implies_emergency() {
        let query = ProviderQuery {
            risk_level: Some(RiskLevel::High),
            ..ProviderQuery::new(10)
        };
        let results = directory().recommend(&query);
        assert_eq!(results.len(), 6);
        assert!(results.iter().all(|r| r.accepts_emergency));
    }

    #[test]
    fn test_emergency_contacts() {
        let results = directory().emergency_contacts();
        assert_eq!(
            names(&results),
            vec!["Dr. Michael Chen", "Dr. Sarah Johnson", "Dr. Lisa Anderson"]
        );
    }

    #[test]
    fn test_specialization_filter_and_empty_result() {
        let query = ProviderQuery {
            specialization: Some("pediatric".into()),
            ..ProviderQuery::new(5)
        };
        assert_eq!(directory().recommend(&query).len(), 2);

        let query = ProviderQuery {
            location: Some("Alaska".into()),
            ..ProviderQuery::new(5)
        };
        assert!(directory().recommend(&query).is_empty());
    }

    #[test]
    fn test_search_locations_specializations() {
        let directory = directory();
        assert_eq!(
            names(&directory.search_by_name("dr. j")),
            vec!["Dr. James Wilson", "Dr. Jennifer Brown"]
        );
        assert_eq!(directory.locations().len(), 10);
        assert_eq!(directory.locations()[0], "Chicago, IL");
        assert_eq!(directory.specializations().len(), 9);
    }

    #[test]
    fn test_recommendations_text() {
        assert_eq!(
            recommendations_text(&[]),
            "No doctors found matching your criteria."
        );

        let text = recommendations_text(&directory().emergency_contacts());
        assert!(text.starts_with("**Found 3 Recommended Neurologist(s):**\n\n1. **Dr. Michael Chen**"));
        assert!(text.contains("Emergency Care: ✓ Available"));
    }
}
