use serde::{Deserialize, Serialize};

/// 医生目录条目
///
/// 启动时加载，进程生命周期内只读。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderRecord {
    pub name: String,
    pub specialization: String,
    pub hospital: String,
    pub location: String,
    pub phone: String,
    pub experience_years: u32,
    /// 评分（0.0-5.0）
    pub rating: f64,
    pub accepts_emergency: bool,
}

impl ProviderRecord {
    pub fn new(
        name: &str,
        specialization: &str,
        hospital: &str,
        location: &str,
        phone: &str,
        experience_years: u32,
        rating: f64,
        accepts_emergency: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            specialization: specialization.to_string(),
            hospital: hospital.to_string(),
            location: location.to_string(),
            phone: phone.to_string(),
            experience_years,
            rating,
            accepts_emergency,
        }
    }

    /// 渲染为纯文本
    pub fn to_text(&self) -> String {
        let emergency = if self.accepts_emergency {
            "✓ Available"
        } else {
            "✗ Not Available"
        };
        format!(
            "**{}**\nSpecialization: {}\nHospital: {}\nLocation: {}\nPhone: {}\nExperience: {} years\nRating: {:?}/5.0\nEmergency Care: {}",
            self.name,
            self.specialization,
            self.hospital,
            self.location,
            self.phone,
            self.experience_years,
            self.rating,
            emergency
        )
    }
}

/// 医生推荐查询
#[derive(Debug, Clone, Default)]
pub struct ProviderQuery {
    pub location: Option<String>,
    pub specialization: Option<String>,
    pub emergency: bool,
    pub risk_level: Option<crate::models::classification::RiskLevel>,
    pub limit: usize,
}

impl ProviderQuery {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_keeps_one_decimal_rating() {
        let record = ProviderRecord::new(
            "Dr. Test",
            "Neurology",
            "General",
            "Austin, TX",
            "555-0100",
            12,
            5.0,
            false,
        );
        let text = record.to_text();
        assert!(text.contains("Rating: 5.0/5.0"));
        assert!(text.contains("Emergency Care: ✗ Not Available"));

        let record = ProviderRecord { rating: 4.8, ..record };
        assert!(record.to_text().contains("Rating: 4.8/5.0"));
    }
}
