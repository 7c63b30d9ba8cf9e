//! 医生目录存储
//!
//! 目录在启动时加载一次：配置了 CSV 文件且文件存在时从文件读取，
//! 否则使用内置的十条样本数据。

use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::models::provider::ProviderRecord;

/// CSV 行，`accepts_emergency` 兼容 `True`/`false`/`1`/`0`
#[derive(Debug, Deserialize)]
struct ProviderRow {
    name: String,
    specialization: String,
    hospital: String,
    location: String,
    phone: String,
    experience_years: u32,
    rating: f64,
    accepts_emergency: String,
}

impl TryFrom<ProviderRow> for ProviderRecord {
    type Error = AppError;

    fn try_from(row: ProviderRow) -> Result<Self> {
        let accepts_emergency = parse_flag(&row.accepts_emergency).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "provider '{}': invalid accepts_emergency value '{}'",
                row.name, row.accepts_emergency
            ))
        })?;
        if !(0.0..=5.0).contains(&row.rating) {
            return Err(AppError::InvalidInput(format!(
                "provider '{}': rating {} out of range 0.0-5.0",
                row.name, row.rating
            )));
        }

        Ok(ProviderRecord {
            name: row.name,
            specialization: row.specialization,
            hospital: row.hospital,
            location: row.location,
            phone: row.phone,
            experience_years: row.experience_years,
            rating: row.rating,
            accepts_emergency,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// 只读医生目录
#[derive(Debug, Clone)]
pub struct ProviderStore {
    records: Vec<ProviderRecord>,
}

impl ProviderStore {
    pub fn new(records: Vec<ProviderRecord>) -> Self {
        Self { records }
    }

    /// 内置样本目录
    pub fn seed() -> Self {
        Self::new(seed_records())
    }

    /// 按配置加载；文件不存在时退回样本目录，文件格式错误则报错
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => {
                let file = std::fs::File::open(path)?;
                let store = Self::from_reader(file)?;
                info!(
                    "Loaded {} providers from {}",
                    store.records.len(),
                    path.display()
                );
                Ok(store)
            }
            Some(path) => {
                warn!(
                    "Provider file {} not found, using sample provider directory",
                    path.display()
                );
                Ok(Self::seed())
            }
            None => {
                info!("Using sample provider directory");
                Ok(Self::seed())
            }
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let records = csv_reader
            .deserialize::<ProviderRow>()
            .map(|row| ProviderRecord::try_from(row?))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[ProviderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn seed_records() -> Vec<ProviderRecord> {
    vec![
        ProviderRecord::new(
            "Dr. Sarah Johnson",
            "Epilepsy & Seizure Disorders",
            "City Medical Center",
            "New York, NY",
            "(555) 123-4567",
            15,
            4.8,
            true,
        ),
        ProviderRecord::new(
            "Dr. Michael Chen",
            "Pediatric Neurology",
            "Children's Hospital",
            "Los Angeles, CA",
            "(555) 234-5678",
            12,
            4.9,
            true,
        ),
        ProviderRecord::new(
            "Dr. Emily Rodriguez",
            "Epilepsy Surgery",
            "University Medical Center",
            "Chicago, IL",
            "(555) 345-6789",
            18,
            4.7,
            false,
        ),
        ProviderRecord::new(
            "Dr. James Wilson",
            "General Neurology",
            "Metro Health Hospital",
            "Houston, TX",
            "(555) 456-7890",
            10,
            4.6,
            true,
        ),
        ProviderRecord::new(
            "Dr. Lisa Anderson",
            "Epilepsy & EEG",
            "Regional Medical Center",
            "Phoenix, AZ",
            "(555) 567-8901",
            14,
            4.8,
            true,
        ),
        ProviderRecord::new(
            "Dr. Robert Taylor",
            "Neurophysiology",
            "St. Mary's Hospital",
            "Philadelphia, PA",
            "(555) 678-9012",
            20,
            4.9,
            false,
        ),
        ProviderRecord::new(
            "Dr. Maria Garcia",
            "Pediatric Epilepsy",
            "Children's Specialty Center",
            "San Antonio, TX",
            "(555) 789-0123",
            11,
            4.7,
            true,
        ),
        ProviderRecord::new(
            "Dr. David Kim",
            "Epilepsy & Sleep Disorders",
            "Advanced Neurology Clinic",
            "San Diego, CA",
            "(555) 890-1234",
            13,
            4.8,
            false,
        ),
        ProviderRecord::new(
            "Dr. Jennifer Brown",
            "General Neurology",
            "Community Hospital",
            "Dallas, TX",
            "(555) 901-2345",
            9,
            4.5,
            true,
        ),
        ProviderRecord::new(
            "Dr. Christopher Lee",
            "Epilepsy & Neurostimulation",
            "Brain & Spine Institute",
            "San Jose, CA",
            "(555) 012-3456",
            16,
            4.9,
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str =
        "name,specialization,hospital,location,phone,experience_years,rating,accepts_emergency\n";

    #[test]
    fn test_seed_directory_has_ten_records() {
        let store = ProviderStore::seed();
        assert_eq!(store.len(), 10);
        assert_eq!(store.records()[0].name, "Dr. Sarah Johnson");
        assert_eq!(
            store.records().iter().filter(|r| r.accepts_emergency).count(),
            6
        );
    }

    #[test]
    fn test_load_from_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}Dr. A,Neurology,General,Boston, MA,(555) 000-0000,7,4.2,True\n",
            HEADER
        )
        .unwrap();

        // 带逗号的字段需要引号，上面这行列数不对
        assert!(ProviderStore::load(Some(file.path())).is_err());

        let csv = format!(
            "{}Dr. A,Neurology,General,\"Boston, MA\",(555) 000-0000,7,4.2,True\n",
            HEADER
        );
        let store = ProviderStore::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].location, "Boston, MA");
        assert!(store.records()[0].accepts_emergency);
    }

    #[test]
    fn test_missing_file_falls_back_to_seed() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProviderStore::load(Some(&dir.path().join("missing.csv"))).unwrap();
        assert_eq!(store.len(), 10);
    }

    #[test]
    fn test_invalid_flag_is_rejected() {
        let csv = format!("{}Dr. A,Neurology,General,Boston,555,7,4.2,maybe\n", HEADER);
        assert!(matches!(
            ProviderStore::from_reader(csv.as_bytes()),
            Err(AppError::InvalidInput(_))
        ));
    }
}
