//! EDF（European Data Format）解析
//!
//! 布局：256 字节固定头 + 每个信号 256 字节头（按字段分块存放），
//! 之后是数据记录，每条记录依次存放各信号的 16 位小端整数采样。

use std::path::Path;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::models::processed_file::{FileDetails, FileKind, ProcessedFile};

use super::features::signal_features;

const FIXED_HEADER_LEN: usize = 256;
const SIGNAL_HEADER_LEN: usize = 256;
const ANNOTATION_LABEL: &str = "EDF Annotations";

/// 单个数据通道（已换算为物理量，电压类单位统一为伏特）
#[derive(Debug, Clone)]
pub struct EdfChannel {
    pub label: String,
    pub dimension: String,
    pub samples: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct EdfRecording {
    pub channels: Vec<EdfChannel>,
    /// 第一个数据通道的采样率（Hz）
    pub sampling_rate: f64,
    pub duration_seconds: f64,
}

impl EdfRecording {
    pub fn channel_names(&self) -> Vec<String> {
        self.channels.iter().map(|c| c.label.clone()).collect()
    }
}

#[derive(Debug)]
struct SignalHeader {
    label: String,
    dimension: String,
    physical_min: f64,
    physical_max: f64,
    digital_min: f64,
    digital_max: f64,
    samples_per_record: usize,
}

impl SignalHeader {
    fn is_annotation(&self) -> bool {
        self.label == ANNOTATION_LABEL
    }

    fn to_physical(&self, digital: i16) -> f64 {
        let gain = (self.physical_max - self.physical_min) / (self.digital_max - self.digital_min);
        let value = (digital as f64 - self.digital_min) * gain + self.physical_min;
        value * unit_scale(&self.dimension)
    }
}

fn unit_scale(dimension: &str) -> f64 {
    match dimension {
        "uV" | "µV" => 1e-6,
        "mV" => 1e-3,
        _ => 1.0,
    }
}

fn invalid(message: impl Into<String>) -> AppError {
    AppError::Extraction(format!("Invalid EDF file: {}", message.into()))
}

fn text_field(bytes: &[u8], start: usize, len: usize) -> Result<String> {
    let raw = bytes
        .get(start..start + len)
        .ok_or_else(|| invalid("header is truncated"))?;
    Ok(String::from_utf8_lossy(raw).trim().to_string())
}

fn number_field<T: std::str::FromStr>(bytes: &[u8], start: usize, len: usize, name: &str) -> Result<T> {
    let text = text_field(bytes, start, len)?;
    text.parse()
        .map_err(|_| invalid(format!("field '{}' is not a number: '{}'", name, text)))
}

/// 解析 EDF 字节流
pub fn parse_edf(bytes: &[u8]) -> Result<EdfRecording> {
    if bytes.len() < FIXED_HEADER_LEN {
        return Err(invalid("file is shorter than the fixed header"));
    }

    let header_len: usize = number_field(bytes, 184, 8, "header bytes")?;
    let declared_records: i64 = number_field(bytes, 236, 8, "number of records")?;
    let record_duration: f64 = number_field(bytes, 244, 8, "record duration")?;
    let signal_count: usize = number_field(bytes, 252, 4, "number of signals")?;

    if signal_count == 0 {
        return Err(invalid("no signals declared"));
    }
    if header_len != FIXED_HEADER_LEN + signal_count * SIGNAL_HEADER_LEN {
        return Err(invalid(format!(
            "header size {} does not match {} signals",
            header_len, signal_count
        )));
    }

    let signals = parse_signal_headers(bytes, signal_count)?;
    let record_samples: usize = signals.iter().map(|s| s.samples_per_record).sum();
    let record_bytes = record_samples * 2;
    if record_bytes == 0 {
        return Err(invalid("records contain no samples"));
    }

    let data = bytes.get(header_len..).unwrap_or(&[]);
    let available = data.len() / record_bytes;
    let record_count = if declared_records < 0 {
        // -1 表示录制未正常结束，按文件大小推算
        available
    } else {
        let declared = declared_records as usize;
        if declared > available {
            return Err(invalid(format!(
                "declares {} records but only {} are present",
                declared, available
            )));
        }
        declared
    };

    let mut channels: Vec<(usize, EdfChannel)> = signals
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_annotation())
        .map(|(i, s)| {
            (
                i,
                EdfChannel {
                    label: s.label.clone(),
                    dimension: s.dimension.clone(),
                    samples: Vec::with_capacity(s.samples_per_record * record_count),
                },
            )
        })
        .collect();

    for record in 0..record_count {
        let mut offset = record * record_bytes;
        let mut next_channel = 0;
        for (index, signal) in signals.iter().enumerate() {
            let len = signal.samples_per_record * 2;
            let is_data = channels
                .get(next_channel)
                .is_some_and(|(i, _)| *i == index);
            if is_data {
                let channel = &mut channels[next_channel].1;
                channel.samples.extend(
                    data[offset..offset + len]
                        .chunks_exact(2)
                        .map(|pair| signal.to_physical(i16::from_le_bytes([pair[0], pair[1]]))),
                );
                next_channel += 1;
            }
            offset += len;
        }
    }

    let first_data = signals
        .iter()
        .find(|s| !s.is_annotation())
        .ok_or_else(|| invalid("no data channels"))?;
    let sampling_rate = if record_duration > 0.0 {
        first_data.samples_per_record as f64 / record_duration
    } else {
        0.0
    };

    Ok(EdfRecording {
        channels: channels.into_iter().map(|(_, c)| c).collect(),
        sampling_rate,
        duration_seconds: record_count as f64 * record_duration,
    })
}

/// 信号头按字段分块：先是所有信号的 label，再是所有信号的 transducer，依此类推
fn parse_signal_headers(bytes: &[u8], ns: usize) -> Result<Vec<SignalHeader>> {
    let base = FIXED_HEADER_LEN;
    let offset = |field_start: usize, width: usize, i: usize| base + field_start * ns + i * width;

    (0..ns)
        .map(|i| {
            let signal = SignalHeader {
                label: text_field(bytes, offset(0, 16, i), 16)?,
                dimension: text_field(bytes, offset(96, 8, i), 8)?,
                physical_min: number_field(bytes, offset(104, 8, i), 8, "physical minimum")?,
                physical_max: number_field(bytes, offset(112, 8, i), 8, "physical maximum")?,
                digital_min: number_field(bytes, offset(120, 8, i), 8, "digital minimum")?,
                digital_max: number_field(bytes, offset(128, 8, i), 8, "digital maximum")?,
                samples_per_record: number_field(
                    bytes,
                    offset(216, 8, i),
                    8,
                    "samples per record",
                )?,
            };
            if !signal.is_annotation() && signal.digital_max <= signal.digital_min {
                return Err(invalid(format!(
                    "signal '{}' has an empty digital range",
                    signal.label
                )));
            }
            Ok(signal)
        })
        .collect()
}

pub fn process_edf(path: &Path) -> Result<ProcessedFile> {
    let bytes = std::fs::read(path)?;
    let recording = parse_edf(&bytes)?;
    if recording.channels.len() > super::features::MAX_SIGNAL_CHANNELS {
        warn!(
            "EDF has {} channels, only the first {} are used",
            recording.channels.len(),
            super::features::MAX_SIGNAL_CHANNELS
        );
    }
    debug!(
        "EDF loaded: {} channels at {} Hz",
        recording.channels.len(),
        recording.sampling_rate
    );

    let samples: Vec<Vec<f64>> = recording
        .channels
        .iter()
        .map(|c| c.samples.clone())
        .collect();
    let features = signal_features(&samples);
    let channels = recording.channel_names();

    Ok(ProcessedFile::new(
        FileKind::Edf,
        features,
        format!("Successfully processed EDF with {} channels", channels.len()),
        FileDetails::Signal {
            channels,
            sampling_rate: recording.sampling_rate,
            duration_seconds: recording.duration_seconds,
        },
    ))
}


#[cfg(test)]
mod tests {
    use super::test_support::build_edf;
    use super::*;

    #[test]
    fn test_parse_converts_microvolts() {
        let bytes = build_edf(
            &[
                ("Fp1", "uV", vec![10, -10, 50, 0]),
                ("EDF Annotations", "", vec![0, 0]),
                ("Fp2", "mV", vec![1, 2, 3, 4]),
            ],
            2,
            2,
            1.0,
        );
        let recording = parse_edf(&bytes).unwrap();

        assert_eq!(recording.channel_names(), vec!["Fp1", "Fp2"]);
        assert_eq!(recording.sampling_rate, 4.0);
        assert_eq!(recording.duration_seconds, 2.0);

        let fp1 = &recording.channels[0].samples;
        assert_eq!(fp1.len(), 8);
        assert!((fp1[0] - 10e-6).abs() < 1e-15);
        assert!((fp1[1] + 10e-6).abs() < 1e-15);
        assert!((recording.channels[1].samples[3] - 4e-3).abs() < 1e-15);
    }

    #[test]
    fn test_unknown_record_count_uses_file_size() {
        let bytes = build_edf(&[("C3", "uV", vec![1, 2])], 3, -1, 0.5);
        let recording = parse_edf(&bytes).unwrap();
        assert_eq!(recording.channels[0].samples.len(), 6);
        assert_eq!(recording.sampling_rate, 4.0);
        assert_eq!(recording.duration_seconds, 1.5);
    }

    #[test]
    fn test_truncated_data_is_rejected() {
        let bytes = build_edf(&[("C3", "uV", vec![1, 2])], 1, 5, 1.0);
        assert!(matches!(parse_edf(&bytes), Err(AppError::Extraction(_))));
        assert!(parse_edf(&bytes[..100]).is_err());
    }

    #[test]
    fn test_process_edf_features() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rec.edf");
        let signals: Vec<(&str, &str, Vec<i16>)> = (0..10)
            .map(|_| ("EEG", "V", vec![1, -1]))
            .collect();
        std::fs::write(&path, build_edf(&signals, 1, 1, 1.0)).unwrap();

        let processed = process_edf(&path).unwrap();
        assert_eq!(processed.message, "Successfully processed EDF with 10 channels");
        assert_eq!(processed.features.len(), 40);
        assert_eq!(processed.features.get("ch0_energy"), Some(2.0));
    }
}
