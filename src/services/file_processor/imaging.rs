//! 图片处理：尺寸读取 + OCR

use async_trait::async_trait;
use image::GenericImageView;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::config::ExtractionConfig;
use crate::error::{AppError, Result};
use crate::models::processed_file::{FileDetails, FileKind, ProcessedFile};

use super::features::text_features;

/// OCR 引擎抽象
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image_path: &Path) -> Result<String>;
}

/// 调用 tesseract 命令行
pub struct TesseractCli {
    binary: PathBuf,
    language: String,
}

impl TesseractCli {
    pub fn new(binary: impl Into<PathBuf>, language: &str) -> Self {
        Self {
            binary: binary.into(),
            language: language.to_string(),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.tesseract_path.clone(), &config.ocr_language)
    }
}

#[async_trait]
impl OcrEngine for TesseractCli {
    async fn recognize(&self, image_path: &Path) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .await
            .map_err(|e| {
                warn!("Failed to launch {}: {}", self.binary.display(), e);
                AppError::Extraction(format!("OCR engine unavailable: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Extraction(format!(
                "OCR failed ({}): {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// 返回固定文本的 OCR 引擎
pub struct MockOcrEngine {
    pub text: String,
}

impl MockOcrEngine {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[async_trait]
impl OcrEngine for MockOcrEngine {
    async fn recognize(&self, _image_path: &Path) -> Result<String> {
        Ok(self.text.clone())
    }
}

/// 解码图片，返回 (高, 宽, 通道数)
pub fn image_shape(path: &Path) -> Result<(u32, u32, u8)> {
    let img = image::open(path)
        .map_err(|e| AppError::Extraction(format!("Failed to decode image: {}", e)))?;
    let (width, height) = img.dimensions();
    Ok((height, width, img.color().channel_count()))
}

pub async fn process_image(path: &Path, ocr: &dyn OcrEngine) -> Result<ProcessedFile> {
    let owned = path.to_path_buf();
    let shape = tokio::task::spawn_blocking(move || image_shape(&owned))
        .await
        .map_err(|e| AppError::Internal(format!("image task failed: {}", e)))??;

    let text = ocr.recognize(path).await?;
    debug!("Image OCR extracted: {} characters", text.chars().count());

    let features = text_features(&text)?;
    Ok(ProcessedFile::new(
        FileKind::Image,
        features,
        "Successfully processed image and extracted text".to_string(),
        FileDetails::Image {
            text,
            image_shape: shape,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(dir: &Path) -> PathBuf {
        let path = dir.join("scan.png");
        let img = image::RgbImage::from_pixel(32, 16, image::Rgb([200u8, 200, 200]));
        img.save(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn test_process_image_with_mock_ocr() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path());

        let ocr = MockOcrEngine::new("Spike amplitude 120.5 uV, 3 events");
        let processed = process_image(&path, &ocr).await.unwrap();

        assert_eq!(processed.file_type, FileKind::Image);
        assert_eq!(processed.features.get("text_count"), Some(2.0));
        match processed.details {
            FileDetails::Image { image_shape, .. } => assert_eq!(image_shape, (16, 32, 3)),
            other => panic!("unexpected details: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"garbage").unwrap();

        let result = process_image(&path, &MockOcrEngine::new("1")).await;
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }

    #[tokio::test]
    async fn test_missing_tesseract_binary() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path());

        let ocr = TesseractCli::new("/nonexistent/tesseract", "eng");
        assert!(matches!(
            ocr.recognize(&path).await,
            Err(AppError::Extraction(_))
        ));
    }
}
