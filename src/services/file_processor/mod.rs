//! 文件处理服务
//!
//! 按扩展名分派到 CSV / PDF / 图片 / EDF 处理器，输出统一的特征向量。
//! 单个文件处理失败只影响该文件。

pub mod edf;
pub mod features;
pub mod imaging;
pub mod pdf;
pub mod tabular;

use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::processed_file::{FileKind, ProcessedFile};

pub use self::imaging::{MockOcrEngine, OcrEngine, TesseractCli};

/// 文件处理服务 trait
#[async_trait]
pub trait FileProcessingService: Send + Sync {
    /// 处理磁盘上的文件，类型由 `file_name` 的扩展名决定
    async fn process_file(&self, path: &Path, file_name: &str) -> Result<ProcessedFile>;

    /// 处理上传内容：写入临时文件后处理，临时文件在返回前删除
    async fn process_upload(&self, file_name: &str, content: &[u8]) -> Result<ProcessedFile>;
}

pub struct FileProcessor {
    ocr: Arc<dyn OcrEngine>,
    /// 上传临时文件目录，默认为系统临时目录
    temp_dir: Option<PathBuf>,
}

impl FileProcessor {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self { ocr, temp_dir: None }
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// 校验扩展名
    pub fn detect_kind(file_name: &str) -> Result<FileKind> {
        FileKind::from_file_name(file_name).ok_or_else(|| AppError::UnsupportedFormat {
            extension: Path::new(file_name)
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_string(),
            supported: FileKind::SUPPORTED_EXTENSIONS.join(", "),
        })
    }
}

/// 在阻塞线程池中运行同步解析
async fn run_blocking<F>(path: &Path, f: F) -> Result<ProcessedFile>
where
    F: FnOnce(&Path) -> Result<ProcessedFile> + Send + 'static,
{
    let owned: PathBuf = path.to_path_buf();
    tokio::task::spawn_blocking(move || f(&owned))
        .await
        .map_err(|e| AppError::Internal(format!("file processing task failed: {}", e)))?
}

#[async_trait]
impl FileProcessingService for FileProcessor {
    async fn process_file(&self, path: &Path, file_name: &str) -> Result<ProcessedFile> {
        let kind = Self::detect_kind(file_name)?;
        info!("Processing {} file: {}", kind.as_str().to_uppercase(), file_name);

        match kind {
            FileKind::Csv => run_blocking(path, tabular::process_csv).await,
            FileKind::Pdf => run_blocking(path, pdf::process_pdf).await,
            FileKind::Edf => run_blocking(path, edf::process_edf).await,
            FileKind::Image => imaging::process_image(path, self.ocr.as_ref()).await,
        }
    }

    async fn process_upload(&self, file_name: &str, content: &[u8]) -> Result<ProcessedFile> {
        let kind = Self::detect_kind(file_name)?;
        let suffix = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();

        // NamedTempFile 在 drop 时删除
        let mut builder = tempfile::Builder::new();
        builder.prefix("upload-").suffix(&suffix);
        let mut temp = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        temp.write_all(content)?;
        temp.flush()?;

        let result = self.process_file(temp.path(), file_name).await;
        if let Err(e) = &result {
            tracing::warn!("Failed to process {} upload '{}': {}", kind, file_name, e);
        }
        result
    }
}

pub fn create_file_processor(ocr: Arc<dyn OcrEngine>) -> Arc<dyn FileProcessingService> {
    Arc::new(FileProcessor::new(ocr))
}
