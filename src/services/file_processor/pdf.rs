//! PDF 文本提取

use std::path::Path;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::models::processed_file::{FileDetails, FileKind, ProcessedFile};

use super::features::text_features;

pub fn extract_pdf_text(path: &Path) -> Result<String> {
    pdf_extract::extract_text(path).map_err(|e| {
        warn!("PDF extraction failed: {}", e);
        AppError::Extraction(format!("Failed to extract PDF text: {}", e))
    })
}

pub fn process_pdf(path: &Path) -> Result<ProcessedFile> {
    let text = extract_pdf_text(path)?;
    let chars = text.chars().count();
    debug!("PDF text extracted: {} characters", chars);

    let features = text_features(&text)?;
    Ok(ProcessedFile::new(
        FileKind::Pdf,
        features,
        format!("Successfully extracted text from PDF ({} chars)", chars),
        FileDetails::Text { text },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pdf_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf").unwrap();

        assert!(matches!(process_pdf(&path), Err(AppError::Extraction(_))));
    }
}
