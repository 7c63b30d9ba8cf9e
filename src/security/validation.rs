//! Request Validation Module
//!
//! Input checks for free-text fields, query limits and uploads.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;

/// Longest accepted symptom description or chat message, in characters
pub const MAX_TEXT_LENGTH: usize = 10_000;
/// Upper bound for `top_n`
pub const MAX_TOP_N: usize = 100;

/// Validation error types
#[derive(Debug, Error, Clone, Serialize, Deserialize, PartialEq)]
pub enum ValidationError {
    /// Carries the user-facing message verbatim
    #[error("{message}")]
    Empty { field: String, message: String },

    #[error("Field '{field}' is too long (max: {max}, got: {got})")]
    TooLong {
        field: String,
        max: usize,
        got: usize,
    },

    #[error("Field '{field}' must be between {min} and {max}, got {got}")]
    OutOfRange {
        field: String,
        min: usize,
        max: usize,
        got: usize,
    },

    #[error("No file provided")]
    MissingFile,

    #[error("No file selected")]
    EmptyFileName,
}

impl ValidationError {
    pub fn field(&self) -> &str {
        match self {
            Self::Empty { field, .. } => field.as_str(),
            Self::TooLong { field, .. } => field.as_str(),
            Self::OutOfRange { field, .. } => field.as_str(),
            Self::MissingFile | Self::EmptyFileName => "file",
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::InvalidInput(e.to_string())
    }
}

/// Validation result type
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Request validator implementation
#[derive(Debug, Clone)]
pub struct RequestValidator {
    /// Maximum allowed text length
    max_text_length: usize,
    /// Maximum `top_n`
    max_top_n: usize,
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestValidator {
    /// Create new validator
    pub fn new() -> Self {
        Self {
            max_text_length: MAX_TEXT_LENGTH,
            max_top_n: MAX_TOP_N,
        }
    }

    /// Set maximum text length
    pub fn with_max_text_length(mut self, length: usize) -> Self {
        self.max_text_length = length;
        self
    }

    /// Trim, reject empty input, enforce the length limit. Returns the trimmed text.
    fn validate_text<'a>(
        &self,
        field: &str,
        value: Option<&'a str>,
        empty_message: &str,
    ) -> ValidationResult<&'a str> {
        let trimmed = value.map(str::trim).unwrap_or("");
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: field.to_string(),
                message: empty_message.to_string(),
            });
        }

        let length = trimmed.chars().count();
        if length > self.max_text_length {
            return Err(ValidationError::TooLong {
                field: field.to_string(),
                max: self.max_text_length,
                got: length,
            });
        }

        Ok(trimmed)
    }

    /// Validate symptom description
    pub fn validate_symptoms<'a>(&self, value: Option<&'a str>) -> ValidationResult<&'a str> {
        self.validate_text("symptoms", value, "No symptoms provided")
    }

    /// Validate chat message
    pub fn validate_message<'a>(&self, value: Option<&'a str>) -> ValidationResult<&'a str> {
        self.validate_text("message", value, "No message provided")
    }

    /// Validate result limit
    pub fn validate_top_n(&self, top_n: usize) -> ValidationResult<usize> {
        if top_n == 0 || top_n > self.max_top_n {
            return Err(ValidationError::OutOfRange {
                field: "top_n".to_string(),
                min: 1,
                max: self.max_top_n,
                got: top_n,
            });
        }
        Ok(top_n)
    }

    /// Validate uploaded file name
    pub fn validate_file_name<'a>(&self, file_name: Option<&'a str>) -> ValidationResult<&'a str> {
        let name = file_name.ok_or(ValidationError::MissingFile)?;
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyFileName);
        }
        Ok(name)
    }

    /// Remove control characters except whitespace
    pub fn sanitize_string(input: &str) -> String {
        input
            .trim()
            .chars()
            .filter(|c| !c.is_control() || c.is_whitespace())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_symptoms() {
        let validator = RequestValidator::new();
        let err = validator.validate_symptoms(Some("   ")).unwrap_err();
        assert_eq!(err.to_string(), "No symptoms provided");
        assert_eq!(err.field(), "symptoms");
        assert!(validator.validate_symptoms(None).is_err());
    }

    #[test]
    fn test_message_is_trimmed() {
        let validator = RequestValidator::new();
        assert_eq!(validator.validate_message(Some("  hi \n")), Ok("hi"));
        assert_eq!(
            validator.validate_message(Some("")).unwrap_err().to_string(),
            "No message provided"
        );
    }

    #[test]
    fn test_length_limit_counts_chars() {
        let validator = RequestValidator::new().with_max_text_length(3);
        assert!(validator.validate_message(Some("déj")).is_ok());
        assert!(matches!(
            validator.validate_message(Some("déjà")),
            Err(ValidationError::TooLong { max: 3, got: 4, .. })
        ));
    }

    #[test]
    fn test_top_n_range() {
        let validator = RequestValidator::new();
        assert_eq!(validator.validate_top_n(1), Ok(1));
        assert_eq!(validator.validate_top_n(100), Ok(100));
        assert!(validator.validate_top_n(0).is_err());
        assert!(validator.validate_top_n(101).is_err());
    }

    #[test]
    fn test_file_name() {
        let validator = RequestValidator::new();
        assert_eq!(validator.validate_file_name(Some("eeg.csv")), Ok("eeg.csv"));
        assert_eq!(
            validator.validate_file_name(None),
            Err(ValidationError::MissingFile)
        );
        assert_eq!(
            validator.validate_file_name(Some("")),
            Err(ValidationError::EmptyFileName)
        );
    }

    #[test]
    fn test_validation_error_becomes_invalid_input() {
        let err: AppError = ValidationError::MissingFile.into();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m == "No file provided"));
    }

    #[test]
    fn test_sanitize_string() {
        assert_eq!(RequestValidator::sanitize_string("  a\u{0}b\tc "), "ab\tc");
    }
}
