use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("'{key}' missing from {target_name}. {target_name} must include {required_keys:?} as keys")]
    MissingKeyError {
        key: String,
        target_name: String,
        required_keys: Vec<String>,
    },

    #[error("Unexpected item in response. Expected {expected}, but got: {found}")]
    TypeMismatchError { expected: String, found: String },

    #[error("Reference '{reference}' in {file_type} response has {segments} path segment(s), at least 2 required")]
    ReferenceFormatError {
        reference: String,
        file_type: String,
        segments: usize,
    },

    #[error("Row has {actual} cells but table has {expected} columns")]
    ShapeError { expected: usize, actual: usize },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Contract,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn missing_key(key: &str, target_name: &str, required_keys: &[&str]) -> Self {
        ReportError::MissingKeyError {
            key: key.to_string(),
            target_name: target_name.to_string(),
            required_keys: required_keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn type_mismatch(expected: &str, found: &serde_json::Value) -> Self {
        ReportError::TypeMismatchError {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// 輸入資料不符合約定的結構
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            ReportError::MissingKeyError { .. }
                | ReportError::TypeMismatchError { .. }
                | ReportError::ReferenceFormatError { .. }
        )
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::MissingKeyError { .. }
            | ReportError::TypeMismatchError { .. }
            | ReportError::ReferenceFormatError { .. }
            | ReportError::ShapeError { .. }
            | ReportError::SerializationError(_) => ErrorCategory::Contract,
            ReportError::ConfigError { .. }
            | ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ReportError::ZipError(_) | ReportError::CsvError(_) | ReportError::IoError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Contract => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ReportError::MissingKeyError { key, .. } => format!(
                "Check that the response was produced by a batch load and contains '{}'",
                key
            ),
            ReportError::TypeMismatchError { expected, .. } => {
                format!("Make sure every item is a valid {}", expected)
            }
            ReportError::ReferenceFormatError { .. } => {
                "References must look like .../<portfolio code>/<suffix>".to_string()
            }
            ReportError::ShapeError { .. } => {
                "Rows must have one cell per column".to_string()
            }
            ReportError::SerializationError(_) => {
                "Make sure the input file contains valid JSON".to_string()
            }
            ReportError::InvalidConfigValueError { field, .. }
            | ReportError::ConfigValidationError { field, .. }
            | ReportError::MissingConfigError { field } => {
                format!("Fix the '{}' setting and try again", field)
            }
            ReportError::ConfigError { .. } => "Check the configuration file".to_string(),
            ReportError::IoError(_) | ReportError::ZipError(_) | ReportError::CsvError(_) => {
                "Check that the output path exists and is writable".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Contract => format!("Response does not have the expected shape: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Output => format!("Could not write report: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
