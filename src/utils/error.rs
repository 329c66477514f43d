use crate::domain::model::Condition;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Failed to load {condition} model from {path}: {reason}")]
    ArtifactLoad {
        condition: Condition,
        path: String,
        reason: String,
    },

    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Field '{field}' value {value} is outside the valid range [{min}, {max}]")]
    FieldRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Field '{field}' value '{value}' is not a valid {expected}")]
    FieldType {
        field: String,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid feature vector for {condition}: expected {expected} values, got {actual}")]
    InvalidVector {
        condition: Condition,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid input in {source_name}: {message}")]
    InvalidInput { source_name: String, message: String },

    #[error("Unknown condition: {name}")]
    UnknownCondition { name: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 模型載入失敗，程序不應啟動
    Startup,
    /// 使用者輸入錯誤，可重新輸入
    Input,
    /// Builder/Registry 契約不一致，屬於程式缺陷
    Internal,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PredictError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PredictError::ArtifactLoad { .. } => ErrorCategory::Startup,
            PredictError::MissingField { .. }
            | PredictError::FieldRange { .. }
            | PredictError::FieldType { .. }
            | PredictError::InvalidInput { .. }
            | PredictError::UnknownCondition { .. } => ErrorCategory::Input,
            PredictError::InvalidVector { .. } => ErrorCategory::Internal,
            PredictError::ConfigError { .. } | PredictError::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
            PredictError::IoError(_) | PredictError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Internal => ErrorSeverity::High,
            ErrorCategory::Startup | ErrorCategory::Config | ErrorCategory::System => {
                ErrorSeverity::Critical
            }
        }
    }

    /// 輸入錯誤可以重新詢問使用者，其餘皆為永久或致命錯誤
    pub fn is_recoverable(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PredictError::ArtifactLoad { path, .. } => format!(
                "Check that '{}' exists and is a valid model artifact, then restart",
                path
            ),
            PredictError::MissingField { field } => {
                format!("Provide a value for '{}'", field)
            }
            PredictError::FieldRange { field, min, max, .. } => {
                format!("Re-enter '{}' with a value between {} and {}", field, min, max)
            }
            PredictError::FieldType {
                field, expected, ..
            } => format!("Re-enter '{}' as {}", field, expected),
            PredictError::InvalidInput { source_name, .. } => format!(
                "Fix '{}': it must be a JSON object of field names to numbers or numeric strings",
                source_name
            ),
            PredictError::InvalidVector { .. } => {
                "This is a defect in the feature tables; please report it".to_string()
            }
            PredictError::UnknownCondition { .. } => format!(
                "Use one of: {}",
                Condition::ALL
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            PredictError::IoError(_) => "Check file paths and permissions".to_string(),
            PredictError::SerializationError(_) => "Check the JSON input format".to_string(),
            PredictError::ConfigError { .. } | PredictError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line arguments".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Startup => format!("Models could not be loaded: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Internal => format!("Internal error: {}", self),
            ErrorCategory::Config => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictError>;
