use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("No amount could be extracted from: {transcript:?}")]
    NoExtractableAmount { transcript: String },

    #[error("Entry {id} not found")]
    EntryNotFound { id: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Storage,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IntakeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IntakeError::NoExtractableAmount { .. } | IntakeError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            IntakeError::ConfigValidationError { .. }
            | IntakeError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            IntakeError::EntryNotFound { .. } => ErrorCategory::Storage,
            IntakeError::IoError(_) | IntakeError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 使用者可以重說一次
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            IntakeError::NoExtractableAmount { .. } => {
                "Say the amount with a number, e.g. \"30g chicken breast\""
            }
            IntakeError::ValidationError { .. } => "Check the entered values and try again",
            IntakeError::ConfigValidationError { .. } => {
                "Make sure the profile file exists and is valid TOML"
            }
            IntakeError::InvalidConfigValueError { .. } => {
                "Fix the highlighted value in the profile file or command line"
            }
            IntakeError::EntryNotFound { .. } => "Refresh the entry list; it may have been removed",
            IntakeError::IoError(_) => "Check file paths and permissions",
            IntakeError::SerializationError(_) => "Report this as a bug",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            IntakeError::NoExtractableAmount { .. } => {
                "Couldn't hear an amount in that. Try again?".to_string()
            }
            IntakeError::InvalidConfigValueError { field, reason, .. } => {
                format!("'{}' is not valid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;
