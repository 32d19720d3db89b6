use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoonError {
    #[error("Unable to parse date '{input}': {reason}")]
    ParseError { input: String, reason: String },

    #[error("Time zone error: {message}")]
    TimeZoneError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    System,
}

impl MoonError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MoonError::ParseError { .. } => ErrorCategory::Input,
            MoonError::TimeZoneError { .. }
            | MoonError::ConfigError { .. }
            | MoonError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            MoonError::IoError(_) | MoonError::SerializationError(_) => ErrorCategory::System,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            MoonError::ParseError { input, .. } => {
                format!("Could not understand the date '{}'", input)
            }
            MoonError::TimeZoneError { message } => format!("Time zone problem: {}", message),
            MoonError::InvalidConfigValueError { field, value, .. } => {
                format!("Invalid setting {} = '{}'", field, value)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Try an absolute date such as 2021-01-15 or a phrase such as 'next tuesday'"
            }
            ErrorCategory::Configuration => {
                "Check the --timezone flag and the config file (timezone: local, utc or +HH:MM)"
            }
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input => 2,
            ErrorCategory::Configuration => 1,
            ErrorCategory::System => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, MoonError>;
