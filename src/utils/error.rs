use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned HTTP {status} for {endpoint}")]
    HttpStatusError { status: u16, endpoint: String },

    #[error("Unexpected API response: {message}")]
    ResponseShapeError { message: String },

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Timing value '{value}' is not a number: {reason}")]
    TimingFormatError { value: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 錯誤分類，決定退出碼與提示訊息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Format,
    Configuration,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_)
            | EtlError::HttpStatusError { .. }
            | EtlError::ResponseShapeError { .. } => ErrorCategory::Network,
            EtlError::DatabaseError(_)
            | EtlError::IoError(_)
            | EtlError::SerializationError(_) => ErrorCategory::Storage,
            EtlError::TimingFormatError { .. } => ErrorCategory::Format,
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Network => 2,
            ErrorCategory::Storage | ErrorCategory::Format => 1,
            ErrorCategory::Configuration => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not fetch country data: {}", self),
            ErrorCategory::Storage => format!("Could not save results: {}", self),
            ErrorCategory::Format => format!("Could not compute timing statistics: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::ApiError(_) => "Check your network connection and that the endpoint is reachable",
            EtlError::HttpStatusError { .. } => {
                "Verify the API endpoint URL; the server rejected the request"
            }
            EtlError::ResponseShapeError { .. } => {
                "The endpoint must return a JSON array of country objects"
            }
            EtlError::DatabaseError(_) => {
                "Make sure the database file is writable and not locked by another process"
            }
            EtlError::IoError(_) => "Check that the output directory exists and is writable",
            EtlError::SerializationError(_) => "Inspect the processed rows for invalid data",
            EtlError::TimingFormatError { .. } => "This indicates a bug in timing rendering",
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Review the command-line flags or the TOML config file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_map_to_exit_codes() {
        let network = EtlError::HttpStatusError {
            status: 503,
            endpoint: "http://example.com".to_string(),
        };
        assert_eq!(network.category(), ErrorCategory::Network);
        assert_eq!(network.exit_code(), 2);

        let storage = EtlError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ));
        assert_eq!(storage.category(), ErrorCategory::Storage);
        assert_eq!(storage.exit_code(), 1);

        let format = EtlError::TimingFormatError {
            value: "abc ms".to_string(),
            reason: "invalid float literal".to_string(),
        };
        assert_eq!(format.category(), ErrorCategory::Format);
        assert_eq!(format.exit_code(), 1);

        let config = EtlError::ConfigError {
            message: "missing".to_string(),
        };
        assert_eq!(config.exit_code(), 3);
    }

    #[test]
    fn test_user_friendly_message_includes_cause() {
        let err = EtlError::ResponseShapeError {
            message: "expected array".to_string(),
        };
        let msg = err.user_friendly_message();
        assert!(msg.starts_with("Could not fetch country data"));
        assert!(msg.contains("expected array"));
    }
}
