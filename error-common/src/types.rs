use serde::Serialize;
use thiserror::Error;

use crate::codes;

/// Coarse error category shared by every Caseworks crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Config,
    Database,
    Network,
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorCategory::Config => "config",
            ErrorCategory::Database => "database",
            ErrorCategory::Network => "network",
            ErrorCategory::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Simplified error enum for common use cases
#[derive(Error, Debug)]
pub enum CaseworksError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CaseworksError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CaseworksError::ConfigError(_) => ErrorCategory::Config,
            CaseworksError::DatabaseError(_) => ErrorCategory::Database,
            CaseworksError::NetworkError(_) => ErrorCategory::Network,
            CaseworksError::ServerError(_) | CaseworksError::Other(_) => ErrorCategory::Internal,
        }
    }

    /// Structured error code for logs and operator tooling
    pub fn code(&self) -> &'static str {
        match self {
            CaseworksError::ConfigError(_) => codes::config::MISSING_SETTING,
            CaseworksError::DatabaseError(_) => codes::database::QUERY_FAILED,
            CaseworksError::NetworkError(_) => codes::server::NETWORK,
            CaseworksError::ServerError(_) | CaseworksError::Other(_) => codes::server::INTERNAL,
        }
    }
}

/// Result type alias for Caseworks operations
pub type Result<T> = std::result::Result<T, CaseworksError>;

/// Log an error with its category and code
pub fn log_error(context: &str, error: &CaseworksError) {
    tracing::error!(
        context = context,
        error_code = error.code(),
        category = %error.category(),
        error = %error,
        "Caseworks error occurred"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_and_code() {
        let err = CaseworksError::NetworkError("address in use".to_string());
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.code(), codes::server::NETWORK);

        let err = CaseworksError::DatabaseError("relation missing".to_string());
        assert_eq!(err.category(), ErrorCategory::Database);
        assert_eq!(err.code(), codes::database::QUERY_FAILED);

        let err = CaseworksError::from(anyhow::anyhow!("boom"));
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorCategory::Config).unwrap();
        assert_eq!(json, "\"config\"");
        assert_eq!(ErrorCategory::Internal.to_string(), "internal");
    }
}
