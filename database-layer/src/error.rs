use error_common::CaseworksError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Invalid database configuration: {0}")]
    ConfigurationError(String),

    #[error("Schema bootstrap failed: {0}")]
    SchemaFailed(String),

    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

impl From<DatabaseError> for CaseworksError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::ConfigurationError(msg) => CaseworksError::ConfigError(msg),
            other => CaseworksError::DatabaseError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use error_common::ErrorCategory;

    #[test]
    fn test_startup_failures_keep_their_category() {
        let err = CaseworksError::from(DatabaseError::ConfigurationError("database host is empty".to_string()));
        assert_eq!(err.category(), ErrorCategory::Config);

        let err = CaseworksError::from(DatabaseError::SchemaFailed("members: permission denied".to_string()));
        assert_eq!(err.category(), ErrorCategory::Database);
        assert!(err.to_string().contains("members: permission denied"));
    }
}
