use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username '{0}' already exists")]
    UsernameTaken(String),

    #[error("Authentication token required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token signing secret is not configured")]
    MissingSigningSecret,

    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Token issuance failed: {0}")]
    TokenIssue(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, IdentityError>;
