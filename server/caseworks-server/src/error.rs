use auth_identity::IdentityError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use error_common::codes;
use member_registry::RegistryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

/// Error body returned by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable error message
    pub message: String,
    /// Explanation of what went wrong, when it is safe to share
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Main API error enum
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Authentication error: {message}")]
    Authentication { message: String, code: &'static str },

    #[error("Authorization error: {message}")]
    Authorization { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Uniqueness violations are reported as server errors
    #[error("Conflict: {detail}")]
    Conflict { message: String, detail: String },

    #[error("Configuration error: {detail}")]
    Configuration { message: String, detail: String },

    #[error("Internal server error: {}", detail.as_deref().unwrap_or(message))]
    Internal { message: String, detail: Option<String> },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Replace the client-facing message of server-side failures
    ///
    /// Client errors keep their own message.
    pub fn in_context(self, context: &str) -> Self {
        match self {
            Self::Conflict { detail, .. } => Self::Conflict {
                message: context.to_string(),
                detail,
            },
            Self::Configuration { detail, .. } => Self::Configuration {
                message: context.to_string(),
                detail,
            },
            Self::Internal { detail, .. } => Self::Internal {
                message: context.to_string(),
                detail,
            },
            other => other,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Authorization { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. }
            | ApiError::Configuration { .. }
            | ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation_error",
            ApiError::Authentication { .. } => "authentication_error",
            ApiError::Authorization { .. } => "authorization_error",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Conflict { .. } => "conflict",
            ApiError::Configuration { .. } => "configuration_error",
            ApiError::Internal { .. } => "internal_error",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => codes::validation::INVALID_INPUT,
            ApiError::Authentication { code, .. } => *code,
            ApiError::Authorization { .. } => codes::authentication::TOKEN_INVALID,
            ApiError::NotFound { .. } => codes::resource::NOT_FOUND,
            ApiError::Conflict { .. } => codes::resource::CONFLICT,
            ApiError::Configuration { .. } => codes::config::MISSING_SETTING,
            ApiError::Internal { .. } => codes::server::INTERNAL,
        }
    }

    fn body(&self) -> ApiErrorResponse {
        match self {
            ApiError::Validation { message }
            | ApiError::Authentication { message, .. }
            | ApiError::Authorization { message }
            | ApiError::NotFound { message } => ApiErrorResponse {
                message: message.clone(),
                error: None,
            },
            ApiError::Conflict { message, detail } | ApiError::Configuration { message, detail } => {
                ApiErrorResponse {
                    message: message.clone(),
                    error: Some(detail.clone()),
                }
            }
            // Storage and internal details stay in the log.
            ApiError::Internal { message, .. } => ApiErrorResponse {
                message: message.clone(),
                error: None,
            },
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(error: IdentityError) -> Self {
        match error {
            IdentityError::Validation(message) => Self::Validation { message },
            IdentityError::InvalidCredentials => Self::Authentication {
                message: error.to_string(),
                code: codes::authentication::INVALID_CREDENTIALS,
            },
            IdentityError::MissingToken => Self::Authentication {
                message: error.to_string(),
                code: codes::authentication::TOKEN_MISSING,
            },
            IdentityError::InvalidToken => Self::Authorization {
                message: error.to_string(),
            },
            IdentityError::UsernameTaken(_) => Self::Conflict {
                message: "Username already exists".to_string(),
                detail: error.to_string(),
            },
            IdentityError::MissingSigningSecret => Self::Configuration {
                message: "Server configuration error".to_string(),
                detail: error.to_string(),
            },
            IdentityError::Hashing(_) | IdentityError::TokenIssue(_) | IdentityError::Database(_) => {
                Self::Internal {
                    message: "Internal server error".to_string(),
                    detail: Some(error.to_string()),
                }
            }
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::Validation(message) => Self::Validation { message },
            RegistryError::NotFound(_) => Self::not_found("Member not found"),
            RegistryError::Database(_) => Self::Internal {
                message: "Internal server error".to_string(),
                detail: Some(error.to_string()),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        // Log the error with correlation ID
        if status_code.is_server_error() {
            error!(
                error_id = %error_id,
                error_type = %self.error_type(),
                error_code = self.code(),
                status_code = %status_code.as_u16(),
                error = %logger_redacted::redact(&self.to_string()),
                "API error occurred"
            );
        } else {
            warn!(
                error_id = %error_id,
                error_type = %self.error_type(),
                error_code = self.code(),
                status_code = %status_code.as_u16(),
                "Request rejected"
            );
        }

        let mut response = (status_code, Json(self.body())).into_response();
        if let Ok(value) = HeaderValue::from_str(&error_id) {
            response.headers_mut().insert("x-error-id", value);
        }
        response
    }
}

/// Attach an endpoint-specific message to server-side failures
pub trait ApiContext<T> {
    fn api_context(self, context: &str) -> Result<T, ApiError>;
}

impl<T, E> ApiContext<T> for Result<T, E>
where
    E: Into<ApiError>,
{
    fn api_context(self, context: &str) -> Result<T, ApiError> {
        self.map_err(|e| e.into().in_context(context))
    }
}
