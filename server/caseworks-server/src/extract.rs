//! Request extractors that reject with [`ApiError`] bodies

use crate::error::ApiError;
use crate::state::AppState;
use auth_identity::{IdentityError, TokenIdentity};
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use serde::Serialize;

/// `axum::Json` with malformed bodies reported as 400 `{message}`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` with the same rejection shape
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Caller identity from a verified `Authorization: Bearer` token
///
/// No header, or a scheme other than Bearer, is a 401. A token that fails
/// verification is a 403.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    pub user_id: i32,
    pub is_super_user: bool,
}

impl From<TokenIdentity> for AuthContext {
    fn from(identity: TokenIdentity) -> Self {
        Self {
            user_id: identity.user_id,
            is_super_user: identity.is_super_user,
        }
    }
}

/// Extract the token from a `Bearer` authorization header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(context) = parts.extensions.get::<AuthContext>() {
            return Ok(*context);
        }

        let token = bearer_token(&parts.headers).ok_or(IdentityError::MissingToken)?;
        let context = AuthContext::from(state.identity.verify_token(token)?);

        tracing::debug!(user_id = context.user_id, "Request authenticated");
        parts.extensions.insert(context);
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwdw==")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
