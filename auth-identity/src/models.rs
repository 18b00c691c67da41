use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{IdentityError, Result};

/// Column widths of the `users` table
const MAX_USERNAME: usize = 50;
const MAX_NAME: usize = 50;
const MAX_EMAIL: usize = 100;

/// Stored credential record
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub is_superuser: bool,
    pub created_on: NaiveDateTime,
    pub created_by: Option<String>,
}

/// User fields safe to return to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PublicUser {
    pub id: i32,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub is_superuser: bool,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            is_superuser: user.is_superuser,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub is_super_user: bool,
}

impl RegisterRequest {
    /// Reject input the `users` table cannot hold
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(IdentityError::Validation("username is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(IdentityError::Validation("password is required".to_string()));
        }
        check_length("username", Some(&self.username), MAX_USERNAME)?;
        check_length("firstName", self.first_name.as_deref(), MAX_NAME)?;
        check_length("lastName", self.last_name.as_deref(), MAX_NAME)?;
        check_length("email", self.email.as_deref(), MAX_EMAIL)
    }
}

fn check_length(field: &str, value: Option<&str>, max: usize) -> Result<()> {
    match value {
        Some(value) if value.chars().count() > max => Err(IdentityError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        ))),
        _ => Ok(()),
    }
}

/// Insert payload handed to a [`crate::repository::UserRepository`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub is_superuser: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub is_super_user: bool,
}

/// Signed session claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: i32,
    pub is_super_user: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Identity attached to a request once its token verifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenIdentity {
    pub user_id: i32,
    pub is_super_user: bool,
}

impl From<Claims> for TokenIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            is_super_user: claims.is_super_user,
        }
    }
}
