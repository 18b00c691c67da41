//! Identity and session tokens for Caseworks
//!
//! This crate provides:
//! - User registration with bcrypt password hashing
//! - Credential verification at login
//! - HS256 session token issuance and verification
//! - Postgres and in-memory credential stores
//!
//! # Example
//!
//! ```rust
//! use auth_identity::repository::InMemoryUserRepository;
//! use auth_identity::{IdentityConfig, IdentityService, LoginRequest, RegisterRequest};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), auth_identity::IdentityError> {
//! let service = IdentityService::new(
//!     Arc::new(InMemoryUserRepository::new()),
//!     IdentityConfig { bcrypt_cost: 4, ..IdentityConfig::with_secret("change-me") },
//! );
//!
//! service
//!     .register(RegisterRequest {
//!         username: "caseworker".into(),
//!         password: "password123".into(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let login = service
//!     .login(LoginRequest { username: "caseworker".into(), password: "password123".into() })
//!     .await?;
//! let identity = service.verify_token(&login.token)?;
//! assert!(!identity.is_super_user);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod tokens;

pub use config::IdentityConfig;
pub use error::*;
pub use models::*;
pub use service::*;
