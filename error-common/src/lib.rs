//! Common error handling utilities for Caseworks
//!
//! Error codes shared by the HTTP layer, and the top-level result type of
//! the server binary. Request-level failures (`IdentityError`,
//! `RegistryError`) are rendered by the server's `ApiError`; startup
//! failures (database, bind, serve) flow through [`CaseworksError`].
//!
//! # Error Categories
//!
//! - **Config**: required configuration absent or invalid
//! - **Database**: pool or schema bootstrap failure
//! - **Network**: listener could not bind
//! - **Internal**: server loop or subscriber failure
//!
//! # Example
//!
//! ```rust
//! use error_common::{CaseworksError, ErrorCategory};
//!
//! let err = CaseworksError::ConfigError("JWT_SECRET is not set".to_string());
//! assert_eq!(err.category(), ErrorCategory::Config);
//! assert_eq!(err.code(), error_common::codes::config::MISSING_SETTING);
//! ```

pub mod codes;
pub mod types;

pub use types::*;
