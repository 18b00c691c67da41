//! Database layer for Caseworks
//!
//! Owns the Postgres connection pool shared by every request and the
//! startup schema bootstrap for the `users`, `clients` and `members`
//! tables. Query code lives with the domain crates (`auth-identity`,
//! `member-registry`); this crate only hands them a pool.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use database_layer::{initialize_schema, DatabaseConfig, DatabasePool};
//!
//! # async fn run() -> Result<(), database_layer::DatabaseError> {
//! let db = DatabasePool::new(&DatabaseConfig::default()).await?;
//! initialize_schema(&db).await?;
//! assert!(db.is_healthy().await);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod schema;

pub use config::DatabaseConfig;
pub use connection::DatabasePool;
pub use error::{DatabaseError, DatabaseResult};
pub use schema::initialize_schema;
