//! Member registry for Caseworks
//!
//! Member registration, advisory duplicate detection, filtered search and
//! the case-worker client listing. Storage sits behind the [`MemberStore`]
//! and [`ClientStore`] traits with Postgres and in-memory implementations.
//!
//! Duplicate detection is a plain read. Nothing at the storage layer stops
//! two identical members from being inserted, so concurrent
//! check-then-insert sequences can both succeed.

pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod query;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{RegistryError, Result};
pub use memory::{InMemoryClientStore, InMemoryMemberStore};
pub use models::*;
pub use postgres::{PgClientStore, PgMemberStore};
pub use service::MemberRegistry;
pub use store::{ClientStore, MemberStore};
