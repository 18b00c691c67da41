use auth_identity::repository::{InMemoryUserRepository, PgUserRepository};
use auth_identity::{IdentityConfig, IdentityService};
use database_layer::DatabasePool;
use member_registry::{
    InMemoryClientStore, InMemoryMemberStore, MemberRegistry, PgClientStore, PgMemberStore,
};
use std::sync::Arc;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub registry: Arc<MemberRegistry>,
    /// `None` when serving from in-memory stores
    pub database: Option<DatabasePool>,
}

impl AppState {
    /// Postgres-backed state sharing one pool across all stores
    pub fn postgres(db: DatabasePool, identity: IdentityConfig) -> Self {
        let pool = db.pool().clone();
        Self {
            identity: Arc::new(IdentityService::new(
                Arc::new(PgUserRepository::new(pool.clone())),
                identity,
            )),
            registry: Arc::new(MemberRegistry::new(
                Arc::new(PgMemberStore::new(pool.clone())),
                Arc::new(PgClientStore::new(pool)),
            )),
            database: Some(db),
        }
    }

    pub fn in_memory(identity: IdentityConfig) -> Self {
        Self::with_stores(identity, InMemoryMemberStore::new(), InMemoryClientStore::new())
    }

    /// In-memory users with caller-provided registry stores
    pub fn with_stores(
        identity: IdentityConfig,
        members: InMemoryMemberStore,
        clients: InMemoryClientStore,
    ) -> Self {
        Self {
            identity: Arc::new(IdentityService::new(
                Arc::new(InMemoryUserRepository::new()),
                identity,
            )),
            registry: Arc::new(MemberRegistry::new(Arc::new(members), Arc::new(clients))),
            database: None,
        }
    }
}
