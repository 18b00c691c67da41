use crate::error::Result;
use crate::models::*;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Member record storage
///
/// Implementations impose no uniqueness on member identity fields.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Persist a validated member and return its generated id
    async fn insert(&self, member: &NewMember) -> Result<i32>;

    /// Whether any member matches all three fields exactly
    async fn exists_with_identity(&self, check: &DuplicateCheck) -> Result<bool>;

    /// Members passing every present filter, ordered by last then first name
    async fn search(&self, filters: &SearchFilters) -> Result<Vec<Member>>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Member>>;

    async fn list_summaries(&self) -> Result<Vec<MemberSummary>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn list_by_case_worker(&self, case_worker_id: &str) -> Result<Vec<Client>>;
}
