use crate::error::{RegistryError, Result};
use crate::models::*;
use crate::store::{ClientStore, MemberStore};
use crate::validation::RequestValidation;
use logger_redacted::mask;
use std::sync::Arc;
use tracing::{debug, info};

/// Member and client operations over pluggable stores
pub struct MemberRegistry {
    members: Arc<dyn MemberStore>,
    clients: Arc<dyn ClientStore>,
}

impl MemberRegistry {
    pub fn new(members: Arc<dyn MemberStore>, clients: Arc<dyn ClientStore>) -> Self {
        Self { members, clients }
    }

    /// Insert without any duplicate rejection; returns the new id
    pub async fn add_member(&self, member: NewMember) -> Result<i32> {
        member.validate()?;

        let id = self.members.insert(&member).await?;
        info!(
            member_id = id,
            last_name = %mask("last_name", &member.last_name),
            "Member added"
        );
        Ok(id)
    }

    /// Advisory check: not atomic with a following [`Self::add_member`]
    pub async fn check_duplicate(&self, check: DuplicateCheck) -> Result<bool> {
        check.validate()?;

        let is_duplicate = self.members.exists_with_identity(&check).await?;
        debug!(
            is_duplicate,
            last_name = %mask("last_name", &check.last_name),
            "Duplicate check"
        );
        Ok(is_duplicate)
    }

    pub async fn search(&self, filters: SearchFilters) -> Result<Vec<Member>> {
        let filters = filters.normalized();
        let members = self.members.search(&filters).await?;
        debug!(
            unfiltered = filters.is_empty(),
            results = members.len(),
            "Member search"
        );
        Ok(members)
    }

    pub async fn get_member(&self, id: i32) -> Result<Member> {
        self.members
            .get_by_id(id)
            .await?
            .ok_or(RegistryError::NotFound(id))
    }

    pub async fn list_members(&self) -> Result<Vec<MemberSummary>> {
        self.members.list_summaries().await
    }

    /// Clients whose case worker equals `case_worker_id` exactly; none at
    /// all when it is absent or blank
    pub async fn list_clients(&self, case_worker_id: Option<&str>) -> Result<Vec<Client>> {
        match case_worker_id.filter(|id| !id.trim().is_empty()) {
            Some(id) => self.clients.list_by_case_worker(id).await,
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryClientStore, InMemoryMemberStore};
    use crate::store::{MockClientStore, MockMemberStore};
    use chrono::{Days, NaiveDate};
    use proptest::prelude::*;
    use tokio::sync::Barrier;

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1985, 3, 14).unwrap()
    }

    fn new_member(first: &str, last: &str) -> NewMember {
        NewMember {
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: Some(dob()),
            phone_number: Some("555-867-5309".to_string()),
            ..Default::default()
        }
    }

    fn check(first: &str, last: &str, date_of_birth: NaiveDate) -> DuplicateCheck {
        DuplicateCheck {
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: Some(date_of_birth),
        }
    }

    fn in_memory() -> MemberRegistry {
        MemberRegistry::new(
            Arc::new(InMemoryMemberStore::new()),
            Arc::new(InMemoryClientStore::new()),
        )
    }

    async fn seeded(names: &[(&str, &str)]) -> MemberRegistry {
        let registry = in_memory();
        for (first, last) in names {
            registry.add_member(new_member(first, last)).await.unwrap();
        }
        registry
    }

    #[tokio::test]
    async fn test_invalid_member_never_reaches_store() {
        let mut members = MockMemberStore::new();
        members.expect_insert().times(0);
        let registry = MemberRegistry::new(Arc::new(members), Arc::new(MockClientStore::new()));

        let err = registry.add_member(new_member("", "Smith")).await.unwrap_err();
        assert!(matches!(err, RegistryError::Validation(_)));
    }

    #[tokio::test]
    async fn test_absent_case_worker_lists_nothing_without_query() {
        let mut clients = MockClientStore::new();
        clients.expect_list_by_case_worker().times(0);
        let registry = MemberRegistry::new(Arc::new(MockMemberStore::new()), Arc::new(clients));

        assert!(registry.list_clients(None).await.unwrap().is_empty());
        assert!(registry.list_clients(Some("  ")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_case_worker_id_is_passed_through() {
        let mut clients = MockClientStore::new();
        clients
            .expect_list_by_case_worker()
            .times(1)
            .withf(|id| id == "cw-7")
            .returning(|id| {
                Ok(vec![Client {
                    id: 1,
                    name: "River".to_string(),
                    status: "open".to_string(),
                    case_worker_id: id.to_string(),
                }])
            });
        let registry = MemberRegistry::new(Arc::new(MockMemberStore::new()), Arc::new(clients));

        let listed = registry.list_clients(Some("cw-7")).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_case_worker_id_is_not_trimmed() {
        let registry = MemberRegistry::new(
            Arc::new(InMemoryMemberStore::new()),
            Arc::new(InMemoryClientStore::with_clients(vec![Client {
                id: 1,
                name: "River".to_string(),
                status: "open".to_string(),
                case_worker_id: "cw-1".to_string(),
            }])),
        );

        assert_eq!(registry.list_clients(Some("cw-1")).await.unwrap().len(), 1);
        assert!(registry.list_clients(Some(" cw-1 ")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_check_exact_match() {
        let registry = seeded(&[("John", "Smith")]).await;
        assert!(registry.check_duplicate(check("John", "Smith", dob())).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_check_requires_identity_fields() {
        let registry = in_memory();
        let err = registry
            .check_duplicate(DuplicateCheck {
                first_name: "John".to_string(),
                last_name: "Smith".to_string(),
                date_of_birth: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Validation(_)));
    }

    #[tokio::test]
    async fn test_search_without_filters_returns_all_sorted() {
        let registry = seeded(&[("John", "Smith"), ("Joan", "Doe"), ("Mark", "Evans")]).await;

        let names: Vec<String> = registry
            .search(SearchFilters::default())
            .await
            .unwrap()
            .into_iter()
            .map(|m| format!("{} {}", m.first_name, m.last_name))
            .collect();
        assert_eq!(names, vec!["Joan Doe", "Mark Evans", "John Smith"]);
    }

    #[tokio::test]
    async fn test_search_name_substring() {
        let registry =
            seeded(&[("John", "Smith"), ("Joan", "Doe"), ("Mark", "Jones"), ("Mark", "Evans")]).await;

        let names: Vec<String> = registry
            .search(SearchFilters {
                name: Some("jo".to_string()),
                ..Default::default()
            })
            .await
            .unwrap()
            .into_iter()
            .map(|m| format!("{} {}", m.first_name, m.last_name))
            .collect();
        assert_eq!(names, vec!["Joan Doe", "Mark Jones", "John Smith"]);
    }

    #[tokio::test]
    async fn test_search_phone_matches_exactly() {
        let registry = in_memory();
        for (first, last, phone) in [
            ("John", "Smith", "555-867-5309"),
            ("Joan", "Doe", "555-867-5309"),
            ("Mark", "Evans", "555-867-1000"),
        ] {
            let member = NewMember {
                phone_number: Some(phone.to_string()),
                ..new_member(first, last)
            };
            registry.add_member(member).await.unwrap();
        }

        let search = |name: Option<&str>, phone: &str| SearchFilters {
            name: name.map(str::to_string),
            phone_number: Some(phone.to_string()),
            ..Default::default()
        };
        let names = |found: Vec<Member>| -> Vec<String> {
            found
                .into_iter()
                .map(|m| format!("{} {}", m.first_name, m.last_name))
                .collect()
        };

        let exact = registry.search(search(None, "555-867-5309")).await.unwrap();
        assert_eq!(names(exact), vec!["Joan Doe", "John Smith"]);

        let prefix = registry.search(search(None, "555-867")).await.unwrap();
        assert!(prefix.is_empty());

        let combined = registry.search(search(Some("sm"), "555-867-5309")).await.unwrap();
        assert_eq!(names(combined), vec!["John Smith"]);

        let mismatched = registry.search(search(Some("jo"), "555-867-1000")).await.unwrap();
        assert!(mismatched.is_empty());
    }

    #[tokio::test]
    async fn test_search_ignores_blank_filters() {
        let registry = seeded(&[("John", "Smith"), ("Joan", "Doe")]).await;
        let found = registry
            .search(SearchFilters {
                name: Some(String::new()),
                phone_number: Some("  ".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_get_unknown_member_is_not_found() {
        let registry = seeded(&[("John", "Smith")]).await;
        assert_eq!(registry.get_member(1).await.unwrap().first_name, "John");
        assert!(matches!(
            registry.get_member(404).await,
            Err(RegistryError::NotFound(404))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_check_then_insert_can_both_succeed() {
        let registry = Arc::new(in_memory());
        let barrier = Arc::new(Barrier::new(2));

        let mut handles = Vec::new();
        for _ in 0..2 {
            let registry = registry.clone();
            let barrier = barrier.clone();
            handles.push(tokio::spawn(async move {
                let is_duplicate = registry
                    .check_duplicate(check("Dana", "Reyes", dob()))
                    .await
                    .unwrap();
                // Both checks complete before either insert starts.
                barrier.wait().await;
                if is_duplicate {
                    None
                } else {
                    Some(registry.add_member(new_member("Dana", "Reyes")).await.unwrap())
                }
            }));
        }

        let mut inserted = Vec::new();
        for handle in handles {
            inserted.extend(handle.await.unwrap());
        }

        assert_eq!(inserted.len(), 2);
        assert_eq!(registry.list_members().await.unwrap().len(), 2);
        assert!(registry.check_duplicate(check("Dana", "Reyes", dob())).await.unwrap());
    }

    proptest! {
        #[test]
        fn prop_near_matches_are_not_duplicates(
            first in "[A-Z][a-z]{2,10}",
            last in "[A-Z][a-z]{2,10}",
            day_offset in 1u64..400,
            variant in 0usize..4,
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            runtime.block_on(async {
                let registry = in_memory();
                registry
                    .add_member(NewMember {
                        first_name: first.clone(),
                        last_name: last.clone(),
                        date_of_birth: Some(dob()),
                        ..Default::default()
                    })
                    .await
                    .unwrap();

                let near = match variant {
                    0 => check(&first.to_lowercase(), &last, dob()),
                    1 => check(&first, &last[..last.len() - 1], dob()),
                    2 => check(&first, &last, dob().checked_add_days(Days::new(day_offset)).unwrap()),
                    _ => check(&first, &last, dob().checked_sub_days(Days::new(day_offset)).unwrap()),
                };

                prop_assert!(!registry.check_duplicate(near).await.unwrap());
                prop_assert!(registry.check_duplicate(check(&first, &last, dob())).await.unwrap());
                Ok(())
            })?;
        }
    }
}
