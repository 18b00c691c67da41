// In-memory implementation for development/testing
use crate::error::{RegistryError, Result};
use crate::models::*;
use crate::store::{ClientStore, MemberStore};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

/// Holds members in insertion order
///
/// Each call takes the lock once, so a check followed by an insert is not
/// atomic, matching the Postgres store.
#[derive(Default)]
pub struct InMemoryMemberStore {
    members: RwLock<Vec<Member>>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn insert(&self, member: &NewMember) -> Result<i32> {
        let date_of_birth = member
            .date_of_birth
            .ok_or_else(|| RegistryError::Validation("date_of_birth is required".to_string()))?;

        let mut members = self.members.write();
        let id = i32::try_from(members.len() + 1)
            .map_err(|_| RegistryError::Validation("member table is full".to_string()))?;
        let now = Utc::now().naive_utc();

        members.push(Member {
            id,
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            date_of_birth,
            gender: member.gender.clone(),
            social_security_number: member.social_security_number.clone(),
            address: member.address.clone(),
            city: member.city.clone(),
            state: member.state.clone(),
            zip_code: member.zip_code.clone(),
            phone_number: member.phone_number.clone(),
            email: member.email.clone(),
            emergency_contact_name: member.emergency_contact_name.clone(),
            emergency_contact_phone: member.emergency_contact_phone.clone(),
            blood_type: member.blood_type.clone(),
            allergies: member.allergies.clone(),
            medical_conditions: member.medical_conditions.clone(),
            medications: member.medications.clone(),
            insurance_provider: member.insurance_provider.clone(),
            insurance_policy_number: member.insurance_policy_number.clone(),
            primary_care_physician: member.primary_care_physician.clone(),
            created_at: now,
            updated_at: now,
        });

        Ok(id)
    }

    async fn exists_with_identity(&self, check: &DuplicateCheck) -> Result<bool> {
        Ok(self.members.read().iter().any(|m| {
            m.first_name == check.first_name
                && m.last_name == check.last_name
                && Some(m.date_of_birth) == check.date_of_birth
        }))
    }

    async fn search(&self, filters: &SearchFilters) -> Result<Vec<Member>> {
        let mut found: Vec<Member> = self
            .members
            .read()
            .iter()
            .filter(|m| filters.matches(m))
            .cloned()
            .collect();
        sort_by_name(&mut found, |m| (m.last_name.as_str(), m.first_name.as_str(), m.id));
        Ok(found)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Member>> {
        Ok(self.members.read().iter().find(|m| m.id == id).cloned())
    }

    async fn list_summaries(&self) -> Result<Vec<MemberSummary>> {
        let mut summaries: Vec<MemberSummary> =
            self.members.read().iter().map(MemberSummary::from).collect();
        sort_by_name(&mut summaries, |m| (m.last_name.as_str(), m.first_name.as_str(), m.id));
        Ok(summaries)
    }
}

/// Same order as [`crate::query::NAME_ORDER`]
fn sort_by_name<T, F>(items: &mut [T], name: F)
where
    F: Fn(&T) -> (&str, &str, i32),
{
    items.sort_by_cached_key(|item| {
        let (last, first, id) = name(item);
        (
            last.to_lowercase(),
            last.to_string(),
            first.to_lowercase(),
            first.to_string(),
            id,
        )
    });
}

#[derive(Default)]
pub struct InMemoryClientStore {
    clients: RwLock<Vec<Client>>,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clients(clients: Vec<Client>) -> Self {
        Self {
            clients: RwLock::new(clients),
        }
    }
}

#[async_trait]
impl ClientStore for InMemoryClientStore {
    async fn list_by_case_worker(&self, case_worker_id: &str) -> Result<Vec<Client>> {
        Ok(self
            .clients
            .read()
            .iter()
            .filter(|c| c.case_worker_id == case_worker_id)
            .cloned()
            .collect())
    }
}
