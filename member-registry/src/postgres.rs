// Postgres-backed registry stores
use crate::error::Result;
use crate::models::*;
use crate::query::{MemberQuery, MEMBER_COLUMNS, NAME_ORDER, SUMMARY_COLUMNS};
use crate::store::{ClientStore, MemberStore};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PgMemberStore {
    pool: PgPool,
}

impl PgMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberStore for PgMemberStore {
    async fn insert(&self, member: &NewMember) -> Result<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO members (
                first_name, last_name, date_of_birth, gender, social_security_number,
                address, city, state, zip_code, phone_number, email,
                emergency_contact_name, emergency_contact_phone, blood_type, allergies,
                medical_conditions, medications, insurance_provider, insurance_policy_number,
                primary_care_physician
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            RETURNING id
            "#,
        )
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(member.date_of_birth)
        .bind(&member.gender)
        .bind(&member.social_security_number)
        .bind(&member.address)
        .bind(&member.city)
        .bind(&member.state)
        .bind(&member.zip_code)
        .bind(&member.phone_number)
        .bind(&member.email)
        .bind(&member.emergency_contact_name)
        .bind(&member.emergency_contact_phone)
        .bind(&member.blood_type)
        .bind(&member.allergies)
        .bind(&member.medical_conditions)
        .bind(&member.medications)
        .bind(&member.insurance_provider)
        .bind(&member.insurance_policy_number)
        .bind(&member.primary_care_physician)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn exists_with_identity(&self, check: &DuplicateCheck) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM members
                WHERE first_name = $1 AND last_name = $2 AND date_of_birth = $3
            )
            "#,
        )
        .bind(&check.first_name)
        .bind(&check.last_name)
        .bind(check.date_of_birth)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn search(&self, filters: &SearchFilters) -> Result<Vec<Member>> {
        let mut query = MemberQuery::search(filters);
        let members = query.build_query_as().fetch_all(&self.pool).await?;
        Ok(members)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {} FROM members WHERE id = $1",
            MEMBER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    async fn list_summaries(&self) -> Result<Vec<MemberSummary>> {
        let members = sqlx::query_as::<_, MemberSummary>(&format!(
            "SELECT {} FROM members ORDER BY {}",
            SUMMARY_COLUMNS, NAME_ORDER
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }
}

pub struct PgClientStore {
    pool: PgPool,
}

impl PgClientStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientStore for PgClientStore {
    async fn list_by_case_worker(&self, case_worker_id: &str) -> Result<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, status, case_worker_id FROM clients WHERE case_worker_id = $1 ORDER BY id",
        )
        .bind(case_worker_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }
}
