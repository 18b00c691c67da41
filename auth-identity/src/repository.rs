use crate::{error::*, models::*};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use sqlx::PgPool;

#[cfg(test)]
use mockall::automock;

/// Credential storage
///
/// Each method is a single storage round trip.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. A taken username is reported as
    /// [`IdentityError::UsernameTaken`] from the store's own uniqueness check.
    async fn create_user(&self, user: &NewUser) -> Result<PublicUser>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<PublicUser> {
        sqlx::query_as::<_, PublicUser>(
            r#"
            INSERT INTO users (username, password_hash, first_name, last_name, email, is_superuser, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $1)
            RETURNING id, username, first_name, last_name, email, is_superuser
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.is_superuser)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                IdentityError::UsernameTaken(user.username.clone())
            }
            other => IdentityError::Database(other),
        })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, first_name, last_name, email,
                   is_superuser, created_on, created_by
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

/// In-memory implementation for development/testing
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<PublicUser> {
        let mut users = self.users.write();
        if users.iter().any(|u| u.username == user.username) {
            return Err(IdentityError::UsernameTaken(user.username.clone()));
        }

        let stored = User {
            id: i32::try_from(users.len() + 1)
                .map_err(|_| IdentityError::Validation("user table is full".to_string()))?,
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            is_superuser: user.is_superuser,
            created_on: Utc::now().naive_utc(),
            created_by: Some(user.username.clone()),
        };
        let public = PublicUser::from(&stored);
        users.push(stored);
        Ok(public)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}
