use crate::{config::*, error::*, models::*, repository::*, tokens::TokenKeys};
use std::sync::Arc;
use tracing::{info, warn};

pub struct IdentityService {
    users: Arc<dyn UserRepository>,
    keys: Option<TokenKeys>,
    bcrypt_cost: u32,
    unknown_user_hash: Option<String>,
}

const UNKNOWN_USER_PASSWORD: &str = "caseworks-unknown-user";

impl IdentityService {
    pub fn new(users: Arc<dyn UserRepository>, config: IdentityConfig) -> Self {
        let keys = config
            .signing_secret()
            .map(|secret| TokenKeys::from_secret(secret, config.token_ttl_secs));

        if keys.is_none() {
            warn!("No token signing secret configured; login and token checks will fail");
        }

        let unknown_user_hash = match bcrypt::hash(UNKNOWN_USER_PASSWORD, config.bcrypt_cost) {
            Ok(hash) => Some(hash),
            Err(e) => {
                warn!(error = %e, "Could not prepare hash for unknown-user logins");
                None
            }
        };

        Self {
            users,
            keys,
            bcrypt_cost: config.bcrypt_cost,
            unknown_user_hash,
        }
    }

    pub fn signing_configured(&self) -> bool {
        self.keys.is_some()
    }

    /// Create a user with a bcrypt-hashed password
    ///
    /// Uniqueness is left to the store; a taken username surfaces as
    /// [`IdentityError::UsernameTaken`].
    pub async fn register(&self, request: RegisterRequest) -> Result<PublicUser> {
        request.validate()?;

        let password_hash = self.hash_password(request.password).await?;

        let user = self
            .users
            .create_user(&NewUser {
                username: request.username,
                password_hash,
                first_name: request.first_name,
                last_name: request.last_name,
                email: request.email,
                is_superuser: request.is_super_user,
            })
            .await?;

        info!(user_id = user.id, is_superuser = user.is_superuser, "User registered");
        Ok(user)
    }

    /// Verify credentials and mint a session token
    ///
    /// Unknown usernames and wrong passwords both yield
    /// [`IdentityError::InvalidCredentials`], and both run one bcrypt
    /// verification at the configured cost.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        let keys = self.keys.as_ref().ok_or(IdentityError::MissingSigningSecret)?;

        let user = match self.users.find_by_username(&request.username).await? {
            Some(user) => user,
            None => {
                if let Some(hash) = &self.unknown_user_hash {
                    let _ = self.verify_password(request.password, hash.clone()).await;
                }
                return Err(IdentityError::InvalidCredentials);
            }
        };

        if !self.verify_password(request.password, user.password_hash.clone()).await? {
            return Err(IdentityError::InvalidCredentials);
        }

        let token = keys.issue(user.id, user.is_superuser)?;
        info!(user_id = user.id, "User logged in");

        Ok(LoginResponse {
            token,
            is_super_user: user.is_superuser,
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenIdentity> {
        let keys = self.keys.as_ref().ok_or(IdentityError::MissingSigningSecret)?;
        keys.verify(token)
    }

    async fn hash_password(&self, password: String) -> Result<String> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| IdentityError::Hashing(format!("hashing task failed: {}", e)))?
            .map_err(|e| IdentityError::Hashing(e.to_string()))
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| IdentityError::Hashing(format!("verification task failed: {}", e)))?
            .map_err(|e| IdentityError::Hashing(e.to_string()))
    }
}
