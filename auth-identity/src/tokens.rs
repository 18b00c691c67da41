//! HS256 session tokens
//!
//! Tokens are stateless: nothing is persisted and there is no revocation
//! list, so a token stays valid until `exp`.

use crate::error::{IdentityError, Result};
use crate::models::{Claims, TokenIdentity};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenKeys {
    pub fn from_secret(secret: &SecretString, ttl_secs: i64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl_secs,
        }
    }

    /// Sign a token for `user_id` expiring `ttl_secs` from now
    pub fn issue(&self, user_id: i32, is_super_user: bool) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id,
            is_super_user,
            iat: now,
            exp: now + self.ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| IdentityError::TokenIssue(e.to_string()))
    }

    /// Check signature and expiry
    pub fn verify(&self, token: &str) -> Result<TokenIdentity> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| TokenIdentity::from(data.claims))
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                IdentityError::InvalidToken
            })
    }
}
