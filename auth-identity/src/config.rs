use secrecy::{ExposeSecret, SecretString};

pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;
pub const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// HMAC key for session tokens. `None` leaves login and token
    /// verification failing with a configuration error.
    pub jwt_secret: Option<SecretString>,
    pub token_ttl_secs: i64,
    pub bcrypt_cost: u32,
}

impl IdentityConfig {
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: Some(SecretString::new(secret.into())),
            ..Default::default()
        }
    }

    /// Secret that is present and non-empty
    pub fn signing_secret(&self) -> Option<&SecretString> {
        self.jwt_secret
            .as_ref()
            .filter(|secret| !secret.expose_secret().is_empty())
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_counts_as_unset() {
        let config = IdentityConfig::with_secret("");
        assert!(config.signing_secret().is_none());

        let config = IdentityConfig::with_secret("s3cret");
        assert!(config.signing_secret().is_some());
    }

    #[test]
    fn test_defaults() {
        let config = IdentityConfig::default();
        assert_eq!(config.token_ttl_secs, 3600);
        assert_eq!(config.bcrypt_cost, 10);
        assert!(config.jwt_secret.is_none());
    }
}
