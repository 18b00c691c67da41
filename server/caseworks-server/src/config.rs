//! Command line and environment configuration
//!
//! Every setting can come from a flag or its environment variable; a
//! `.env` file is loaded into the environment before parsing.

use auth_identity::IdentityConfig;
use clap::Parser;
use database_layer::DatabaseConfig;
use secrecy::SecretString;
use std::convert::Infallible;

fn secret(value: &str) -> Result<SecretString, Infallible> {
    Ok(SecretString::new(value.to_string()))
}

/// Caseworks HTTP server
#[derive(Parser, Debug, Clone)]
#[command(name = "caseworks-server")]
#[command(about = "Case worker login and member registry HTTP API server")]
pub struct Args {
    /// Server bind address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Full Postgres URL; overrides the DB_* parts
    #[arg(long, env = "DATABASE_URL", value_parser = secret, hide_env_values = true)]
    pub database_url: Option<SecretString>,

    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    #[arg(long, env = "DB_NAME", default_value = "caseworks")]
    pub db_name: String,

    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    #[arg(long, env = "DB_PASSWORD", value_parser = secret, hide_env_values = true)]
    pub db_password: Option<SecretString>,

    /// Connection pool size
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub db_max_connections: u32,

    /// HMAC secret for session tokens
    #[arg(long, env = "JWT_SECRET", value_parser = secret, hide_env_values = true)]
    pub jwt_secret: Option<SecretString>,

    /// Session token lifetime in seconds
    #[arg(long, env = "TOKEN_TTL_SECS", default_value_t = 3600)]
    pub token_ttl_secs: i64,

    /// bcrypt work factor
    #[arg(
        long,
        env = "BCRYPT_COST",
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(10..=31)
    )]
    pub bcrypt_cost: u32,

    /// Allowed browser origins, comma separated
    #[arg(
        long,
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub cors_origins: Vec<String>,

    /// Runtime environment (development, staging, production)
    #[arg(long, env = "CASEWORKS_ENV", default_value = "development")]
    pub environment: String,

    /// Serve from in-memory stores instead of Postgres
    #[arg(long, env = "CASEWORKS_IN_MEMORY")]
    pub in_memory: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            database_url: self.database_url.clone(),
            host: self.db_host.clone(),
            port: self.db_port,
            database: self.db_name.clone(),
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            max_connections: self.db_max_connections,
        }
    }

    pub fn identity_config(&self) -> IdentityConfig {
        IdentityConfig {
            jwt_secret: self.jwt_secret.clone(),
            token_ttl_secs: self.token_ttl_secs,
            bcrypt_cost: self.bcrypt_cost,
        }
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_origins
            .iter()
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    // Flags only: clap falls back to the process environment for anything
    // missing, so these tests pass every value they assert on.
    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("caseworks-server").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_identity_settings_flow_through() {
        let args = parse(&["--jwt-secret", "s3cret", "--token-ttl-secs", "60", "--bcrypt-cost", "12"]);
        let identity = args.identity_config();

        assert_eq!(identity.token_ttl_secs, 60);
        assert_eq!(identity.bcrypt_cost, 12);
        assert_eq!(
            identity.jwt_secret.as_ref().map(|s| s.expose_secret().as_str()),
            Some("s3cret")
        );
    }

    #[test]
    fn test_bcrypt_cost_below_ten_is_rejected() {
        let result = Args::try_parse_from(["caseworks-server", "--bcrypt-cost", "4"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cors_origins_are_comma_separated() {
        let args = parse(&["--cors-origins", "http://a.test, http://b.test,"]);
        assert_eq!(args.cors_origins(), vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_database_parts_flow_through() {
        let args = parse(&["--db-host", "db.internal", "--db-port", "6543", "--db-name", "ehr"]);
        let db = args.database_config();
        assert_eq!(db.host, "db.internal");
        assert_eq!(db.port, 6543);
        assert_eq!(db.database, "ehr");
    }

    #[test]
    fn test_secrets_are_not_debug_printed() {
        let args = parse(&["--jwt-secret", "visible-if-leaked"]);
        assert!(!format!("{:?}", args).contains("visible-if-leaked"));
    }
}
