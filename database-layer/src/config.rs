use crate::error::{DatabaseError, DatabaseResult};
use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgConnectOptions;
use std::str::FromStr;

/// Connection parameters for the Postgres backend
///
/// Either a full `database_url` or the individual `DB_*` style parts. The
/// URL wins when both are present.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: Option<SecretString>,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: Option<SecretString>,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> DatabaseResult<PgConnectOptions> {
        if let Some(url) = &self.database_url {
            return PgConnectOptions::from_str(url.expose_secret())
                .map_err(|e| DatabaseError::ConfigurationError(format!("invalid database url: {}", e)));
        }

        if self.host.trim().is_empty() {
            return Err(DatabaseError::ConfigurationError("database host is empty".to_string()));
        }
        if self.database.trim().is_empty() {
            return Err(DatabaseError::ConfigurationError("database name is empty".to_string()));
        }

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user);

        if let Some(password) = &self.password {
            options = options.password(password.expose_secret());
        }

        Ok(options)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            host: "localhost".to_string(),
            port: 5432,
            database: "caseworks".to_string(),
            user: "postgres".to_string(),
            password: None,
            max_connections: 10,
        }
    }
}
