//! Idempotent schema bootstrap
//!
//! Creates the three tables the service works against when they are
//! missing. This is not a migration system: statements only ever use
//! `IF NOT EXISTS` and never alter existing tables.

use crate::connection::DatabasePool;
use crate::error::{DatabaseError, DatabaseResult};
use sqlx::Executor;
use tracing::{debug, info};

pub const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    username VARCHAR(50) NOT NULL UNIQUE,
    password_hash VARCHAR(100) NOT NULL,
    first_name VARCHAR(50),
    last_name VARCHAR(50),
    email VARCHAR(100),
    is_superuser BOOLEAN NOT NULL DEFAULT FALSE,
    created_on TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    created_by VARCHAR(50)
)
"#;

pub const CREATE_CLIENTS: &str = r#"
CREATE TABLE IF NOT EXISTS clients (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    status VARCHAR(50) NOT NULL,
    case_worker_id VARCHAR(50) NOT NULL
)
"#;

// No uniqueness on (first_name, last_name, date_of_birth): duplicate
// detection is advisory only.
pub const CREATE_MEMBERS: &str = r#"
CREATE TABLE IF NOT EXISTS members (
    id SERIAL PRIMARY KEY,
    first_name VARCHAR(50) NOT NULL,
    last_name VARCHAR(50) NOT NULL,
    date_of_birth DATE NOT NULL,
    gender VARCHAR(10),
    social_security_number VARCHAR(11),
    address VARCHAR(100),
    city VARCHAR(50),
    state VARCHAR(2),
    zip_code VARCHAR(10),
    phone_number VARCHAR(15),
    email VARCHAR(100),
    emergency_contact_name VARCHAR(100),
    emergency_contact_phone VARCHAR(15),
    blood_type VARCHAR(3),
    allergies TEXT,
    medical_conditions TEXT,
    medications TEXT,
    insurance_provider VARCHAR(50),
    insurance_policy_number VARCHAR(50),
    primary_care_physician VARCHAR(100),
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

pub const CREATE_MEMBERS_LAST_NAME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_members_last_name ON members(last_name)";

pub const CREATE_MODIFIED_FUNCTION: &str = r#"
CREATE OR REPLACE FUNCTION update_modified_column()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql
"#;

pub const CREATE_MEMBERS_TRIGGER: &str = r#"
DO $$
BEGIN
    IF NOT EXISTS (SELECT 1 FROM pg_trigger WHERE tgname = 'update_member_modtime') THEN
        CREATE TRIGGER update_member_modtime
        BEFORE UPDATE ON members
        FOR EACH ROW
        EXECUTE FUNCTION update_modified_column();
    END IF;
END $$
"#;

/// Statements in execution order
pub const BOOTSTRAP_STATEMENTS: [(&str, &str); 6] = [
    ("users", CREATE_USERS),
    ("clients", CREATE_CLIENTS),
    ("members", CREATE_MEMBERS),
    ("idx_members_last_name", CREATE_MEMBERS_LAST_NAME_INDEX),
    ("update_modified_column", CREATE_MODIFIED_FUNCTION),
    ("update_member_modtime", CREATE_MEMBERS_TRIGGER),
];

/// Create any missing tables, index, and trigger
pub async fn initialize_schema(db: &DatabasePool) -> DatabaseResult<()> {
    for (name, statement) in BOOTSTRAP_STATEMENTS {
        debug!(object = name, "Applying schema statement");
        db.pool()
            .execute(statement)
            .await
            .map_err(|e| DatabaseError::SchemaFailed(format!("{}: {}", name, e)))?;
    }

    info!("Database schema initialized");
    Ok(())
}
