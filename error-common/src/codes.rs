// Standardized error codes for Caseworks

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
}

pub mod authentication {
    pub const INVALID_CREDENTIALS: &str = "AUTH_2001";
    pub const TOKEN_MISSING: &str = "AUTH_2002";
    pub const TOKEN_INVALID: &str = "AUTH_2003";
}

pub mod resource {
    pub const NOT_FOUND: &str = "RESOURCE_3001";
    pub const CONFLICT: &str = "RESOURCE_3002";
}

pub mod database {
    pub const QUERY_FAILED: &str = "DB_4002";
}

pub mod config {
    pub const MISSING_SETTING: &str = "CONFIG_5001";
}

pub mod server {
    pub const NETWORK: &str = "SERVER_6001";
    pub const INTERNAL: &str = "SERVER_6002";
}
