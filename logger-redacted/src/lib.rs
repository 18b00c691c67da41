//! Logging helpers with automatic PII redaction
//!
//! Member records carry identity data (names, dates of birth, SSNs, phone
//! numbers, email addresses) that must never reach log sinks verbatim. The
//! [`PiiRedactor`] replaces recognised values with short correlation hashes
//! so that log lines about the same person can still be matched up.
//!
//! # Detected Data Types
//!
//! - **Email Addresses**: `user@example.com` → `EMAIL[hash]`
//! - **Phone Numbers**: `(555) 123-4567` → `PHONE[hash]`
//! - **SSN**: `123-45-6789` → `SSN[hash]`
//! - **Dates**: `1980-04-12` → `DATE[hash]`
//!
//! Names cannot be detected by pattern; callers mask them explicitly with
//! [`mask`].
//!
//! [`RedactingMakeWriter`] applies the redactor to every record a
//! `tracing-subscriber` fmt layer writes, whatever its format.
//!
//! # Example
//!
//! ```rust
//! let line = logger_redacted::redact("Searching phone 555-123-4567");
//! assert!(!line.contains("4567"));
//! ```

pub mod config;
pub mod redactor;
pub mod writer;

pub use config::*;
pub use redactor::*;
pub use writer::RedactingMakeWriter;

use lazy_static::lazy_static;

lazy_static! {
    static ref DEFAULT_REDACTOR: PiiRedactor = PiiRedactor::default();
}

/// Redact free text with the default configuration
pub fn redact(text: &str) -> String {
    DEFAULT_REDACTOR.redact(text)
}

/// Mask a structured field with the default configuration
pub fn mask(label: &str, value: &str) -> String {
    DEFAULT_REDACTOR.mask_field(label, value)
}
