use base64::{engine::general_purpose, Engine as _};
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

// Patterns are constant and covered by tests.
lazy_static! {
    #[allow(clippy::unwrap_used)]
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
    #[allow(clippy::unwrap_used)]
    static ref SSN_REGEX: Regex = Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").unwrap();
    #[allow(clippy::unwrap_used)]
    static ref PHONE_REGEX: Regex =
        Regex::new(r"(?:\+1[-.\s]?)?\(?\b[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b").unwrap();
    #[allow(clippy::unwrap_used)]
    static ref DATE_REGEX: Regex = Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").unwrap();
}

/// PII redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_emails: bool,
    pub redact_phones: bool,
    pub redact_ssn: bool,
    pub redact_dates: bool,
    pub hash_for_correlation: bool,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_emails: true,
            redact_phones: true,
            redact_ssn: true,
            redact_dates: true,
            hash_for_correlation: true,
        }
    }
}

/// PII redactor for log messages and structured log fields
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    /// Redact every recognised PII pattern in free text
    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        // SSN before phone: a phone pattern would otherwise eat the digits
        if self.config.redact_ssn {
            result = self.replace(&SSN_REGEX, &result, "SSN", "***-**-****");
        }

        if self.config.redact_emails {
            result = self.replace(&EMAIL_REGEX, &result, "EMAIL", "***@***");
        }

        if self.config.redact_phones {
            result = self.replace(&PHONE_REGEX, &result, "PHONE", "(***) ***-****");
        }

        if self.config.redact_dates {
            result = self.replace(&DATE_REGEX, &result, "DATE", "****-**-**");
        }

        result
    }

    /// Mask a whole structured value (a name, an id) that no pattern would catch
    pub fn mask_field(&self, label: &str, value: &str) -> String {
        if value.is_empty() {
            return String::new();
        }
        if self.config.hash_for_correlation {
            format!("{}[{}]", label, self.hash_value(value))
        } else {
            format!("{}[REDACTED]", label)
        }
    }

    fn replace(&self, pattern: &Regex, text: &str, label: &str, mask: &str) -> String {
        pattern
            .replace_all(text, |caps: &regex::Captures| {
                if self.config.hash_for_correlation {
                    format!("{}[{}]", label, self.hash_value(&caps[0]))
                } else {
                    mask.to_string()
                }
            })
            .to_string()
    }

    fn hash_value(&self, value: &str) -> String {
        let digest = Sha256::digest(value.as_bytes());
        // First 8 bytes are enough to correlate log lines
        general_purpose::STANDARD_NO_PAD.encode(digest.get(..8).unwrap_or_default())
    }
}

impl Default for PiiRedactor {
    fn default() -> Self {
        Self::new(RedactionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masking_redactor() -> PiiRedactor {
        PiiRedactor::new(RedactionConfig {
            hash_for_correlation: false,
            ..Default::default()
        })
    }

    #[test]
    fn test_email_redaction() {
        let redacted = masking_redactor().redact("User john.doe@example.com registered");
        assert_eq!(redacted, "User ***@*** registered");
    }

    #[test]
    fn test_phone_redaction() {
        let redacted = masking_redactor().redact("Call me at (555) 123-4567");
        assert!(redacted.contains("(***) ***-****"));
        assert!(!redacted.contains("4567"));
    }

    #[test]
    fn test_ssn_is_not_mistaken_for_phone() {
        let redacted = masking_redactor().redact("ssn=123-45-6789");
        assert_eq!(redacted, "ssn=***-**-****");
    }

    #[test]
    fn test_date_of_birth_redaction() {
        let redacted = masking_redactor().redact("dob=1980-04-12");
        assert_eq!(redacted, "dob=****-**-**");
    }

    #[test]
    fn test_hash_is_stable_for_correlation() {
        let redactor = PiiRedactor::default();
        let first = redactor.redact("jane@example.com");
        let second = redactor.redact("jane@example.com");
        assert_eq!(first, second);
        assert!(first.starts_with("EMAIL["));
        assert!(!first.contains("jane"));
    }

    #[test]
    fn test_mask_field() {
        let redactor = PiiRedactor::default();
        assert!(redactor.mask_field("NAME", "Smith").starts_with("NAME["));
        assert_eq!(redactor.mask_field("NAME", ""), "");
        assert_eq!(masking_redactor().mask_field("NAME", "Smith"), "NAME[REDACTED]");
    }
}
