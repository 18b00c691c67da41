//! Payload validation helpers
//!
//! Bounds mirror the column widths of the `members` table so oversize
//! input is rejected as a validation error instead of a storage error.

use crate::error::RegistryError;

/// Implemented by every write payload the registry accepts
pub trait RequestValidation {
    fn validate(&self) -> Result<(), RegistryError>;
}

/// Fail with a validation error unless `$predicate` holds
#[macro_export]
macro_rules! validate_field {
    ($predicate:expr, $message:expr) => {
        if !$predicate {
            return Err($crate::error::RegistryError::Validation($message.to_string()));
        }
    };
}

/// Non-blank string no longer than `$max` characters
#[macro_export]
macro_rules! validate_required {
    ($field:expr, $max:expr, $name:expr) => {
        $crate::validate_field!(!$field.trim().is_empty(), format!("{} is required", $name));
        $crate::validate_field!(
            $field.chars().count() <= $max,
            format!("{} must be at most {} characters", $name, $max)
        );
    };
}

/// Optional string no longer than `$max` characters when present
#[macro_export]
macro_rules! validate_optional_length {
    ($field:expr, $max:expr, $name:expr) => {
        if let Some(value) = $field.as_deref() {
            $crate::validate_field!(
                value.chars().count() <= $max,
                format!("{} must be at most {} characters", $name, $max)
            );
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        name: String,
        city: Option<String>,
    }

    impl RequestValidation for Sample {
        fn validate(&self) -> Result<(), RegistryError> {
            validate_required!(self.name, 5, "name");
            validate_optional_length!(self.city, 3, "city");
            Ok(())
        }
    }

    fn sample(name: &str, city: Option<&str>) -> Sample {
        Sample {
            name: name.to_string(),
            city: city.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_payload() {
        assert!(sample("Ada", None).validate().is_ok());
        assert!(sample("Ada", Some("NYC")).validate().is_ok());
    }

    #[test]
    fn test_blank_required_field() {
        let err = sample("   ", None).validate().unwrap_err();
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_overlong_fields() {
        let err = sample("Adelaide", None).validate().unwrap_err();
        assert_eq!(err.to_string(), "name must be at most 5 characters");

        let err = sample("Ada", Some("Boston")).validate().unwrap_err();
        assert_eq!(err.to_string(), "city must be at most 3 characters");
    }
}
