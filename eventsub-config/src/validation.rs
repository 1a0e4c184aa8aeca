// Configuration validation

use crate::{ConfigError, Result};

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Configuration validator with rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate that a value is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    /// Validate that a number is within range
    pub fn in_range<T: PartialOrd + std::fmt::Display>(
        value: T,
        min: T,
        max: T,
        field: &str,
    ) -> Result<()> {
        if value < min || value > max {
            return Err(ConfigError::ValidationError(format!(
                "{} must be between {} and {}",
                field, min, max
            )));
        }
        Ok(())
    }

    /// Validate that a value only holds ASCII characters and has a length
    /// within range
    pub fn ascii_length(value: &str, min: usize, max: usize, field: &str) -> Result<()> {
        if !value.is_ascii() {
            return Err(ConfigError::ValidationError(format!(
                "{} must only contain ASCII characters",
                field
            )));
        }
        Self::in_range(value.len(), min, max, &format!("{} length", field))
    }

    /// Validate URL format
    pub fn is_url(value: &str, field: &str) -> Result<()> {
        let rest = value
            .strip_prefix("https://")
            .or_else(|| value.strip_prefix("http://"));
        if rest.is_none_or(|host| host.is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "{} must be a valid URL",
                field
            )));
        }
        Ok(())
    }

    /// Validate that a URL uses TLS
    pub fn is_https_url(value: &str, field: &str) -> Result<()> {
        Self::is_url(value, field)?;
        if !value.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "{} must use https",
                field
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty_validation() {
        assert!(ConfigValidator::not_empty("value", "field").is_ok());
        assert!(ConfigValidator::not_empty("", "field").is_err());
        assert!(ConfigValidator::not_empty("   ", "field").is_err());
    }

    #[test]
    fn test_range_validation() {
        assert!(ConfigValidator::in_range(5, 1, 10, "field").is_ok());
        assert!(ConfigValidator::in_range(0, 1, 10, "field").is_err());
        assert!(ConfigValidator::in_range(11, 1, 10, "field").is_err());
    }

    #[test]
    fn test_ascii_length_validation() {
        assert!(ConfigValidator::ascii_length("0123456789", 10, 100, "secret").is_ok());
        assert!(ConfigValidator::ascii_length("short", 10, 100, "secret").is_err());
        assert!(ConfigValidator::ascii_length(&"x".repeat(101), 10, 100, "secret").is_err());
        assert!(ConfigValidator::ascii_length("päßwörter-12345", 10, 100, "secret").is_err());
    }

    #[test]
    fn test_url_validation() {
        assert!(ConfigValidator::is_url("https://example.com", "field").is_ok());
        assert!(ConfigValidator::is_url("http://localhost:8080", "field").is_ok());
        assert!(ConfigValidator::is_url("example.com", "field").is_err());
        assert!(ConfigValidator::is_url("https://", "field").is_err());
    }

    #[test]
    fn test_https_validation() {
        assert!(ConfigValidator::is_https_url("https://example.com/cb", "field").is_ok());
        assert!(ConfigValidator::is_https_url("http://example.com/cb", "field").is_err());
    }

    #[test]
    fn test_error_names_field() {
        let error = ConfigValidator::in_range(0u64, 1, 300, "request_timeout_secs").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Validation error: request_timeout_secs must be between 1 and 300"
        );
    }
}
