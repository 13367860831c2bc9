//! Input validation
//!
//! Provides fluent validation for:
//! - User-submitted recipes and pantry entries
//! - Configuration files
//!
//! Data is validated where it is created; the matcher trusts what it gets.
//!
//! # Example
//!
//! ```rust
//! use virtualcook_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("title", "Shakshuka")
//!     .max_length("title", "Shakshuka", 120)
//!     .non_empty("ingredients", 4)
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use crate::error::{Error, ErrorCode, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get all warnings
    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: ValidationError) {
        self.warnings.push(warning);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Convert to Result type
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
            Err(Error::new(
                ErrorCode::ValidationError,
                format!("Validation failed: {}", messages.join("; ")),
            ))
        }
    }
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    fn fail(
        mut self,
        field: &str,
        message: String,
        code: &str,
        expected: Option<String>,
        actual: Option<String>,
    ) -> Self {
        self.result.add_error(ValidationError {
            field: field.to_string(),
            message,
            code: code.to_string(),
            expected,
            actual,
        });
        self
    }

    /// Validate that a field is not blank
    pub fn required(self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            return self.fail(
                field,
                "Field is required".to_string(),
                "REQUIRED",
                Some("non-empty value".to_string()),
                Some("empty".to_string()),
            );
        }
        self
    }

    /// Validate maximum length in characters
    pub fn max_length(self, field: &str, value: &str, max: usize) -> Self {
        let len = value.chars().count();
        if len > max {
            return self.fail(
                field,
                format!("Must be at most {} characters", max),
                "MAX_LENGTH",
                Some(format!("<= {} chars", max)),
                Some(format!("{} chars", len)),
            );
        }
        self
    }

    /// Validate that a list has at least one element
    pub fn non_empty(self, field: &str, len: usize) -> Self {
        if len == 0 {
            return self.fail(
                field,
                "At least one entry is required".to_string(),
                "NON_EMPTY",
                Some(">= 1 entry".to_string()),
                Some("0 entries".to_string()),
            );
        }
        self
    }

    /// Validate against a regex pattern
    pub fn pattern(self, field: &str, value: &str, pattern: &str, description: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) if re.is_match(value) => self,
            Ok(_) => self.fail(
                field,
                format!("Must match {}", description),
                "PATTERN",
                Some(description.to_string()),
                Some(value.to_string()),
            ),
            Err(_) => self.fail(
                field,
                "Invalid validation pattern".to_string(),
                "INTERNAL",
                None,
                None,
            ),
        }
    }

    /// Validate that a value is in a list of allowed values
    pub fn one_of(self, field: &str, value: &str, allowed: &[&str]) -> Self {
        if !allowed.contains(&value) {
            return self.fail(
                field,
                format!("Must be one of: {}", allowed.join(", ")),
                "ONE_OF",
                Some(allowed.join(", ")),
                Some(value.to_string()),
            );
        }
        self
    }

    /// Validate a numeric range (inclusive)
    pub fn range<T: PartialOrd + std::fmt::Display>(
        self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        if value < min || value > max {
            return self.fail(
                field,
                format!("Must be between {} and {}", min, max),
                "RANGE",
                Some(format!("{} - {}", min, max)),
                Some(value.to_string()),
            );
        }
        self
    }

    /// Validate that a quantity is finite and not negative
    pub fn non_negative(self, field: &str, value: f64) -> Self {
        if !value.is_finite() || value < 0.0 {
            return self.fail(
                field,
                "Must be a non-negative number".to_string(),
                "NON_NEGATIVE",
                Some(">= 0".to_string()),
                Some(value.to_string()),
            );
        }
        self
    }

    /// Add a custom validation
    pub fn custom<F>(self, field: &str, f: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        match f() {
            Some(message) => self.fail(field, message, "CUSTOM", None, None),
            None => self,
        }
    }

    /// Add a warning (non-blocking)
    pub fn warn_if(mut self, field: &str, condition: bool, message: &str) -> Self {
        if condition {
            self.result.add_warning(ValidationError {
                field: field.to_string(),
                message: message.to_string(),
                code: "WARNING".to_string(),
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Complete validation and return result
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

/// Top-level sections understood in `virtualcook.toml`
pub const KNOWN_CONFIG_SECTIONS: &[&str] = &[
    "general",
    "matcher",
    "pantry",
    "catalog",
    "logging",
    "aliases",
    "substitutes",
];

/// Warn about unknown top-level configuration sections
pub fn validate_config_sections(table: &toml::Table) -> ValidationResult {
    let mut result = ValidationResult::new();

    for key in table.keys() {
        if !KNOWN_CONFIG_SECTIONS.contains(&key.as_str()) {
            result.add_warning(ValidationError {
                field: key.clone(),
                message: format!("Unknown configuration section: {}", key),
                code: "UNKNOWN_KEY".to_string(),
                expected: Some(KNOWN_CONFIG_SECTIONS.join(", ")),
                actual: Some(key.clone()),
            });
        }
    }

    result
}
