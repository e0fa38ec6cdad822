// Validation errors

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single rule violation for a field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Field name that failed validation
    pub field: String,

    /// Human-readable candidate message
    pub message: String,

    /// Identifier of the rule that failed
    pub constraint: String,

    /// Value that failed validation (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Violation {
    /// Create a new violation
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            constraint: "custom".to_string(),
            value: None,
        }
    }

    /// Set the constraint name
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = constraint.into();
        self
    }

    /// Set the invalid value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for Violation {}

/// Structured failure of a composite rule.
///
/// Holds every violation raised while asserting a value, in rule order.
/// Several violations may share a constraint when the composite contains
/// more than one rule with the same identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssertionFailure {
    pub field: String,
    pub violations: Vec<Violation>,
}

impl AssertionFailure {
    pub fn new(field: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            field: field.into(),
            violations,
        }
    }

    /// Whether the rule with this identifier failed
    pub fn failed(&self, identifier: &str) -> bool {
        self.violations.iter().any(|v| v.constraint == identifier)
    }

    /// First candidate message raised by the rule with this identifier
    pub fn find_message(&self, identifier: &str) -> Option<&str> {
        self.violations
            .iter()
            .find(|v| v.constraint == identifier)
            .map(|v| v.message.as_str())
    }

    /// All candidate messages raised by the rule with this identifier
    pub fn messages_for<'a>(&'a self, identifier: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.violations
            .iter()
            .filter(move |v| v.constraint == identifier)
            .map(|v| v.message.as_str())
    }

    /// Identifiers of the failed rules, in order, without repeats
    pub fn identifiers(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.violations.len());
        for violation in &self.violations {
            if !seen.contains(&violation.constraint.as_str()) {
                seen.push(&violation.constraint);
            }
        }
        seen
    }

    /// Every candidate message, in order
    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed {} rule(s)", self.field, self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n  - {}", violation.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for AssertionFailure {}

/// Misconfigured rule definitions.
///
/// These are programmer mistakes. They abort a validation pass and are
/// never recorded as parameter errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Validation rules are missing for parameter '{param}'")]
    MissingRules { param: String },
}

impl From<ValidationError> for rampart_core::Error {
    fn from(error: ValidationError) -> Self {
        rampart_core::Error::Internal(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> AssertionFailure {
        AssertionFailure::new(
            "password",
            vec![
                Violation::new("password", "password must be at least 8 characters")
                    .with_constraint("length"),
                Violation::new("password", "password must contain only digits")
                    .with_constraint("digit"),
                Violation::new("password", "password must be at most 4 characters")
                    .with_constraint("length"),
            ],
        )
    }

    #[test]
    fn test_violation_builder() {
        let violation = Violation::new("email", "invalid email format")
            .with_constraint("email")
            .with_value("nope");

        assert_eq!(violation.field, "email");
        assert_eq!(violation.constraint, "email");
        assert_eq!(violation.value.as_deref(), Some("nope"));
        assert_eq!(violation.to_string(), "email: invalid email format");
    }

    #[test]
    fn test_default_constraint() {
        assert_eq!(Violation::new("x", "bad").constraint, "custom");
    }

    #[test]
    fn test_failure_lookup() {
        let failure = failure();
        assert!(failure.failed("length"));
        assert!(failure.failed("digit"));
        assert!(!failure.failed("email"));
        assert_eq!(
            failure.find_message("length"),
            Some("password must be at least 8 characters")
        );
        assert_eq!(failure.find_message("email"), None);
        assert_eq!(failure.messages_for("length").count(), 2);
    }

    #[test]
    fn test_failure_identifiers_deduplicated() {
        assert_eq!(failure().identifiers(), vec!["length", "digit"]);
        assert_eq!(failure().len(), 3);
    }

    #[test]
    fn test_missing_rules_message() {
        let err = ValidationError::MissingRules {
            param: "age".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Validation rules are missing for parameter 'age'"
        );

        let core: rampart_core::Error = err.into();
        assert_eq!(core.status_code(), 500);
    }
}
