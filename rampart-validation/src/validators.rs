// Built-in rules

use crate::{Rule, Violation};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;

// Common regex patterns
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

static ALPHA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

static ALNUM_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

static DIGIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Scalar view of a value: strings as-is, numbers and booleans formatted.
fn text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn display(value: &Value) -> String {
    match text(value) {
        Some(text) => text.into_owned(),
        None => value.to_string(),
    }
}

fn is_blank(value: &Value, trim: bool) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) if trim => s.trim().is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn pattern_rule(
    regex: &Regex,
    value: &Value,
    field: &str,
    message: String,
) -> Result<(), Violation> {
    match text(value) {
        Some(text) if regex.is_match(&text) => Ok(()),
        _ => Err(Violation::new(field, message).with_value(display(value))),
    }
}

// Presence rules

/// Value must be present and not empty
pub struct Required;

impl Rule for Required {
    fn name(&self) -> &str {
        "required"
    }

    fn validate(&self, value: &Value, field: &str) -> Result<(), Violation> {
        if is_blank(value, false) {
            Err(Violation::new(field, format!("{} is required", field)))
        } else {
            Ok(())
        }
    }
}

/// Value must not be empty; whitespace-only strings count as empty
pub struct NotEmpty;

impl Rule for NotEmpty {
    fn name(&self) -> &str {
        "notEmpty"
    }

    fn validate(&self, value: &Value, field: &str) -> Result<(), Violation> {
        if is_blank(value, true) {
            Err(Violation::new(
                field,
                format!("{} should not be empty", field),
            ))
        } else {
            Ok(())
        }
    }
}

// String rules

/// Length bounds, in characters for strings and items for arrays
pub struct Length {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl Length {
    pub fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn max(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    fn measure(value: &Value) -> Option<usize> {
        match value {
            Value::Array(items) => Some(items.len()),
            other => text(other).map(|text| text.chars().count()),
        }
    }

    fn describe(&self, field: &str) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => {
                format!("{} must be between {} and {} characters", field, min, max)
            }
            (Some(min), None) => format!("{} must be at least {} characters", field, min),
            (None, Some(max)) => format!("{} must be at most {} characters", field, max),
            (None, None) => format!("{} must have a length", field),
        }
    }
}

impl Rule for Length {
    fn name(&self) -> &str {
        "length"
    }

    fn validate(&self, value: &Value, field: &str) -> Result<(), Violation> {
        let fits = Self::measure(value).is_some_and(|len| {
            self.min.is_none_or(|min| len >= min) && self.max.is_none_or(|max| len <= max)
        });

        if fits {
            Ok(())
        } else {
            Err(Violation::new(field, self.describe(field)).with_value(display(value)))
        }
    }
}

/// Email address format
pub struct Email;

impl Rule for Email {
    fn name(&self) -> &str {
        "email"
    }

    fn validate(&self, value: &Value, field: &str) -> Result<(), Violation> {
        pattern_rule(
            &EMAIL_REGEX,
            value,
            field,
            format!("{} must be a valid email", field),
        )
    }
}

/// HTTP(S) URL format
pub struct Url;

impl Rule for Url {
    fn name(&self) -> &str {
        "url"
    }

    fn validate(&self, value: &Value, field: &str) -> Result<(), Violation> {
        pattern_rule(
            &URL_REGEX,
            value,
            field,
            format!("{} must be a valid URL", field),
        )
    }
}

/// Hyphenated UUID format
pub struct Uuid;

impl Rule for Uuid {
    fn name(&self) -> &str {
        "uuid"
    }

    fn validate(&self, value: &Value, field: &str) -> Result<(), Violation> {
        pattern_rule(
            &UUID_REGEX,
            value,
            field,
            format!("{} must be a valid UUID", field),
        )
    }
}

/// ASCII letters only
pub struct Alpha;

impl Rule for Alpha {
    fn name(&self) -> &str {
        "alpha"
    }

    fn validate(&self, value: &Value, field: &str) -> Result<(), Violation> {
        pattern_rule(
            &ALPHA_REGEX,
            value,
            field,
            format!("{} must contain only letters", field),
        )
    }
}

/// ASCII letters and digits only
pub struct Alnum;

impl Rule for Alnum {
    fn name(&self) -> &str {
        "alnum"
    }

    fn validate(&self, value: &Value, field: &str) -> Result<(), Violation> {
        pattern_rule(
            &ALNUM_REGEX,
            value,
            field,
            format!("{} must contain only letters and numbers", field),
        )
    }
}

/// Digits only
pub struct Digit;

impl Rule for Digit {
    fn name(&self) -> &str {
        "digit"
    }

    fn validate(&self, value: &Value, field: &str) -> Result<(), Violation> {
        pattern_rule(
            &DIGIT_REGEX,
            value,
            field,
            format!("{} must contain only numbers", field),
        )
    }
}

/// Custom regex
pub struct Matches(pub Regex);

impl Matches {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self(Regex::new(pattern)?))
    }
}

impl Rule for Matches {
    fn name(&self) -> &str {
        "matches"
    }

    fn validate(&self, value: &Value, field: &str) -> Result<(), Violation> {
        pattern_rule(
            &self.0,
            value,
            field,
            format!("{} does not match required pattern", field),
        )
    }
}

/// Value must be one of a fixed set
pub struct In(pub Vec<String>);

impl In {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(allowed.into_iter().map(Into::into).collect())
    }
}

impl Rule for In {
    fn name(&self) -> &str {
        "in"
    }

    fn validate(&self, value: &Value, field: &str) -> Result<(), Violation> {
        match text(value) {
            Some(text) if self.0.iter().any(|allowed| *allowed == text) => Ok(()),
            _ => Err(Violation::new(
                field,
                format!("{} must be one of: {}", field, self.0.join(", ")),
            )
            .with_value(display(value))),
        }
    }
}

// Number rules

/// Integer value, or a string holding one
pub struct IntVal;

impl Rule for IntVal {
    fn name(&self) -> &str {
        "intVal"
    }

    fn validate(&self, value: &Value, field: &str) -> Result<(), Violation> {
        let is_int = match value {
            Value::Number(n) => n.is_i64() || n.is_u64(),
            Value::String(s) => s.trim().parse::<i64>().is_ok(),
            _ => false,
        };

        if is_int {
            Ok(())
        } else {
            Err(
                Violation::new(field, format!("{} must be an integer number", field))
                    .with_value(display(value)),
            )
        }
    }
}

/// Minimum numeric value, inclusive
pub struct Min(pub f64);

impl Rule for Min {
    fn name(&self) -> &str {
        "min"
    }

    fn validate(&self, value: &Value, field: &str) -> Result<(), Violation> {
        match number(value) {
            Some(n) if n >= self.0 => Ok(()),
            _ => Err(
                Violation::new(field, format!("{} must be at least {}", field, self.0))
                    .with_value(display(value)),
            ),
        }
    }
}

/// Maximum numeric value, inclusive
pub struct Max(pub f64);

impl Rule for Max {
    fn name(&self) -> &str {
        "max"
    }

    fn validate(&self, value: &Value, field: &str) -> Result<(), Violation> {
        match number(value) {
            Some(n) if n <= self.0 => Ok(()),
            _ => Err(
                Violation::new(field, format!("{} must be at most {}", field, self.0))
                    .with_value(display(value)),
            ),
        }
    }
}

/// Numeric value within an inclusive range
pub struct Between {
    pub min: f64,
    pub max: f64,
}

impl Between {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl Rule for Between {
    fn name(&self) -> &str {
        "between"
    }

    fn validate(&self, value: &Value, field: &str) -> Result<(), Violation> {
        match number(value) {
            Some(n) if n >= self.min && n <= self.max => Ok(()),
            _ => Err(Violation::new(
                field,
                format!("{} must be between {} and {}", field, self.min, self.max),
            )
            .with_value(display(value))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok<R: Rule>(rule: &R, value: Value) -> bool {
        rule.validate(&value, "field").is_ok()
    }

    #[test]
    fn test_required() {
        assert!(ok(&Required, json!("x")));
        assert!(ok(&Required, json!(0)));
        assert!(ok(&Required, json!("  ")));
        assert!(!ok(&Required, json!("")));
        assert!(!ok(&Required, Value::Null));
        assert!(!ok(&Required, json!([])));
    }

    #[test]
    fn test_not_empty() {
        assert!(ok(&NotEmpty, json!("test")));
        assert!(ok(&NotEmpty, json!(false)));
        assert!(!ok(&NotEmpty, json!("")));
        assert!(!ok(&NotEmpty, json!("\t\n  \r")));
        assert!(!ok(&NotEmpty, json!({})));
    }

    #[test]
    fn test_required_message() {
        let violation = Required.validate(&json!(""), "age").unwrap_err();
        assert_eq!(violation.message, "age is required");
    }

    #[test]
    fn test_length() {
        assert!(ok(&Length::min(5), json!("exact")));
        assert!(!ok(&Length::min(5), json!("four")));
        assert!(ok(&Length::max(5), json!("exact")));
        assert!(!ok(&Length::max(5), json!("sixsix")));
        assert!(ok(&Length::between(1, 2), json!(["a", "b"])));
        assert!(!ok(&Length::between(1, 2), json!([])));
        assert!(!ok(&Length::min(1), Value::Null));
    }

    #[test]
    fn test_length_counts_characters() {
        // six bytes, five characters
        assert!(ok(&Length::max(5), json!("héllo")));
        assert!(ok(&Length::between(5, 5), json!("héllo")));
    }

    #[test]
    fn test_length_message() {
        let violation = Length::min(8).validate(&json!("short"), "password").unwrap_err();
        assert_eq!(violation.message, "password must be at least 8 characters");
        assert_eq!(violation.value.as_deref(), Some("short"));
    }

    #[test]
    fn test_email() {
        assert!(ok(&Email, json!("user+tag@example.com")));
        assert!(ok(&Email, json!("user.name@example.co.uk")));
        assert!(!ok(&Email, json!("@example.com")));
        assert!(!ok(&Email, json!("user@")));
        assert!(!ok(&Email, json!("")));
        assert!(!ok(&Email, json!(["user@example.com"])));
    }

    #[test]
    fn test_url() {
        assert!(ok(&Url, json!("https://example.com")));
        assert!(ok(&Url, json!("http://localhost:8080/path")));
        assert!(!ok(&Url, json!("//example.com")));
        assert!(!ok(&Url, json!("not a url")));
    }

    #[test]
    fn test_uuid() {
        assert!(ok(&Uuid, json!("550e8400-e29b-41d4-a716-446655440000")));
        assert!(!ok(&Uuid, json!("123e4567e89b12d3a456426614174000")));
        assert!(!ok(&Uuid, json!("")));
    }

    #[test]
    fn test_character_classes() {
        assert!(ok(&Alpha, json!("abcXYZ")));
        assert!(!ok(&Alpha, json!("abc xyz")));
        assert!(ok(&Alnum, json!("abc123")));
        assert!(!ok(&Alnum, json!("abc@123")));
        assert!(ok(&Digit, json!("12345")));
        assert!(ok(&Digit, json!(12345)));
        assert!(!ok(&Digit, json!("123.45")));
        assert!(!ok(&Digit, json!("")));
    }

    #[test]
    fn test_matches() {
        let rule = Matches::new(r"^\d{3}-\d{3}-\d{4}$").unwrap();
        assert!(ok(&rule, json!("123-456-7890")));
        assert!(!ok(&rule, json!("invalid")));
        assert!(Matches::new("(").is_err());
    }

    #[test]
    fn test_in() {
        let rule = In::new(["red", "green"]);
        assert!(ok(&rule, json!("red")));
        assert!(!ok(&rule, json!("blue")));
        let violation = rule.validate(&json!("blue"), "color").unwrap_err();
        assert_eq!(violation.message, "color must be one of: red, green");
    }

    #[test]
    fn test_int_val() {
        assert!(ok(&IntVal, json!(42)));
        assert!(ok(&IntVal, json!("-7")));
        assert!(!ok(&IntVal, json!(4.2)));
        assert!(!ok(&IntVal, json!("4.2")));
        assert!(!ok(&IntVal, json!("")));
    }

    #[test]
    fn test_min_max_between() {
        assert!(ok(&Min(18.0), json!(25)));
        assert!(ok(&Min(18.0), json!("18")));
        assert!(!ok(&Min(18.0), json!(17)));
        assert!(!ok(&Min(18.0), json!("abc")));
        assert!(ok(&Max(100.0), json!(50)));
        assert!(!ok(&Max(100.0), json!(150)));
        assert!(ok(&Between::new(0.0, 10.0), json!(0)));
        assert!(ok(&Between::new(0.0, 10.0), json!(10)));
        assert!(!ok(&Between::new(0.0, 10.0), json!(-1)));
        assert!(!ok(&Between::new(0.0, 10.0), json!(11)));
    }

    #[test]
    fn test_rule_names() {
        let names = [
            Required.name().to_string(),
            NotEmpty.name().to_string(),
            Length::min(1).name().to_string(),
            Email.name().to_string(),
            IntVal.name().to_string(),
            Between::new(0.0, 1.0).name().to_string(),
        ];
        assert_eq!(
            names,
            ["required", "notEmpty", "length", "email", "intVal", "between"]
        );
    }

    #[test]
    fn test_names_follow_type_names() {
        assert_eq!(crate::identifier::of::<NotEmpty>(), NotEmpty.name());
        assert_eq!(crate::identifier::of::<IntVal>(), IntVal.name());
        assert_eq!(crate::identifier::of::<Email>(), Email.name());
    }
}
