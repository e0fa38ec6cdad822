// Validation pipe for turning validator state into HTTP errors

use crate::Validator;
use rampart_core::{Error, HttpResponse};
use serde_json::{Value, json};
use std::collections::HashMap;

/// Maps a finished validation pass onto the framework error surface
pub struct ValidationPipe;

impl ValidationPipe {
    /// `Ok` when the validator holds no errors, otherwise
    /// [`Error::Validation`] carrying the JSON error body
    pub fn check(validator: &Validator) -> Result<(), Error> {
        if validator.is_valid() {
            return Ok(());
        }
        Err(Error::Validation(Self::error_body(validator).to_string()))
    }

    /// Transform validation errors to HTTP response
    pub fn error_response(validator: &Validator) -> HttpResponse {
        HttpResponse {
            status: 400,
            headers: HashMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )]),
            body: Self::error_body(validator).to_string().into_bytes(),
        }
    }

    fn error_body(validator: &Validator) -> Value {
        json!({ "errors": validator.errors() })
    }
}

/// Build a [`RuleSet`](crate::RuleSet) literal.
///
/// Each parameter takes a list of rules and, optionally, its own message
/// overrides after `with`.
///
/// ```
/// use rampart_validation::{rules, Email, Length, NotEmpty, Required};
///
/// let rules = rules! {
///     "name" => [Required, Length::min(2)],
///     "email" => [NotEmpty, Email] with { "email" => "That is not an email address" },
/// };
/// assert_eq!(rules.names(), vec!["name", "email"]);
/// ```
#[macro_export]
macro_rules! rules {
    ($($param:expr => [$($rule:expr),* $(,)?] $(with { $($id:expr => $text:expr),* $(,)? })?),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut set = $crate::RuleSet::new();
        $(
            set.insert(
                $param,
                $crate::RuleSpec::Options {
                    rules: Some($crate::Rules::new()$(.rule($rule))*),
                    messages: None$(.or(Some($crate::messages! { $($id => $text),* })))?,
                },
            );
        )*
        set
    }};
}

/// Build a [`Messages`](crate::Messages) literal of text overrides
///
/// ```
/// use rampart_validation::{messages, Message};
///
/// let messages = messages! { "required" => "Field required", "email" => "Bad email" };
/// assert_eq!(messages.get("email"), Some(&Message::Text("Bad email".into())));
/// ```
#[macro_export]
macro_rules! messages {
    ($($id:expr => $text:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut messages = $crate::Messages::new();
        $( messages.insert($id, $text); )*
        messages
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Email, Messages, NotEmpty, Required};
    use serde_json::json;

    fn failed_validator() -> Validator {
        let mut validator = Validator::new();
        validator.add_error("email", "email");
        validator
    }

    #[test]
    fn test_check_valid() {
        assert!(ValidationPipe::check(&Validator::new()).is_ok());
    }

    #[test]
    fn test_check_invalid() {
        let err = ValidationPipe::check(&failed_validator()).unwrap_err();
        assert_eq!(err.status_code(), 400);
        match err {
            Error::Validation(body) => {
                let body: Value = serde_json::from_str(&body).unwrap();
                assert_eq!(body, json!({"errors": {"email": ["email"]}}));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_response() {
        let response = ValidationPipe::error_response(&failed_validator());
        assert_eq!(response.status, 400);
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        let body: Value = response.json().unwrap();
        assert_eq!(body, json!({"errors": {"email": ["email"]}}));
    }

    #[test]
    fn test_rules_macro() {
        let set = rules! {
            "name" => [Required],
            "email" => [NotEmpty, Email] with { "email" => "Bad email", "notEmpty" => "" },
        };

        assert_eq!(set.names(), vec!["name", "email"]);
        let email = set.get("email").unwrap();
        assert_eq!(
            email.rules("email").unwrap().identifiers(),
            vec!["notEmpty", "email"]
        );
        assert_eq!(email.messages().map(Messages::len), Some(2));
        assert!(set.get("name").unwrap().messages().is_none());
    }

    #[test]
    fn test_empty_macros() {
        assert!(rules! {}.is_empty());
        assert!(messages! {}.is_empty());
    }
}
