//! Parameter validation for Rampart
//!
//! Validates named request parameters against per-parameter rules and
//! collects human-readable error messages per parameter.
//!
//! # Examples
//!
//! ## Validating a request
//!
//! ```
//! use rampart_core::HttpRequest;
//! use rampart_validation::{messages, rules, Email, Length, NotEmpty, Required, Validator};
//!
//! let req = HttpRequest::new("POST", "/signup")
//!     .with_form_body("name=Jo&email=not-an-email&password=");
//!
//! let rules = rules! {
//!     "name" => [Required, Length::min(2)],
//!     "email" => [NotEmpty, Email],
//!     "password" => [NotEmpty, Length::min(8)] with { "length" => "Password is too short" },
//! };
//! let global = messages! { "notEmpty" => "This field is required" };
//!
//! let mut validator = Validator::new();
//! validator.validate(&req, &rules, &global).unwrap();
//!
//! assert!(!validator.is_valid());
//! assert!(validator.errors_of("name").is_empty());
//! assert_eq!(validator.errors_of("email"), ["email"]);
//! assert_eq!(
//!     validator.errors_of("password"),
//!     ["This field is required", "Password is too short"]
//! );
//! ```
//!
//! ## Custom rules
//!
//! ```
//! use rampart_validation::{Rules, Violation};
//! use serde_json::json;
//!
//! let rules = Rules::new().add("even", |value, field| match value.as_i64() {
//!     Some(n) if n % 2 == 0 => Ok(()),
//!     _ => Err(Violation::new(field, format!("{} must be even", field))),
//! });
//!
//! assert!(rules.is_valid(&json!(4)));
//! assert!(!rules.is_valid(&json!(3)));
//! ```

mod errors;
pub mod identifier;
mod messages;
mod pipe;
mod rule;
mod spec;
mod validator;
mod validators;

pub use errors::{AssertionFailure, Result, ValidationError, Violation};
pub use messages::{Fallback, Message, Messages, resolve};
pub use pipe::ValidationPipe;
pub use rule::{FnRule, Rule, Rules};
pub use spec::{RuleSet, RuleSpec};
pub use validator::Validator;
pub use validators::*;
