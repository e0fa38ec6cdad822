//! Validator state and the validation pass
//!
//! A [`Validator`] owns two insertion-ordered maps: the raw `data` read from
//! the request, and the `errors` recorded per parameter.
//!
//! State accumulates across passes. Calling [`Validator::validate`] again on
//! the same instance overwrites entries for the parameters it covers and
//! leaves every other entry alone, including stale errors for parameters
//! that failed earlier but are not part of the new pass, and an error entry
//! for a parameter that now passes. Use [`Validator::set_errors`] and
//! [`Validator::set_data`] (or a fresh instance) to start over.

use crate::messages::{Fallback, Messages, resolve};
use crate::{RuleSet, ValidationError};
use indexmap::IndexMap;
use rampart_core::ParamSource;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, trace};

static NULL: Value = Value::Null;

/// Validates request parameters and collects per-parameter error messages.
///
/// ```
/// use rampart_core::HttpRequest;
/// use rampart_validation::{Messages, Required, RuleSet, RuleSpec, Rules, Validator};
///
/// let req = HttpRequest::new("POST", "/profile").with_form_body("name=John&age=");
/// let rules = RuleSet::new()
///     .param("name", Rules::new().rule(Required))
///     .param(
///         "age",
///         RuleSpec::with_messages(Rules::new().rule(Required), [("required", "Age is mandatory")]),
///     );
///
/// let mut validator = Validator::new();
/// validator.validate(&req, &rules, &Messages::new()).unwrap();
///
/// assert!(!validator.is_valid());
/// assert_eq!(validator.errors_of("age"), ["Age is mandatory"]);
/// assert!(validator.errors_of("name").is_empty());
/// assert_eq!(validator.value("name"), "John");
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct Validator {
    errors: IndexMap<String, Vec<String>>,
    data: IndexMap<String, Value>,
    #[serde(skip)]
    fallback: Fallback,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the message used when no override exists for a failed rule
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn fallback(&self) -> Fallback {
        self.fallback
    }

    /// Validate request parameters against `rules`.
    ///
    /// Every named parameter is read from `request` and stored in the data
    /// map whether or not it passes. A parameter that fails gets its resolved
    /// messages stored under its name, even when overrides leave that list
    /// empty; a parameter that passes is left untouched in the error map.
    ///
    /// Ordinary validation failures never produce an `Err`. A parameter
    /// whose definition carries no rules aborts the pass with
    /// [`ValidationError::MissingRules`]; its value is stored first and
    /// parameters already processed keep their results.
    pub fn validate<R>(
        &mut self,
        request: &R,
        rules: &RuleSet,
        messages: &Messages,
    ) -> Result<&mut Self, ValidationError>
    where
        R: ParamSource + ?Sized,
    {
        for (param, spec) in rules.iter() {
            let value = request.get_param(param);
            self.data.insert(param.to_string(), value);

            let composite = spec.rules(param).inspect_err(|e| {
                error!(param, error = %e, "invalid rule definition");
            })?;

            let value = &self.data[param];
            let failure = match composite.assert(value, param) {
                Ok(()) => continue,
                Err(failure) => failure,
            };

            let resolved = resolve(
                &failure,
                &composite.identifiers(),
                messages,
                spec.messages(),
                self.fallback,
            );

            debug!(
                param,
                failed = ?failure.identifiers(),
                messages = resolved.len(),
                "parameter failed validation"
            );

            self.errors.insert(param.to_string(), resolved);
        }

        trace!(
            params = rules.len(),
            invalid = self.errors.len(),
            "validation pass complete"
        );
        Ok(self)
    }

    /// Append one message to a parameter's errors
    pub fn add_error(&mut self, param: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.errors
            .entry(param.into())
            .or_default()
            .push(message.into());
        self
    }

    /// Append several messages to a parameter's errors, in order
    pub fn add_errors<I, S>(&mut self, param: impl Into<String>, messages: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.errors
            .entry(param.into())
            .or_default()
            .extend(messages.into_iter().map(Into::into));
        self
    }

    /// All recorded errors, keyed by parameter
    pub fn errors(&self) -> &IndexMap<String, Vec<String>> {
        &self.errors
    }

    /// Replace every recorded error
    pub fn set_errors<I, K>(&mut self, errors: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: Into<String>,
    {
        self.errors = errors.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self
    }

    /// Errors recorded for `param`; empty if there are none
    pub fn errors_of(&self, param: &str) -> &[String] {
        self.errors.get(param).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the errors of one parameter
    pub fn set_errors_of<I, S>(&mut self, param: impl Into<String>, messages: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.errors.insert(
            param.into(),
            messages.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// First error recorded for `param`, or `""`
    pub fn first(&self, param: &str) -> &str {
        self.errors_of(param)
            .first()
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Raw value of `param` as read during validation.
    ///
    /// Unknown parameters yield `Value::Null` rather than an empty string, so
    /// "never sent" and "sent empty" stay distinguishable.
    pub fn value(&self, param: &str) -> &Value {
        self.data.get(param).unwrap_or(&NULL)
    }

    /// Merge values into the data; keys not mentioned are kept
    pub fn set_values<I, K, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in values {
            self.data.insert(key.into(), value.into());
        }
        self
    }

    /// Replace the data
    pub fn set_data<I, K, V>(&mut self, data: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.data = data
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Values read during validation, keyed by parameter
    pub fn data(&self) -> &IndexMap<String, Value> {
        &self.data
    }

    /// `true` when no parameter has an error entry, even an empty one
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// `{"errors": {...}, "data": {...}}`
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "errors": self.errors,
            "data": self.data,
        })
    }
}
