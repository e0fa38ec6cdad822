// Rules and composite rules

use crate::{AssertionFailure, Violation};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A named predicate over a raw parameter value.
///
/// [`Rule::name`] is the rule's identifier, the key message overrides are
/// looked up by. Built-in rules use their type name with a lower-cased
/// first letter (`NotEmpty` is `notEmpty`).
pub trait Rule: Send + Sync {
    /// Identifier of this rule
    fn name(&self) -> &str;

    /// Check `value`, describing the failure for `field` if it does not hold
    fn validate(&self, value: &Value, field: &str) -> Result<(), Violation>;
}

type RuleFn = dyn Fn(&Value, &str) -> Result<(), Violation> + Send + Sync;

/// A rule backed by a closure
pub struct FnRule {
    name: String,
    check: Box<RuleFn>,
}

impl FnRule {
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value, &str) -> Result<(), Violation> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Box::new(check),
        }
    }
}

impl Rule for FnRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, value: &Value, field: &str) -> Result<(), Violation> {
        (self.check)(value, field)
    }
}

/// An ordered set of rules asserted together against one value.
///
/// ```
/// use rampart_validation::{Rules, NotEmpty, Email};
/// use serde_json::json;
///
/// let rules = Rules::new().rule(NotEmpty).rule(Email);
/// assert_eq!(rules.identifiers(), vec!["notEmpty", "email"]);
///
/// let failure = rules.assert(&json!(""), "email").unwrap_err();
/// assert_eq!(failure.identifiers(), vec!["notEmpty", "email"]);
/// ```
#[derive(Clone, Default)]
pub struct Rules {
    rules: Vec<Arc<dyn Rule>>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Append a shared rule
    pub fn shared(mut self, rule: Arc<dyn Rule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append a closure rule with the given identifier
    #[allow(clippy::should_implement_trait)]
    pub fn add<F>(self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value, &str) -> Result<(), Violation> + Send + Sync + 'static,
    {
        self.rule(FnRule::new(name, check))
    }

    /// The rules, in order
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    /// Identifiers of every rule, in order, including repeats
    pub fn identifiers(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Assert every rule against `value`.
    ///
    /// All rules run; the failure lists every violation in rule order, each
    /// stamped with the identifier of the rule that raised it.
    pub fn assert(&self, value: &Value, field: &str) -> Result<(), AssertionFailure> {
        let violations: Vec<Violation> = self
            .rules
            .iter()
            .filter_map(|rule| {
                rule.validate(value, field)
                    .err()
                    .map(|violation| violation.with_constraint(rule.name()))
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(AssertionFailure::new(field, violations))
        }
    }

    /// Whether `value` satisfies every rule
    pub fn is_valid(&self, value: &Value) -> bool {
        self.rules
            .iter()
            .all(|rule| rule.validate(value, "value").is_ok())
    }
}

impl fmt::Debug for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.identifiers()).finish()
    }
}

impl<R: Rule + 'static> From<R> for Rules {
    fn from(rule: R) -> Self {
        Rules::new().rule(rule)
    }
}
