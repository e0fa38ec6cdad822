// Per-parameter rule definitions

use crate::{Messages, Rules, ValidationError};
use indexmap::IndexMap;

/// How one parameter is validated
#[derive(Debug, Clone)]
pub enum RuleSpec {
    /// A bare composite rule
    Rules(Rules),
    /// A composite rule with parameter-specific message overrides
    Options {
        rules: Option<Rules>,
        messages: Option<Messages>,
    },
}

impl RuleSpec {
    /// Rules with message overrides
    pub fn with_messages(rules: impl Into<Rules>, messages: impl Into<Messages>) -> Self {
        RuleSpec::Options {
            rules: Some(rules.into()),
            messages: Some(messages.into()),
        }
    }

    /// The composite rule, or a configuration error naming `param`
    pub fn rules(&self, param: &str) -> Result<&Rules, ValidationError> {
        match self {
            RuleSpec::Rules(rules) => Ok(rules),
            RuleSpec::Options {
                rules: Some(rules), ..
            } => Ok(rules),
            RuleSpec::Options { rules: None, .. } => Err(ValidationError::MissingRules {
                param: param.to_string(),
            }),
        }
    }

    /// Parameter-specific message overrides, if any
    pub fn messages(&self) -> Option<&Messages> {
        match self {
            RuleSpec::Rules(_) => None,
            RuleSpec::Options { messages, .. } => messages.as_ref(),
        }
    }
}

impl From<Rules> for RuleSpec {
    fn from(rules: Rules) -> Self {
        RuleSpec::Rules(rules)
    }
}

/// Rule definitions for a validation pass, keyed by parameter name.
///
/// Parameters are validated in insertion order.
///
/// ```
/// use rampart_validation::{RuleSet, RuleSpec, Rules, Required, Email, Messages};
///
/// let rules = RuleSet::new()
///     .param("email", Rules::new().rule(Required).rule(Email))
///     .param(
///         "age",
///         RuleSpec::with_messages(Required, [("required", "Age is mandatory")]),
///     );
///
/// assert_eq!(rules.names(), vec!["email", "age"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    specs: IndexMap<String, RuleSpec>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the definition for a parameter
    pub fn param(mut self, name: impl Into<String>, spec: impl Into<RuleSpec>) -> Self {
        self.insert(name, spec);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: impl Into<RuleSpec>) {
        self.specs.insert(name.into(), spec.into());
    }

    pub fn get(&self, name: &str) -> Option<&RuleSpec> {
        self.specs.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSpec)> {
        self.specs.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn names(&self) -> Vec<&str> {
        self.specs.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl<K: Into<String>, V: Into<RuleSpec>> FromIterator<(K, V)> for RuleSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut set = RuleSet::new();
        for (name, spec) in iter {
            set.insert(name, spec);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Email, Message, NotEmpty, Required};

    #[test]
    fn test_bare_rules() {
        let spec: RuleSpec = Rules::new().rule(Required).into();
        assert_eq!(spec.rules("age").unwrap().identifiers(), vec!["required"]);
        assert!(spec.messages().is_none());
    }

    #[test]
    fn test_options_with_messages() {
        let spec = RuleSpec::with_messages(
            Rules::new().rule(NotEmpty).rule(Email),
            Messages::new().with("email", "Bad email"),
        );
        assert_eq!(spec.rules("email").unwrap().len(), 2);
        assert_eq!(
            spec.messages().and_then(|m| m.get("email")),
            Some(&Message::Text("Bad email".to_string()))
        );
    }

    #[test]
    fn test_missing_rules() {
        let spec = RuleSpec::Options {
            rules: None,
            messages: Some(Messages::new().with("required", "Needed")),
        };
        assert_eq!(
            spec.rules("age").unwrap_err(),
            ValidationError::MissingRules {
                param: "age".to_string()
            }
        );
    }

    #[test]
    fn test_options_without_messages() {
        let spec = RuleSpec::Options {
            rules: Some(Rules::new().rule(Required)),
            messages: None,
        };
        assert!(spec.rules("age").is_ok());
        assert!(spec.messages().is_none());
    }

    #[test]
    fn test_rule_set_order_and_replace() {
        let set = RuleSet::new()
            .param("b", Rules::new().rule(Required))
            .param("a", Rules::new().rule(Required))
            .param("b", Rules::new().rule(Email));

        assert_eq!(set.names(), vec!["b", "a"]);
        assert_eq!(
            set.get("b").unwrap().rules("b").unwrap().identifiers(),
            vec!["email"]
        );
    }

    #[test]
    fn test_rule_set_from_iter() {
        let set: RuleSet = vec![
            ("name", Rules::new().rule(NotEmpty)),
            ("email", Rules::new().rule(Email)),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }
}
