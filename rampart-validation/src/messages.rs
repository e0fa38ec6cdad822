//! Message overrides and resolution
//!
//! When a parameter fails, each failed rule is turned into one message.
//! Sources are layered, later layers winning per rule identifier:
//!
//! 1. the identifier itself (or the rule's own message, see [`Fallback`])
//! 2. pass-wide messages given to [`Validator::validate`](crate::Validator::validate)
//! 3. messages attached to the parameter's [`RuleSpec`](crate::RuleSpec)
//!
//! Entries for rules that did not fail resolve to an empty string and are
//! dropped, as are overrides that are `""` or `"0"`.

use crate::AssertionFailure;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// One message override
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Fixed text
    Text(String),
    /// The failing rule's own candidate message
    Rule,
}

/// Message overrides keyed by rule identifier, in insertion order.
///
/// Deserializes from either a map of identifier to text, or a list of
/// identifiers whose rules should report their own messages. A `null` map
/// value is equivalent to a list entry.
///
/// ```
/// use rampart_validation::{Message, Messages};
///
/// let custom: Messages = serde_json::from_str(r#"{"required": "Age is mandatory"}"#).unwrap();
/// assert_eq!(custom.get("required"), Some(&Message::Text("Age is mandatory".into())));
///
/// let list: Messages = serde_json::from_str(r#"["email"]"#).unwrap();
/// assert_eq!(list.get("email"), Some(&Message::Rule));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Messages {
    entries: IndexMap<String, Message>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text override
    pub fn with(mut self, identifier: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(identifier, text);
        self
    }

    /// Report the rule's own message for `identifier`
    pub fn with_rule(mut self, identifier: impl Into<String>) -> Self {
        self.entries.insert(identifier.into(), Message::Rule);
        self
    }

    /// Build from a list of identifiers that report their own messages
    pub fn from_rules<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        identifiers
            .into_iter()
            .fold(Self::new(), |messages, id| messages.with_rule(id))
    }

    pub fn insert(&mut self, identifier: impl Into<String>, text: impl Into<String>) {
        self.entries
            .insert(identifier.into(), Message::Text(text.into()));
    }

    pub fn get(&self, identifier: &str) -> Option<&Message> {
        self.entries.get(identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Message)> {
        self.entries.iter().map(|(id, message)| (id.as_str(), message))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlay `other`; its entries win, existing keys keep their position
    pub fn merge(&mut self, other: Messages) {
        for (identifier, message) in other.entries {
            self.entries.insert(identifier, message);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Messages {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut messages = Messages::new();
        for (identifier, text) in iter {
            messages.insert(identifier, text);
        }
        messages
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Messages {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl From<IndexMap<String, String>> for Messages {
    fn from(entries: IndexMap<String, String>) -> Self {
        entries.into_iter().collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMessages {
    Map(IndexMap<String, Option<String>>),
    List(Vec<String>),
}

impl<'de> Deserialize<'de> for Messages {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = match RawMessages::deserialize(deserializer)? {
            RawMessages::Map(map) => map
                .into_iter()
                .map(|(id, text)| (id, text.map_or(Message::Rule, Message::Text)))
                .collect(),
            RawMessages::List(ids) => ids.into_iter().map(|id| (id, Message::Rule)).collect(),
        };
        Ok(Messages { entries })
    }
}

impl Serialize for Messages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(id, message)| {
            let text = match message {
                Message::Text(text) => Some(text.as_str()),
                Message::Rule => None,
            };
            (id, text)
        }))
    }
}

/// Message used for a failed rule nobody supplied an override for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fallback {
    /// The rule identifier itself, e.g. `"required"`
    #[default]
    Identifier,
    /// The rule's own candidate message, e.g. `"age is required"`
    Rule,
}

impl FromStr for Fallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "identifier" | "id" => Ok(Fallback::Identifier),
            "rule" | "message" => Ok(Fallback::Rule),
            other => Err(format!("Unknown message fallback: {}", other)),
        }
    }
}

/// Resolved messages that carry nothing are dropped: `""` and `"0"`
fn is_blank(message: &str) -> bool {
    message.is_empty() || message == "0"
}

/// Resolve the final message list for one failed parameter.
///
/// `identifiers` lists every rule of the parameter's composite, in order,
/// passing or not. The result keeps first-seen key order, holds at most one
/// message per identifier and never contains `""` or `"0"`.
pub fn resolve(
    failure: &AssertionFailure,
    identifiers: &[&str],
    global: &Messages,
    local: Option<&Messages>,
    fallback: Fallback,
) -> Vec<String> {
    let candidate = |identifier: &str, message: Option<&Message>| -> String {
        if !failure.failed(identifier) {
            return String::new();
        }
        let own = failure.find_message(identifier).unwrap_or_default();
        match (message, fallback) {
            (Some(Message::Text(text)), _) => text.clone(),
            (Some(Message::Rule), _) => own.to_string(),
            (None, Fallback::Identifier) => identifier.to_string(),
            (None, Fallback::Rule) if own.is_empty() => identifier.to_string(),
            (None, Fallback::Rule) => own.to_string(),
        }
    };

    let mut merged: IndexMap<&str, String> = IndexMap::with_capacity(identifiers.len());
    for &identifier in identifiers {
        merged.insert(identifier, candidate(identifier, None));
    }
    for (identifier, message) in global.iter() {
        merged.insert(identifier, candidate(identifier, Some(message)));
    }
    if let Some(local) = local {
        for (identifier, message) in local.iter() {
            merged.insert(identifier, candidate(identifier, Some(message)));
        }
    }

    merged
        .into_values()
        .filter(|message| !is_blank(message))
        .collect()
}
