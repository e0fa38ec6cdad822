//! Validation settings for Rampart
//!
//! Loads pass-wide message overrides and the message fallback policy from
//! JSON, TOML or `.env` files and from `RAMPART_*` environment variables.
//!
//! ```
//! use rampart_config::ValidationConfig;
//! use rampart_validation::{rules, Required};
//! use serde_json::json;
//!
//! let config = ValidationConfig::from_value(json!({
//!     "messages": {"required": "This field is required"}
//! }))
//! .unwrap();
//!
//! let request = json!({"name": ""});
//! let mut validator = config.validator();
//! validator
//!     .validate(request.as_object().unwrap(), &rules! { "name" => [Required] }, config.messages())
//!     .unwrap();
//!
//! assert_eq!(validator.first("name"), "This field is required");
//! ```

pub mod env;
pub mod error;
pub mod loader;

pub use env::{ENV_PREFIX, EnvLoader};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};

use rampart_validation::{Fallback, Messages, Validator, identifier};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

const FALLBACK_KEY: &str = "FALLBACK";
const MESSAGES_KEY_PREFIX: &str = "MESSAGES_";

/// Settings applied to every validation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback: Option<Fallback>,
    messages: Messages,
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Build from a parsed configuration document
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load from a JSON, TOML or `.env` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let loader = ConfigLoader::auto(path)?;
        let value = loader.load_file(path)?;

        match loader.format() {
            FileFormat::Env => {
                let Value::Object(map) = value else {
                    return Ok(Self::default());
                };
                let vars = map.into_iter().filter_map(|(key, value)| match value {
                    Value::String(text) => Some((key, text)),
                    _ => None,
                });
                Self::from_vars(EnvLoader::default().collect(vars))
            }
            FileFormat::Json | FileFormat::Toml => Self::from_value(value),
        }
    }

    /// Load from `RAMPART_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(EnvLoader::default().load())
    }

    /// Load a `.env` file into the environment, then read `RAMPART_*` variables
    pub fn from_dotenv(path: Option<&Path>) -> Result<Self> {
        Self::from_vars(EnvLoader::default().load_dotenv(path)?)
    }

    /// Build from variables with the `RAMPART_` prefix already stripped.
    ///
    /// `FALLBACK` selects the fallback policy and `MESSAGES_<RULE>` sets the
    /// message for identifier `<rule>` (`MESSAGES_NOT_EMPTY` is `notEmpty`).
    /// Other keys are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();

        for (key, value) in vars {
            let key = key.as_ref();
            let value = value.into();

            if key == FALLBACK_KEY {
                let fallback = value
                    .parse::<Fallback>()
                    .map_err(|message| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message,
                    })?;
                config.fallback = Some(fallback);
            } else if let Some(rule) = key.strip_prefix(MESSAGES_KEY_PREFIX) {
                config.messages.insert(identifier::from_env_key(rule), value);
            } else {
                debug!(key, "ignoring unknown configuration variable");
            }
        }

        Ok(config)
    }

    /// Overlay `other`; its messages win per identifier and its fallback
    /// wins when set
    pub fn merge(&mut self, other: ValidationConfig) -> &mut Self {
        if other.fallback.is_some() {
            self.fallback = other.fallback;
        }
        self.messages.merge(other.messages);
        self
    }

    pub fn fallback(&self) -> Fallback {
        self.fallback.unwrap_or_default()
    }

    /// Pass-wide messages to hand to [`Validator::validate`]
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// A fresh validator using the configured fallback
    pub fn validator(&self) -> Validator {
        Validator::new().with_fallback(self.fallback())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_validation::Message;
    use serde_json::json;

    #[test]
    fn test_from_value() {
        let config = ValidationConfig::from_value(json!({
            "fallback": "rule",
            "messages": {"required": "Needed", "email": null}
        }))
        .unwrap();

        assert_eq!(config.fallback(), Fallback::Rule);
        assert_eq!(
            config.messages().get("required"),
            Some(&Message::Text("Needed".into()))
        );
        assert_eq!(config.messages().get("email"), Some(&Message::Rule));
    }

    #[test]
    fn test_from_value_defaults() {
        let config = ValidationConfig::from_value(json!({})).unwrap();
        assert_eq!(config, ValidationConfig::default());
        assert_eq!(config.fallback(), Fallback::Identifier);
    }

    #[test]
    fn test_from_value_rejects_bad_fallback() {
        let result = ValidationConfig::from_value(json!({"fallback": "loud"}));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_from_vars() {
        let config = ValidationConfig::from_vars([
            ("MESSAGES_NOT_EMPTY", "Cannot be empty"),
            ("FALLBACK", "rule"),
            ("LOG_LEVEL", "debug"),
        ])
        .unwrap();

        assert_eq!(config.fallback(), Fallback::Rule);
        assert_eq!(config.messages().len(), 1);
        assert_eq!(
            config.messages().get("notEmpty"),
            Some(&Message::Text("Cannot be empty".into()))
        );
    }

    #[test]
    fn test_from_vars_invalid_fallback() {
        let err = ValidationConfig::from_vars([("FALLBACK", "loud")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "FALLBACK"));
    }

    #[test]
    fn test_merge() {
        let mut base = ValidationConfig::new()
            .with_fallback(Fallback::Rule)
            .with_messages(Messages::new().with("required", "Needed").with("email", "Bad"));
        base.merge(ValidationConfig::new().with_messages(Messages::new().with("email", "Invalid email")));

        assert_eq!(base.fallback(), Fallback::Rule);
        let ids: Vec<&str> = base.messages().iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["required", "email"]);
        assert_eq!(
            base.messages().get("email"),
            Some(&Message::Text("Invalid email".into()))
        );

        base.merge(ValidationConfig::new().with_fallback(Fallback::Identifier));
        assert_eq!(base.fallback(), Fallback::Identifier);
    }

    #[test]
    fn test_validator_uses_fallback() {
        let config = ValidationConfig::new().with_fallback(Fallback::Rule);
        assert_eq!(config.validator().fallback(), Fallback::Rule);
    }
}
