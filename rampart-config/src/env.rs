// Environment variable loading

use crate::{ConfigError, Result};
use indexmap::IndexMap;
use std::env;
use std::path::Path;
use tracing::debug;

/// Prefix of every variable Rampart reads
pub const ENV_PREFIX: &str = "RAMPART";

/// Environment variable loader.
///
/// With a prefix, only `<PREFIX>_*` variables are read and the prefix is
/// stripped from their keys. Keys keep their case.
#[derive(Debug, Clone)]
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::new(Some(prefix.into()))
    }

    /// Key relative to the prefix, or `None` if `key` is outside it
    pub fn strip<'a>(&self, key: &'a str) -> Option<&'a str> {
        match &self.prefix {
            Some(prefix) => key
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix('_'))
                .filter(|rest| !rest.is_empty()),
            None => Some(key),
        }
    }

    /// Filter `vars` to this loader's prefix, sorted by key
    pub fn collect<I, K, V>(&self, vars: I) -> IndexMap<String, String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config: IndexMap<String, String> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                self.strip(key.as_ref())
                    .map(|stripped| (stripped.to_string(), value.into()))
            })
            .collect();
        config.sort_keys();
        config
    }

    /// Load all matching environment variables
    pub fn load(&self) -> IndexMap<String, String> {
        self.collect(env::vars())
    }

    /// Load a `.env` file into the process environment, then read it.
    ///
    /// Without a path the usual `.env` lookup applies; a missing default
    /// file is not an error.
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<IndexMap<String, String>> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
                debug!(path = %path.display(), "loaded .env file");
            }
            None => match dotenvy::dotenv() {
                Ok(path) => debug!(path = %path.display(), "loaded .env file"),
                Err(e) if e.not_found() => debug!("no .env file found"),
                Err(e) => return Err(ConfigError::LoadError(e.to_string())),
            },
        }
        Ok(self.load())
    }

    /// Load a specific environment variable
    pub fn load_var(&self, key: &str) -> Result<String> {
        let full_key = match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        };

        env::var(&full_key).map_err(ConfigError::Env)
    }

    /// Load with default value
    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::with_prefix(ENV_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_prefix() {
        let loader = EnvLoader::default();
        assert_eq!(loader.strip("RAMPART_FALLBACK"), Some("FALLBACK"));
        assert_eq!(loader.strip("RAMPARTX_FALLBACK"), None);
        assert_eq!(loader.strip("RAMPART_"), None);
        assert_eq!(loader.strip("PATH"), None);
        assert_eq!(EnvLoader::new(None).strip("PATH"), Some("PATH"));
    }

    #[test]
    fn test_collect_filters_and_sorts() {
        let loader = EnvLoader::default();
        let vars = loader.collect([
            ("RAMPART_MESSAGES_REQUIRED", "Needed"),
            ("HOME", "/root"),
            ("RAMPART_FALLBACK", "rule"),
        ]);

        let keys: Vec<&str> = vars.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["FALLBACK", "MESSAGES_REQUIRED"]);
        assert_eq!(vars["MESSAGES_REQUIRED"], "Needed");
    }

    #[test]
    fn test_env_loader_with_default() {
        let loader = EnvLoader::new(None);
        let value = loader.load_var_or("NONEXISTENT_VAR_12345", "default");

        assert_eq!(value, "default");
    }

    #[test]
    fn test_env_loader_missing_var() {
        let loader = EnvLoader::with_prefix("RAMPART_TEST");
        let result = loader.load_var("MISSING_VAR_67890");

        assert!(matches!(result, Err(ConfigError::Env(_))));
    }
}
