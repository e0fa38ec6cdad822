//! Named parameter lookup
//!
//! [`ParamSource`] is the capability a validator needs from a request: read
//! the raw value of a named parameter. Lookups never fail. A name the source
//! does not know resolves to [`Value::Null`].

use crate::HttpRequest;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// A source of raw, named input parameters.
pub trait ParamSource {
    /// Get the raw value of `name`, or `Value::Null` if it is absent.
    fn get_param(&self, name: &str) -> Value;
}

impl<T: ParamSource + ?Sized> ParamSource for &T {
    fn get_param(&self, name: &str) -> Value {
        (**self).get_param(name)
    }
}

/// Body parameters take precedence over query parameters.
///
/// A body that cannot be parsed contributes no parameters.
impl ParamSource for HttpRequest {
    fn get_param(&self, name: &str) -> Value {
        match self.body_params() {
            Ok(mut body) => {
                if let Some(value) = body.swap_remove(name) {
                    return value;
                }
            }
            Err(e) => {
                debug!(path = %self.path, error = %e, "ignoring unparsable request body");
            }
        }

        self.query_params.get(name).cloned().unwrap_or(Value::Null)
    }
}

impl ParamSource for IndexMap<String, Value> {
    fn get_param(&self, name: &str) -> Value {
        self.get(name).cloned().unwrap_or(Value::Null)
    }
}

impl ParamSource for Map<String, Value> {
    fn get_param(&self, name: &str) -> Value {
        self.get(name).cloned().unwrap_or(Value::Null)
    }
}

impl ParamSource for HashMap<String, String> {
    fn get_param(&self, name: &str) -> Value {
        self.get(name)
            .map(|value| Value::String(value.clone()))
            .unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_param_is_null() {
        let req = HttpRequest::new("GET", "/");
        assert_eq!(req.get_param("missing"), Value::Null);
    }

    #[test]
    fn test_query_param_lookup() {
        let req = HttpRequest::from_uri("GET", "/search?q=rust").unwrap();
        assert_eq!(req.get_param("q"), json!("rust"));
    }

    #[test]
    fn test_body_wins_over_query() {
        let req = HttpRequest::from_uri("POST", "/users?name=query")
            .unwrap()
            .with_form_body("name=body");
        assert_eq!(req.get_param("name"), json!("body"));
    }

    #[test]
    fn test_query_used_when_body_lacks_param() {
        let req = HttpRequest::from_uri("POST", "/users?page=3")
            .unwrap()
            .with_form_body("name=body");
        assert_eq!(req.get_param("page"), json!("3"));
    }

    #[test]
    fn test_broken_body_falls_back_to_query() {
        let mut req = HttpRequest::from_uri("POST", "/users?name=query")
            .unwrap()
            .with_header("Content-Type", "application/json");
        req.body = b"{broken".to_vec();
        assert_eq!(req.get_param("name"), json!("query"));
    }

    #[test]
    fn test_map_sources() {
        let mut index = IndexMap::new();
        index.insert("age".to_string(), json!(42));
        assert_eq!(index.get_param("age"), json!(42));
        assert_eq!(index.get_param("name"), Value::Null);

        let mut plain = HashMap::new();
        plain.insert("name".to_string(), "John".to_string());
        assert_eq!(plain.get_param("name"), json!("John"));

        let object = json!({"email": "a@b.c"});
        let map = object.as_object().unwrap();
        assert_eq!(map.get_param("email"), json!("a@b.c"));
    }

    #[test]
    fn test_reference_source() {
        fn lookup(source: impl ParamSource) -> Value {
            source.get_param("x")
        }

        let req = HttpRequest::from_uri("GET", "/?x=1").unwrap();
        assert_eq!(lookup(&req), json!("1"));
    }
}
