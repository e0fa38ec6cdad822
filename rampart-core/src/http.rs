// HTTP request and response types

use crate::form::{parse_form_params, parse_query_string};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// HTTP request wrapper
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    pub path_params: HashMap<String, String>,
    pub query_params: IndexMap<String, Value>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Build a request from a method and a URI that may carry a query string
    pub fn from_uri(method: impl Into<String>, uri: &str) -> Result<Self, crate::Error> {
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (uri, None),
        };

        let mut request = Self::new(method, path);
        if let Some(query) = query {
            request.query_params = parse_query_string(query)?;
        }
        Ok(request)
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    pub fn with_path_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(key.into(), value.into());
        self
    }

    /// Set a URL-encoded form body and the matching content type
    pub fn with_form_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self.with_header("Content-Type", "application/x-www-form-urlencoded")
    }

    /// Serialize `value` as the JSON body and set the matching content type
    pub fn with_json_body<T: Serialize>(mut self, value: &T) -> Result<Self, crate::Error> {
        self.body =
            serde_json::to_vec(value).map_err(|e| crate::Error::Serialization(e.to_string()))?;
        Ok(self.with_header("Content-Type", "application/json"))
    }

    /// Look up a header case-insensitively
    pub fn header(&self, name: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Parse the request body as JSON
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> Result<T, crate::Error> {
        serde_json::from_slice(&self.body).map_err(|e| crate::Error::Deserialization(e.to_string()))
    }

    /// Get a path parameter by name
    pub fn param(&self, name: &str) -> Option<&String> {
        self.path_params.get(name)
    }

    /// Get a query parameter by name
    pub fn query(&self, name: &str) -> Option<&Value> {
        self.query_params.get(name)
    }

    /// Parse the body into named parameters according to its content type.
    ///
    /// JSON objects and URL-encoded forms are understood. Any other content
    /// type, or a JSON body that is not an object, yields no parameters.
    pub fn body_params(&self) -> Result<IndexMap<String, Value>, crate::Error> {
        if self.body.is_empty() {
            return Ok(IndexMap::new());
        }

        let content_type = self
            .header("Content-Type")
            .map(|value| value.to_ascii_lowercase())
            .unwrap_or_default();

        if content_type.contains("application/json") {
            match self.json::<Value>()? {
                Value::Object(map) => Ok(map.into_iter().collect()),
                _ => Ok(IndexMap::new()),
            }
        } else if content_type.contains("application/x-www-form-urlencoded") {
            parse_form_params(&self.body)
        } else {
            Ok(IndexMap::new())
        }
    }
}

/// HTTP response wrapper
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(200)
    }

    pub fn bad_request() -> Self {
        Self::new(400)
    }

    pub fn unprocessable_entity() -> Self {
        Self::new(422)
    }

    pub fn internal_server_error() -> Self {
        Self::new(500)
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn with_json<T: Serialize>(mut self, value: &T) -> Result<Self, crate::Error> {
        self.body =
            serde_json::to_vec(value).map_err(|e| crate::Error::Serialization(e.to_string()))?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Parse the response body as JSON
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> Result<T, crate::Error> {
        serde_json::from_slice(&self.body).map_err(|e| crate::Error::Deserialization(e.to_string()))
    }
}
