//! URL-encoded form processing

use crate::Error;
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde_json::Value;

/// Parse URL-encoded form data into raw key/value pairs
pub fn parse_form_pairs(body: &[u8]) -> Result<Vec<(String, String)>, Error> {
    serde_urlencoded::from_bytes(body)
        .map_err(|e| Error::BadRequest(format!("Failed to parse form data: {}", e)))
}

/// Parse URL-encoded form data into parameter values.
///
/// Repeated keys collapse into an array, in order of appearance. A key
/// written with a trailing `[]` always produces an array, even when it
/// appears once.
///
/// ```
/// use rampart_core::form::parse_form_params;
///
/// let params = parse_form_params(b"name=John&tag=a&tag=b&ids[]=7").unwrap();
/// assert_eq!(params["name"], "John");
/// assert_eq!(params["tag"], serde_json::json!(["a", "b"]));
/// assert_eq!(params["ids"], serde_json::json!(["7"]));
/// ```
pub fn parse_form_params(body: &[u8]) -> Result<IndexMap<String, Value>, Error> {
    let mut params = IndexMap::new();
    for (key, value) in parse_form_pairs(body)? {
        insert_param(&mut params, key, value);
    }
    Ok(params)
}

/// Parse a raw query string (without the leading `?`) into parameter values
pub fn parse_query_string(query: &str) -> Result<IndexMap<String, Value>, Error> {
    parse_form_params(query.trim_start_matches('?').as_bytes())
}

fn insert_param(params: &mut IndexMap<String, Value>, key: String, value: String) {
    let (name, forced_list) = match key.strip_suffix("[]") {
        Some(name) => (name.to_string(), true),
        None => (key, false),
    };

    match params.entry(name) {
        Entry::Occupied(mut slot) => {
            let current = slot.get_mut();
            match current {
                Value::Array(items) => items.push(Value::String(value)),
                other => {
                    let previous = other.take();
                    *other = Value::Array(vec![previous, Value::String(value)]);
                }
            }
        }
        Entry::Vacant(slot) => {
            if forced_list {
                slot.insert(Value::Array(vec![Value::String(value)]));
            } else {
                slot.insert(Value::String(value));
            }
        }
    }
}
