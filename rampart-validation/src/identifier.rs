//! Rule identifiers
//!
//! Message overrides are keyed by a rule's identifier: its short type name
//! with the first character lower-cased (`NotEmpty` becomes `notEmpty`).

/// Lower-case the first character of a type name.
///
/// Module paths are stripped, so `rampart_validation::Email` becomes `email`.
#[cfg(test)]
pub(crate) fn lower_first(type_name: &str) -> String {
    let short = type_name.rsplit("::").next().unwrap_or(type_name);
    let mut chars = short.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Identifier for a Rust type, derived from its type name
#[cfg(test)]
pub(crate) fn of<T: ?Sized>() -> String {
    let name = std::any::type_name::<T>();
    // Generic arguments are not part of the identifier.
    let base = name.split('<').next().unwrap_or(name);
    lower_first(base)
}

/// Convert a SCREAMING_SNAKE environment key into an identifier.
///
/// `NOT_EMPTY` becomes `notEmpty`, `EMAIL` becomes `email`.
pub fn from_env_key(key: &str) -> String {
    let mut identifier = String::with_capacity(key.len());
    for (i, part) in key.split('_').filter(|p| !p.is_empty()).enumerate() {
        let lower = part.to_lowercase();
        if i == 0 {
            identifier.push_str(&lower);
        } else {
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                identifier.extend(first.to_uppercase());
                identifier.push_str(chars.as_str());
            }
        }
    }
    identifier
}
