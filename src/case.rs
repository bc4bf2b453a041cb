//! Key casing between the API (camelCase) and storage columns (snake_case).

use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCase {
    Camel,
    Snake,
}

impl KeyCase {
    pub fn apply(&self, key: &str) -> String {
        match self {
            KeyCase::Camel => to_camel_case(key),
            KeyCase::Snake => to_snake_case(key),
        }
    }
}

/// "created_at" -> "createdAt"
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.chars() {
        match c {
            '_' if !out.is_empty() => upper_next = true,
            _ if upper_next => {
                out.extend(c.to_uppercase());
                upper_next = false;
            }
            _ => out.push(c),
        }
    }
    out
}

/// "createdAt" -> "created_at"
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_uppercase() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Rename keys in place, keeping their order.
pub fn rename_keys(obj: &mut Map<String, Value>, case: KeyCase) {
    let renamed: Map<String, Value> = std::mem::take(obj)
        .into_iter()
        .map(|(k, v)| (case.apply(&k), v))
        .collect();
    *obj = renamed;
}

pub fn object_keys_to_snake_case(obj: &mut Map<String, Value>) {
    rename_keys(obj, KeyCase::Snake);
}

/// Shape a stored value for the API: objects, and objects inside arrays, get camelCase keys.
pub fn to_api_case(value: &mut Value) {
    match value {
        Value::Object(map) => {
            rename_keys(map, KeyCase::Camel);
            map.values_mut().for_each(to_api_case);
        }
        Value::Array(items) => items.iter_mut().for_each(to_api_case),
        _ => {}
    }
}
