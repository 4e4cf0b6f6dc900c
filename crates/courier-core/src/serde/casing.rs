//! Object key rewriting.

use heck::ToSnakeCase;
use serde_json::{Map, Value};

/// Rewrite every object key in `value` to snake_case, recursively.
///
/// Keys that are already snake_case are left as they are, so applying this
/// twice gives the same result as applying it once. Values are never touched.
pub fn to_snake_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let entries = std::mem::take(map);
            let mut rewritten = Map::with_capacity(entries.len());
            for (key, mut inner) in entries {
                to_snake_keys(&mut inner);
                rewritten.insert(snake_key(key), inner);
            }
            *map = rewritten;
        }
        Value::Array(items) => items.iter_mut().for_each(to_snake_keys),
        _ => {}
    }
}

fn snake_key(key: String) -> String {
    if is_snake(&key) {
        key
    } else {
        key.to_snake_case()
    }
}

fn is_snake(key: &str) -> bool {
    key.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
