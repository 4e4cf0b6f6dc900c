//! Query-string encoding of a parameter payload.

use courier_core::Payload;
use serde_json::Value;

/// Flatten `payload` into query pairs.
///
/// Arrays become repeated keys, nested objects become `key[sub]`, booleans
/// and numbers are written literally and nulls are skipped.
pub fn query_pairs(payload: &Payload) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(payload.len());
    for (key, value) in payload {
        push_value(&mut pairs, key.clone(), value);
    }
    pairs
}

fn push_value(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Array(items) => {
            for item in items {
                push_value(pairs, key.clone(), item);
            }
        }
        Value::Object(map) => {
            for (sub, inner) in map {
                push_value(pairs, format!("{key}[{sub}]"), inner);
            }
        }
    }
}
