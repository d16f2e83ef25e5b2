//! Child items stored as a JSON-encoded field, e.g. `order_list`,
//! `mp_items` or `associated_pos`.
//!
//! Stored shape is `{"<key>": [...]}`. Depending on the endpoint the field is
//! returned either as a JSON string or as an already-decoded object, so both
//! forms are accepted. Writing always produces the string form.

use anyhow::{anyhow, Context};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Key used by most item blobs
pub const LIST_KEY: &str = "list";

/// Strict decode; fails on malformed JSON or items of the wrong shape
pub fn decode_items<T: DeserializeOwned>(raw: Option<&Value>, key: &str) -> anyhow::Result<Vec<T>> {
    let value = match raw {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(Vec::new()),
        Some(Value::String(s)) => {
            serde_json::from_str::<Value>(s).context("item blob is not valid JSON")?
        }
        Some(other) => other.clone(),
    };

    let list = match value {
        Value::Object(mut map) => match map.remove(key) {
            Some(list) => list,
            None => return Ok(Vec::new()),
        },
        // Older records store the bare array
        Value::Array(arr) => Value::Array(arr),
        Value::Null => return Ok(Vec::new()),
        other => return Err(anyhow!("unexpected item blob shape: {}", other)),
    };

    serde_json::from_value(list).with_context(|| format!("invalid items under \"{}\"", key))
}

/// Decode for display; malformed blobs read as empty
pub fn decode_items_lenient<T: DeserializeOwned>(raw: Option<&Value>, key: &str) -> Vec<T> {
    decode_items(raw, key).unwrap_or_default()
}

/// Encode back into the string form `{"<key>": [...]}`
pub fn encode_items<T: Serialize>(items: &[T], key: &str) -> String {
    let mut map = serde_json::Map::new();
    map.insert(
        key.to_string(),
        serde_json::to_value(items).unwrap_or_else(|_| Value::Array(Vec::new())),
    );
    Value::Object(map).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        item_name: String,
        quantity: f64,
    }

    #[test]
    fn test_decode_string_and_object_forms() {
        let as_object = json!({"list": [{"item_name": "Cement", "quantity": 10.0}]});
        let as_string = Value::String(as_object.to_string());

        let a: Vec<Row> = decode_items(Some(&as_object), LIST_KEY).unwrap();
        let b: Vec<Row> = decode_items(Some(&as_string), LIST_KEY).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].item_name, "Cement");
    }

    #[test]
    fn test_decode_missing_or_empty() {
        let empty: Vec<Row> = decode_items(None, LIST_KEY).unwrap();
        assert!(empty.is_empty());
        let blank: Vec<Row> = decode_items(Some(&json!("")), LIST_KEY).unwrap();
        assert!(blank.is_empty());
        let other_key: Vec<Row> = decode_items(Some(&json!({"pos": []})), LIST_KEY).unwrap();
        assert!(other_key.is_empty());
    }

    #[test]
    fn test_malformed_is_error_strict_and_empty_lenient() {
        let broken = json!("{\"list\": [");
        assert!(decode_items::<Row>(Some(&broken), LIST_KEY).is_err());
        assert!(decode_items_lenient::<Row>(Some(&broken), LIST_KEY).is_empty());

        let wrong_shape = json!({"list": [{"item_name": 5}]});
        assert!(decode_items::<Row>(Some(&wrong_shape), LIST_KEY).is_err());
    }

    #[test]
    fn test_encode_produces_string_form() {
        let rows = vec![Row {
            item_name: "Sand".into(),
            quantity: 2.5,
        }];
        let encoded = encode_items(&rows, LIST_KEY);
        let back: Vec<Row> = decode_items(Some(&Value::String(encoded)), LIST_KEY).unwrap();
        assert_eq!(back, rows);
    }
}
