//! Deserializers for loosely typed fields.
//!
//! Currency fields arrive as numbers, numeric strings or null; check fields
//! arrive as `0`/`1`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn de_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().replace(',', "").parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

pub fn de_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    })
}

pub fn de_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0) != 0,
        Some(Value::String(s)) => matches!(s.trim(), "1" | "true" | "True" | "yes" | "Yes"),
        _ => false,
    })
}

/// Empty strings become `None`
pub fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "de_f64")]
        amount: f64,
        #[serde(default, deserialize_with = "de_opt_f64")]
        estimate: Option<f64>,
        #[serde(default, deserialize_with = "de_bool")]
        flag: bool,
        #[serde(default, deserialize_with = "de_opt_string")]
        remarks: Option<String>,
    }

    #[test]
    fn test_numbers_from_strings_and_nulls() {
        let p: Sample = serde_json::from_value(json!({
            "amount": "1,500.5", "estimate": null, "flag": 1, "remarks": ""
        }))
        .unwrap();
        assert_eq!(p.amount, 1500.5);
        assert_eq!(p.estimate, None);
        assert!(p.flag);
        assert_eq!(p.remarks, None);
    }

    #[test]
    fn test_missing_fields_default() {
        let p: Sample = serde_json::from_value(json!({})).unwrap();
        assert_eq!(p.amount, 0.0);
        assert!(!p.flag);
        assert_eq!(p.remarks, None);
    }
}
