//! Lenient field decoding for API payloads
//!
//! The REST API is inconsistent about scalar types: ids arrive as numbers or
//! strings, amounts as numbers or numeric strings.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::query::lenient_amount;

/// Accepts a string or a number, yielding its text
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

/// Accepts an optional number or numeric string. Anything else is None.
pub fn optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(lenient_amount))
}

/// Accepts an optional string; null and empty strings become None
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
