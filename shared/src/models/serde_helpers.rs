//! Serde helpers for lenient deserialization of client-supplied fields
//!
//! The storefront wizard posts whatever the browser holds; counts may arrive
//! as numbers, numeric strings, null or garbage. Quote requests must never
//! fail on a malformed count; bad values coerce to 0.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize an i64 count leniently: number, numeric string, bool, null or
/// anything else. Unparseable values become 0; floats truncate.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_count(value.as_ref()))
}

fn coerce_count(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<f64>().map(|f| f as i64).unwrap_or(0),
        Some(Value::Bool(b)) => i64::from(*b),
        _ => 0,
    }
}
