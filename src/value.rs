//! Lenient numeric coercion for size-tool JSON
//!
//! The size tool has reported the same quantity as integers, floats and
//! quoted strings across releases. Anything that is not a non-negative
//! number coerces to 0.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a JSON value into a byte count
///
/// # Examples
///
/// ```
/// use idf_size_delta::value::coerce_u64;
/// use serde_json::json;
///
/// assert_eq!(coerce_u64(&json!(1234)), 1234);
/// assert_eq!(coerce_u64(&json!("42")), 42);
/// assert_eq!(coerce_u64(&json!(12.9)), 12);
/// assert_eq!(coerce_u64(&json!(-5)), 0);
/// assert_eq!(coerce_u64(&json!(null)), 0);
/// ```
pub fn coerce_u64(value: &Value) -> u64 {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                v
            } else if let Some(f) = n.as_f64() {
                // Negative integers land here too and clamp to 0
                if f.is_finite() && f > 0.0 {
                    f.trunc() as u64
                } else {
                    0
                }
            } else {
                0
            }
        }
        Value::String(s) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}

/// Look up `key` in an object and coerce it, `None` when the key is absent
pub(crate) fn field_u64(object: &serde_json::Map<String, Value>, key: &str) -> Option<u64> {
    object.get(key).map(coerce_u64)
}

/// Serde adapter: deserialize any JSON value and coerce it to `u64`
pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_u64(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_accepts_integer_forms() {
        assert_eq!(coerce_u64(&json!(0)), 0);
        assert_eq!(coerce_u64(&json!(u64::MAX)), u64::MAX);
        assert_eq!(coerce_u64(&json!(" 77 ")), 77);
    }

    #[test]
    fn test_coerce_rejects_non_numeric_values() {
        assert_eq!(coerce_u64(&json!("12.5")), 0);
        assert_eq!(coerce_u64(&json!("n/a")), 0);
        assert_eq!(coerce_u64(&json!(true)), 0);
        assert_eq!(coerce_u64(&json!([1, 2])), 0);
        assert_eq!(coerce_u64(&json!({"used": 3})), 0);
    }

    #[test]
    fn test_coerce_clamps_negative_and_truncates_floats() {
        assert_eq!(coerce_u64(&json!(-1)), 0);
        assert_eq!(coerce_u64(&json!(-0.5)), 0);
        assert_eq!(coerce_u64(&json!(99.99)), 99);
    }

    #[test]
    fn test_field_u64_distinguishes_absent_from_zero() {
        let object = json!({"used": 0}).as_object().cloned().unwrap();
        assert_eq!(field_u64(&object, "used"), Some(0));
        assert_eq!(field_u64(&object, "total"), None);
    }
}
