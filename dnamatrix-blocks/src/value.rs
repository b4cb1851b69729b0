//! Helpers over free-form JSON values stored in overrides and settings.
//!
//! Lookups follow the builder's `value || fallback` contract: `null`, `false`,
//! `0` and `""` are treated as absent. Arrays and objects are always present,
//! even when empty.

use serde_json::Value;
use std::borrow::Cow;

/// Whether a value counts as set.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns the value only when it is truthy.
pub fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| is_truthy(v))
}

/// Largest integer a JS number holds exactly (`Number.MAX_SAFE_INTEGER`).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Textual form of a scalar value. Objects and arrays have no text.
pub fn as_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(number_text(n))),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        _ => None,
    }
}

/// Numbers print the way a browser prints them: `90.0` is `90`.
fn number_text(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness_matches_logical_or() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!(0.5)));
    }

    #[test]
    fn test_as_text() {
        assert_eq!(as_text(&json!("abc")).as_deref(), Some("abc"));
        assert_eq!(as_text(&json!(80)).as_deref(), Some("80"));
        assert_eq!(as_text(&json!(2.5)).as_deref(), Some("2.5"));
        assert_eq!(as_text(&json!({"a": 1})), None);
    }

    #[test]
    fn test_whole_floats_print_as_integers() {
        assert_eq!(as_text(&json!(90.0)).as_deref(), Some("90"));
        assert_eq!(as_text(&json!(-3.0)).as_deref(), Some("-3"));
        assert_eq!(as_text(&json!(-0.0)).as_deref(), Some("0"));
        assert_eq!(as_text(&json!(0.25)).as_deref(), Some("0.25"));
        assert_eq!(as_text(&json!(u64::MAX)).as_deref(), Some("18446744073709551615"));
    }
}
