//! Loose truthiness rules for JSON values coming back from upstream services.
//!
//! Upstream services signal failure with fields such as `success`, `error`
//! and `detail` whose type is not fixed, so checks go through these helpers
//! instead of matching a single JSON type.

use serde_json::Value;

/// `false`, `null`, `0`, `""` are falsy. Everything else, including empty
/// arrays and objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns `field` of an object when it is present and truthy.
pub fn truthy_field<'a>(value: &'a Value, field: &str) -> Option<&'a Value> {
    value.get(field).filter(|v| is_truthy(v))
}

/// Renders a truthy field as a message; strings are taken verbatim.
pub fn message_field(value: &Value, field: &str) -> Option<String> {
    truthy_field(value, field).map(|v| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_values() {
        for v in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&v), "{v} should be falsy");
        }
    }

    #[test]
    fn truthy_values() {
        for v in [json!(true), json!(1), json!("x"), json!([]), json!({})] {
            assert!(is_truthy(&v), "{v} should be truthy");
        }
    }

    #[test]
    fn message_field_prefers_strings_verbatim() {
        let body = json!({ "error": "bad token", "code": 7, "message": "" });
        assert_eq!(message_field(&body, "error").as_deref(), Some("bad token"));
        assert_eq!(message_field(&body, "code").as_deref(), Some("7"));
        assert_eq!(message_field(&body, "message"), None);
        assert_eq!(message_field(&json!("plain"), "error"), None);
    }
}
