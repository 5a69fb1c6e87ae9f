//! Config redaction: produce safe-to-log config snapshots by masking secrets.

use serde_json::Value;

use crate::schema::OravisionConfig;

static SENSITIVE_KEYS: &[&str] = &[
    "apiKey",
    "api_key",
    "accessToken",
    "access_token",
    "token",
    "secret",
    "password",
];

/// Redact a config, replacing every sensitive field with a short hint + `***`.
pub fn redact(config: &OravisionConfig) -> Value {
    // Serializing a plain struct of strings/numbers cannot fail.
    let value = serde_json::to_value(config).unwrap_or(Value::Null);
    redact_value(&value)
}

/// Redact an arbitrary JSON value tree.
pub fn redact_value(value: &Value) -> Value {
    redact_recursive(value, "")
}

fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn redact_string(s: &str, key: &str) -> Value {
    if is_sensitive_key(key) && !s.is_empty() {
        let hint = if s.chars().count() > 8 {
            format!("{}***", s.chars().take(4).collect::<String>())
        } else {
            "***".to_string()
        };
        return Value::String(hint);
    }
    Value::String(s.to_string())
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) => redact_string(s, key),
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                result.insert(k.clone(), redact_recursive(v, k));
            }
            Value::Object(result)
        }
        other => other.clone(),
    }
}
