//! The flat settings record and its value rules.

use serde_json::Value;

/// Flat mapping from option name to value, as persisted.
pub type Record = serde_json::Map<String, Value>;

/// Truthiness of a stored value.
///
/// `false`, `0`, `"0"`, `""`, `null`, empty arrays/objects and absent keys
/// are all false. Everything else is true.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !(s.is_empty() || s == "0"),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// Text content of a stored value: strings as-is, scalars stringified,
/// everything else empty.
pub fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(true)) => "1".to_string(),
        _ => String::new(),
    }
}
