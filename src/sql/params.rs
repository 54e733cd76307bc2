//! Helpers for values on their way into queries.

use serde_json::Value;

/// Strip the characters that would matter if a value were ever spliced into SQL:
/// single quotes are doubled, `;` and `--` removed.
///
/// Queries bind values as parameters, so this only runs on values that already passed
/// validation (5 digits, or one of the fixed measure labels) where it is the identity.
pub fn sanitize_literal(value: &str) -> String {
    value.replace('\'', "''").replace(';', "").replace("--", "")
}

/// Name of the JSON type, for error messages.
pub fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
