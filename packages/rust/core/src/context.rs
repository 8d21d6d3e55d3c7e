//! The `@context` namespace and helpers for values relative to it.

/// JSON-LD `@context` written on every document.
pub const SCHEMA_CONTEXT: &str = "http://schema.org";

/// Strip a leading `http://schema.org/` from `value`.
///
/// Values that do not start with the namespace followed by `/` are returned
/// unchanged, including the bare namespace itself.
pub fn relative_to_context(value: &str) -> &str {
    value
        .strip_prefix(SCHEMA_CONTEXT)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(value)
}

/// Collapse a list holding exactly one element to that element.
///
/// Empty lists stay empty arrays; callers skip them before getting here.
pub fn collapse(mut values: Vec<serde_json::Value>) -> serde_json::Value {
    if values.len() == 1 {
        values.remove(0)
    } else {
        serde_json::Value::Array(values)
    }
}
