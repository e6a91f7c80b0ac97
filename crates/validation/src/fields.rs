//! Raw input field extraction and the shared field-level messages.

use serde_json::{Map, Value};

use cronmon_core::Choice;

use crate::errors::FieldErrors;

/// Untyped request fields as they arrive from the transport layer.
pub type RawFields = Map<String, Value>;

pub(crate) const REQUIRED: &str = "This field is required.";
pub(crate) const NOT_A_STRING: &str = "Not a valid string.";

pub(crate) fn invalid_choice(value: &Value) -> String {
    let shown = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    format!("Select a valid choice. {shown} is not one of the available choices.")
}

/// JSON kind name used in shape messages.
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Look up `name`, treating JSON `null` the same as an absent key.
pub(crate) fn present<'a>(fields: &'a RawFields, name: &str) -> Option<&'a Value> {
    fields.get(name).filter(|v| !v.is_null())
}

/// A string field. Absent and `null` read as `Ok(None)`; a blank string is an
/// error, so it never falls back to a stored value.
pub(crate) fn string_field<'a>(fields: &'a RawFields, name: &str) -> Result<Option<&'a str>, String> {
    match present(fields, name) {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Err(REQUIRED.to_string()),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(NOT_A_STRING.to_string()),
    }
}

/// A field restricted to the tokens of `T`. Blank strings are rejected like
/// in [`string_field`].
pub(crate) fn choice_field<T: Choice>(fields: &RawFields, name: &str) -> Result<Option<T>, String> {
    match present(fields, name) {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Err(REQUIRED.to_string()),
        Some(value) => value
            .as_str()
            .and_then(T::from_token)
            .map(Some)
            .ok_or_else(|| invalid_choice(value)),
    }
}

/// Settle a parsed field against its update overlay.
///
/// A parse failure is recorded as-is. A missing value falls back to
/// `fallback`, and is a required-field error when there is none.
pub(crate) fn require<T>(
    errors: &mut FieldErrors,
    name: &str,
    parsed: Result<Option<T>, String>,
    fallback: Option<T>,
) -> Option<T> {
    match parsed {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            if fallback.is_none() {
                errors.add(name, REQUIRED);
            }
            fallback
        }
        Err(message) => {
            errors.add(name, message);
            None
        }
    }
}
