//! Value codec — wire↔form conversion for JSON-like field types.
//!
//! Structured fields (JSON, Object, Array) may arrive from the backend as
//! either a raw string or a pre-parsed structure, and the operator edits
//! them as raw text. Every conversion here has a defined fallback; parse
//! failures never raise — the server is the final arbiter of validity.
//!
//! The live-edit handlers are deliberately more permissive than the final
//! submission cleanup (the Array editor wraps unparseable text into a
//! single-element array; the submission path never wraps). The asymmetry is
//! load-bearing: unifying it would change the persisted data shape for
//! existing entries.

use serde_json::{Map, Value};

use strata_fields::{FieldDef, FieldType};

/// Wire→form: parse stored strings for structured types; the raw string
/// survives a failed parse unchanged.
pub fn decode_wire(field_type: &FieldType, value: &Value) -> Value {
    if let (true, Value::String(s)) = (field_type.is_structured(), value) {
        serde_json::from_str(s).unwrap_or_else(|_| value.clone())
    } else {
        value.clone()
    }
}

/// Form→wire for a single value.
///
/// Empty string, null, and missing all collapse to JSON null. Structured
/// fields pass objects/arrays through and attempt to parse string values,
/// sending the raw string when the parse fails. Everything else is passed
/// through unchanged. No array wrapping happens here.
pub fn clean_value(field_type: &FieldType, value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::String(s) if s.is_empty() => Value::Null,
        Value::String(s) if field_type.is_structured() && !s.trim().is_empty() => {
            serde_json::from_str(s).unwrap_or_else(|_| value.clone())
        }
        // Number inputs hold their text; a parseable reading submits as a
        // number, anything else is left for the server to reject.
        Value::String(s) if *field_type == FieldType::Number => match s.parse::<f64>() {
            Ok(n) => serde_json::Number::from_f64(n).map_or_else(|| value.clone(), Value::Number),
            Err(_) => value.clone(),
        },
        _ => value.clone(),
    }
}

/// Build the submission payload: every form value cleaned per its field's
/// type. Values without a matching field definition are cleaned as plain
/// (empty collapses to null, everything else unchanged).
pub fn clean_for_submit(fields: &[FieldDef], values: &Map<String, Value>) -> Map<String, Value> {
    let mut cleaned = Map::new();
    for (name, value) in values {
        let field_type = fields
            .iter()
            .find(|f| &f.name == name)
            .map(|f| f.field_type.clone())
            .unwrap_or(FieldType::Text);
        cleaned.insert(name.clone(), clean_value(&field_type, value));
    }
    cleaned
}

/// Live-edit handler for the Array editor.
///
/// Empty input resets to an empty array. Text that parses as a JSON array
/// becomes that array; text that parses as anything else is wrapped in a
/// single-element array; text that does not parse becomes a single-element
/// array holding the raw text.
pub fn array_input(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Array(Vec::new());
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Value::Array(items),
        Ok(other) => Value::Array(vec![other]),
        Err(_) => Value::Array(vec![Value::String(text.to_string())]),
    }
}

/// Live-edit handler for the JSON editor.
///
/// Empty input resets to null (not `{}`). Text that parses becomes the
/// parsed value; text that does not parse is kept as the raw string. No
/// array wrapping occurs.
pub fn json_input(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Editor text for a JSON field's current value: raw strings as typed,
/// structured values pretty-printed.
pub fn json_display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_default(),
    }
}

/// Editor text for an Array field's current value.
pub fn array_display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Array(_) => serde_json::to_string_pretty(value).unwrap_or_default(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
