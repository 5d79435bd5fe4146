//! Schema compiler — field list in, runtime validators and defaults out.
//!
//! Each field type maps to exactly one value shape; the compiled schema
//! checks shape and presence only. Range/pattern constraints from a field's
//! `validation` rules are server-enforced and deliberately not re-checked
//! here. Unknown field types get the permissive string validator so schema
//! evolution on the server never breaks form construction.

use serde_json::{Map, Value};
use tracing::warn;

use strata_fields::{FieldDef, FieldType};

use crate::error::FieldIssue;

pub const MSG_REQUIRED: &str = "Required";
pub const MSG_INVALID_JSON: &str = "Invalid JSON format";
pub const MSG_INVALID_ARRAY: &str = "Must be a valid JSON array";

/// The value shape a compiled validator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// Plain string. Also the fallback for unrecognized types.
    Text,
    /// Number, numeric string, or the empty-string "no value" sentinel.
    Number,
    Boolean,
    /// Sequence of strings.
    StringList,
    /// Structured value, or a string that parses as JSON.
    Json,
    /// Array, or a string that parses as a JSON array.
    JsonArray,
}

impl ValueShape {
    /// Select the shape for a field type.
    pub fn for_type(field_type: &FieldType) -> Self {
        match field_type {
            FieldType::Number => Self::Number,
            FieldType::Boolean => Self::Boolean,
            FieldType::MultiSelect => Self::StringList,
            FieldType::Json | FieldType::Object => Self::Json,
            FieldType::Array => Self::JsonArray,
            // Text variants, dates (ISO-shaped strings), select values, and
            // anything unrecognized are all plain strings to this layer.
            _ => Self::Text,
        }
    }

    /// Check a present, non-empty value against this shape.
    fn check(self, value: &Value) -> Option<&'static str> {
        match self {
            Self::Text => match value {
                Value::String(_) => None,
                _ => Some("Expected text"),
            },
            Self::Number => match value {
                Value::Number(_) => None,
                Value::String(s) if s.parse::<f64>().is_ok() => None,
                _ => Some("Expected a number"),
            },
            Self::Boolean => match value {
                Value::Bool(_) => None,
                _ => Some("Expected true or false"),
            },
            Self::StringList => match value {
                Value::Array(items) if items.iter().all(Value::is_string) => None,
                _ => Some("Expected a list of strings"),
            },
            Self::Json => match value {
                Value::Object(_) | Value::Array(_) => None,
                Value::String(s) => match serde_json::from_str::<Value>(s) {
                    Ok(_) => None,
                    Err(_) => Some(MSG_INVALID_JSON),
                },
                _ => Some(MSG_INVALID_JSON),
            },
            Self::JsonArray => match value {
                Value::Array(_) => None,
                Value::String(s) => match serde_json::from_str::<Value>(s) {
                    Ok(Value::Array(_)) => None,
                    _ => Some(MSG_INVALID_ARRAY),
                },
                _ => Some(MSG_INVALID_ARRAY),
            },
        }
    }
}

/// Compiled validator for one field.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    pub name: String,
    pub required: bool,
    pub shape: ValueShape,
}

/// Null, missing, and the empty string all count as "no value entered".
fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        _ => false,
    }
}

impl FieldValidator {
    /// Validate one value. Absence fails only for required fields.
    pub fn check(&self, value: Option<&Value>) -> Option<FieldIssue> {
        if is_absent(value) {
            return self
                .required
                .then(|| FieldIssue::new(&self.name, MSG_REQUIRED));
        }
        let value = value?;
        self.shape
            .check(value)
            .map(|message| FieldIssue::new(&self.name, message))
    }
}

/// The compiled validation schema for a field list.
#[derive(Debug, Clone, Default)]
pub struct EntrySchema {
    validators: Vec<FieldValidator>,
}

impl EntrySchema {
    /// Validators in input order.
    pub fn validators(&self) -> &[FieldValidator] {
        &self.validators
    }

    /// Validator for a field name.
    pub fn validator(&self, name: &str) -> Option<&FieldValidator> {
        self.validators.iter().find(|v| v.name == name)
    }

    /// Check a full value map, returning every issue found.
    pub fn validate(&self, values: &Map<String, Value>) -> Vec<FieldIssue> {
        self.validators
            .iter()
            .filter_map(|v| v.check(values.get(&v.name)))
            .collect()
    }
}

/// Compile a field list into a validation schema.
///
/// Callers normally pass the editable subset sorted by `sort_order`, but an
/// unfiltered or unsorted list compiles without error — filtering is the
/// form session's job.
pub fn compile(fields: &[FieldDef]) -> EntrySchema {
    let validators = fields
        .iter()
        .map(|field| {
            if !field.field_type.is_known() {
                warn!(
                    field = %field.name,
                    field_type = %field.field_type,
                    "unknown field type, compiling as plain text"
                );
            }
            FieldValidator {
                name: field.name.clone(),
                required: field.required,
                shape: ValueShape::for_type(&field.field_type),
            }
        })
        .collect();
    EntrySchema { validators }
}

/// The builtin default for a type, used when a field defines no default of
/// its own.
pub fn builtin_default(field_type: &FieldType) -> Value {
    match field_type {
        FieldType::Boolean => Value::Bool(false),
        // Empty sentinel: "no value entered", distinct from 0.
        FieldType::Number => Value::String(String::new()),
        FieldType::MultiSelect | FieldType::Array => Value::Array(Vec::new()),
        FieldType::Object | FieldType::Json => Value::Object(Map::new()),
        _ => Value::String(String::new()),
    }
}

/// Stored strings for structured types are opportunistically parsed; the raw
/// string survives a failed parse unchanged.
fn parse_if_string(field_type: &FieldType, value: &Value) -> Value {
    if let (true, Value::String(s)) = (field_type.is_structured(), value) {
        serde_json::from_str(s).unwrap_or_else(|_| value.clone())
    } else {
        value.clone()
    }
}

/// Compute the initial form value for every field.
///
/// An existing entry's value wins; otherwise the field's `default_value`;
/// otherwise the per-type builtin. Exactly one value per field name.
pub fn default_values(
    fields: &[FieldDef],
    existing: Option<&Map<String, Value>>,
) -> Map<String, Value> {
    let mut defaults = Map::new();

    for field in fields {
        let stored = existing.and_then(|data| data.get(&field.name));
        let value = match stored {
            Some(v) if !v.is_null() => parse_if_string(&field.field_type, v),
            _ => match &field.default_value {
                Some(v) if !v.is_null() => parse_if_string(&field.field_type, v),
                _ => builtin_default(&field.field_type),
            },
        };
        defaults.insert(field.name.clone(), value);
    }

    defaults
}
