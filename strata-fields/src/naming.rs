//! Label-to-identifier derivation.
//!
//! Field names and option values are derived from their human-readable
//! labels: lowercase, runs of non-alphanumeric characters collapsed to a
//! single separator, leading/trailing separators stripped. Names use `_`,
//! option values use `-`.

use crate::error::{FieldsError, Result};

fn derive(label: &str, separator: char) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_separator = false;

    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push(separator);
            }
            pending_separator = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    out
}

/// Derive a field name from its label: `"My Cool Field!!"` → `my_cool_field`.
pub fn derive_field_name(label: &str) -> String {
    derive(label, '_')
}

/// Derive an option value from its label: `"In Review"` → `in-review`.
pub fn derive_option_value(label: &str) -> String {
    derive(label, '-')
}

/// Check a field name against `[a-z][a-z0-9_]*`.
pub fn is_valid_field_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Validate a field name, returning [`FieldsError::InvalidName`] on failure.
pub fn validate_field_name(name: &str) -> Result<()> {
    if is_valid_field_name(name) {
        Ok(())
    } else {
        Err(FieldsError::InvalidName {
            name: name.to_string(),
        })
    }
}
