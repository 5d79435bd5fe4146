//! Widget selection — one typed input per field, keyed by field type.
//!
//! Types without a dedicated editor (multi-select, media, relationship,
//! object, and anything the client doesn't recognize) fall back to a plain
//! text input rather than failing form construction.

use chrono::{Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use strata_fields::{FieldDef, FieldType, SelectOption};

/// Input masking for single-line text variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Plain,
    Email,
    Url,
    Slug,
    Password,
}

/// The input widget rendered for a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Text { kind: TextKind },
    TextArea { rows: u8 },
    RichTextArea { rows: u8 },
    Number,
    BooleanToggle,
    DateInput,
    DateTimeInput,
    Select { options: Vec<SelectOption> },
    /// Paired swatch + hex text input.
    ColorPicker,
    JsonEditor { rows: u8 },
    ArrayEditor { rows: u8 },
    /// Plain text input for types with no dedicated editor.
    FallbackText,
}

/// Select the widget for a field. Never fails; unknown types get
/// [`Widget::FallbackText`].
pub fn widget_for(field: &FieldDef) -> Widget {
    match &field.field_type {
        FieldType::Text => Widget::Text {
            kind: TextKind::Plain,
        },
        FieldType::Email => Widget::Text {
            kind: TextKind::Email,
        },
        FieldType::Url => Widget::Text { kind: TextKind::Url },
        FieldType::Slug => Widget::Text {
            kind: TextKind::Slug,
        },
        FieldType::Password => Widget::Text {
            kind: TextKind::Password,
        },
        FieldType::TextArea => Widget::TextArea { rows: 4 },
        FieldType::RichText => Widget::RichTextArea { rows: 8 },
        FieldType::Number => Widget::Number,
        FieldType::Boolean => Widget::BooleanToggle,
        FieldType::Date => Widget::DateInput,
        FieldType::DateTime => Widget::DateTimeInput,
        FieldType::Select => Widget::Select {
            options: field.options().to_vec(),
        },
        FieldType::Color => Widget::ColorPicker,
        FieldType::Json => Widget::JsonEditor { rows: 8 },
        FieldType::Array => Widget::ArrayEditor { rows: 6 },
        _ => Widget::FallbackText,
    }
}

/// Normalize a `datetime-local` input string to a full ISO-8601 instant.
///
/// The input is interpreted in the local timezone and emitted as a UTC
/// RFC 3339 string with millisecond precision. Empty input yields an empty
/// string; text that is not a datetime is returned unchanged.
pub fn normalize_datetime_input(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f"));
    let Ok(naive) = naive else {
        return input.to_string();
    };

    let instant = match Local.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        // Skipped by a DST transition; treat the wall-clock reading as UTC.
        None => Utc.from_utc_datetime(&naive),
    };
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Display slice for the date input: the date part of a stored instant.
pub fn date_display(value: &str) -> &str {
    value.split('T').next().unwrap_or(value)
}

/// Display slice for the datetime-local input: `YYYY-MM-DDTHH:MM`.
pub fn datetime_display(value: &str) -> &str {
    value.get(..16).unwrap_or(value)
}
