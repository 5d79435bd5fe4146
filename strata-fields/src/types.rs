//! Core field definition types.
//!
//! All types serialize to/from the backend's camelCase JSON via serde.
//! Field definitions describe named, typed slots on a collection; the field
//! type decides what shape an entry value takes and which editor widget and
//! configuration sections apply.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::config::{FieldConfig, ValidationRules};

/// The type of a field — determines what shape the value takes.
///
/// The wire form is the backend's SCREAMING-CASE tag (`"TEXT"`,
/// `"MULTISELECT"`, …). Types this client does not know are carried through
/// [`FieldType::Other`] losslessly so a newer backend never breaks form
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    TextArea,
    RichText,
    Number,
    Boolean,
    Date,
    DateTime,
    Select,
    MultiSelect,
    Media,
    Relationship,
    Array,
    Object,
    Json,
    Slug,
    Email,
    Url,
    Color,
    Password,
    /// A server-introduced type this client has no special handling for.
    Other(String),
}

impl FieldType {
    /// The wire tag for this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "TEXT",
            Self::TextArea => "TEXTAREA",
            Self::RichText => "RICHTEXT",
            Self::Number => "NUMBER",
            Self::Boolean => "BOOLEAN",
            Self::Date => "DATE",
            Self::DateTime => "DATETIME",
            Self::Select => "SELECT",
            Self::MultiSelect => "MULTISELECT",
            Self::Media => "MEDIA",
            Self::Relationship => "RELATIONSHIP",
            Self::Array => "ARRAY",
            Self::Object => "OBJECT",
            Self::Json => "JSON",
            Self::Slug => "SLUG",
            Self::Email => "EMAIL",
            Self::Url => "URL",
            Self::Color => "COLOR",
            Self::Password => "PASSWORD",
            Self::Other(tag) => tag,
        }
    }

    /// Parse a wire tag. Unknown tags become [`FieldType::Other`].
    pub fn from_wire(tag: &str) -> Self {
        match tag {
            "TEXT" => Self::Text,
            "TEXTAREA" => Self::TextArea,
            "RICHTEXT" => Self::RichText,
            "NUMBER" => Self::Number,
            "BOOLEAN" => Self::Boolean,
            "DATE" => Self::Date,
            "DATETIME" => Self::DateTime,
            "SELECT" => Self::Select,
            "MULTISELECT" => Self::MultiSelect,
            "MEDIA" => Self::Media,
            "RELATIONSHIP" => Self::Relationship,
            "ARRAY" => Self::Array,
            "OBJECT" => Self::Object,
            "JSON" => Self::Json,
            "SLUG" => Self::Slug,
            "EMAIL" => Self::Email,
            "URL" => Self::Url,
            "COLOR" => Self::Color,
            "PASSWORD" => Self::Password,
            other => Self::Other(other.to_string()),
        }
    }

    /// True for types whose values are stored as JSON structures and may
    /// arrive serialized as strings.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Json | Self::Object | Self::Array)
    }

    /// False only for [`FieldType::Other`].
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&tag))
    }
}

/// A single option in a select or multi-select field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            color: None,
            icon: None,
        }
    }
}

/// A field definition — the complete schema for a single named slot on a
/// collection.
///
/// `name` is immutable after creation and unique within the collection;
/// `sort_order` drives presentation order. Only fields with both `hidden`
/// and `read_only` false are eligible for entry-authoring forms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub id: String,
    #[serde(default)]
    pub collection_id: String,
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<FieldConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub admin_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl FieldDef {
    /// Minimal definition for the given name, label, and type. Everything
    /// else takes the server defaults.
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: String::new(),
            collection_id: String::new(),
            name: name.into(),
            label: label.into(),
            field_type,
            description: None,
            required: false,
            unique: false,
            config: None,
            validation: None,
            default_value: None,
            sort_order: 0,
            hidden: false,
            read_only: false,
            admin_only: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// Whether this field belongs in an entry-authoring form.
    pub fn is_editable(&self) -> bool {
        !self.hidden && !self.read_only
    }

    /// Configured select options, if any.
    pub fn options(&self) -> &[SelectOption] {
        self.config.as_ref().map_or(&[], |c| c.options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectConfig;
    use serde_json::json;

    #[test]
    fn field_type_wire_round_trip() {
        for tag in ["TEXT", "MULTISELECT", "DATETIME", "PASSWORD"] {
            let ty = FieldType::from_wire(tag);
            assert!(ty.is_known());
            assert_eq!(ty.as_str(), tag);
            let json = serde_json::to_string(&ty).unwrap();
            let parsed: FieldType = serde_json::from_str(&json).unwrap();
            assert_eq!(ty, parsed);
        }
    }

    #[test]
    fn unknown_field_type_round_trips_losslessly() {
        let ty: FieldType = serde_json::from_value(json!("GEOPOINT")).unwrap();
        assert_eq!(ty, FieldType::Other("GEOPOINT".into()));
        assert!(!ty.is_known());
        assert_eq!(serde_json::to_value(&ty).unwrap(), json!("GEOPOINT"));
    }

    #[test]
    fn structured_types() {
        assert!(FieldType::Json.is_structured());
        assert!(FieldType::Object.is_structured());
        assert!(FieldType::Array.is_structured());
        assert!(!FieldType::Text.is_structured());
        assert!(!FieldType::Other("GEOPOINT".into()).is_structured());
    }

    #[test]
    fn field_def_json_round_trip() {
        let field = FieldDef {
            description: Some("Current workflow state".into()),
            required: true,
            config: Some(FieldConfig::Select(SelectConfig {
                options: vec![
                    SelectOption::new("backlog", "Backlog"),
                    SelectOption::new("done", "Done"),
                ],
                allow_custom: None,
            })),
            default_value: Some(json!("backlog")),
            sort_order: 3,
            ..FieldDef::new("status", "Status", FieldType::Select)
        };
        let json = serde_json::to_string(&field).unwrap();
        let parsed: FieldDef = serde_json::from_str(&json).unwrap();
        assert_eq!(field, parsed);
    }

    #[test]
    fn field_def_type_key_renames_on_wire() {
        let field = FieldDef::new("title", "Title", FieldType::Text);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "TEXT");
        assert!(json.get("fieldType").is_none());
        assert_eq!(json["sortOrder"], 0);
    }

    #[test]
    fn field_def_parses_server_payload() {
        let payload = json!({
            "id": "fld_01",
            "collectionId": "col_01",
            "name": "tags",
            "label": "Tags",
            "type": "MULTISELECT",
            "description": null,
            "required": false,
            "unique": false,
            "config": {"options": [{"value": "a", "label": "A"}]},
            "validation": {},
            "defaultValue": null,
            "sortOrder": 2,
            "hidden": false,
            "readOnly": false,
            "adminOnly": false
        });
        let field: FieldDef = serde_json::from_value(payload).unwrap();
        assert_eq!(field.field_type, FieldType::MultiSelect);
        assert_eq!(field.options().len(), 1);
        assert!(field.is_editable());
    }

    #[test]
    fn hidden_or_read_only_is_not_editable() {
        let mut field = FieldDef::new("internal", "Internal", FieldType::Text);
        field.hidden = true;
        assert!(!field.is_editable());
        field.hidden = false;
        field.read_only = true;
        assert!(!field.is_editable());
    }
}
