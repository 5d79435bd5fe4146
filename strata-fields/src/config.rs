//! Typed field configuration and validation constraints.
//!
//! The backend stores `config` and `validation` as open JSON maps whose
//! shape depends on the field type. Each capability gets its own variant
//! here so the relevant keys are statically typed, while serialization stays
//! wire-compatible with the open-map form (the variants are untagged).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::SelectOption;

/// Per-type field configuration.
///
/// Deserialization picks the variant whose required keys are present;
/// configurations this client does not model fall through to
/// [`FieldConfig::Other`] with the raw map preserved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldConfig {
    /// Select / multi-select option list.
    Select(SelectConfig),
    /// Reference to another collection.
    Relationship(RelationshipConfig),
    /// Slug generation source.
    Slug(SlugConfig),
    /// Media upload constraints.
    Media(MediaConfig),
    /// Anything else — kept verbatim for round-tripping.
    Other(Map<String, Value>),
}

/// Options for SELECT / MULTISELECT fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectConfig {
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_custom: Option<bool>,
}

/// Target of a RELATIONSHIP field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipConfig {
    /// Slug of the collection this field points at.
    pub related_collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,
}

/// Source of a SLUG field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlugConfig {
    /// Name of the field the slug is generated from.
    pub source_field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

/// Upload constraints for MEDIA fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MediaConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_types: Option<Vec<String>>,
    /// Maximum file size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,
}

impl FieldConfig {
    /// Select options, empty for other variants.
    pub fn options(&self) -> &[SelectOption] {
        match self {
            Self::Select(c) => &c.options,
            _ => &[],
        }
    }

    /// Related collection slug for relationship configs.
    pub fn related_collection(&self) -> Option<&str> {
        match self {
            Self::Relationship(c) => Some(&c.related_collection),
            _ => None,
        }
    }

    /// Slug source field name for slug configs.
    pub fn source_field(&self) -> Option<&str> {
        match self {
            Self::Slug(c) => Some(&c.source_field),
            _ => None,
        }
    }

    /// Build a select config from an option list.
    pub fn select(options: Vec<SelectOption>) -> Self {
        Self::Select(SelectConfig {
            options,
            allow_custom: None,
        })
    }

    /// Build a relationship config pointing at a collection slug.
    pub fn relationship(related_collection: impl Into<String>) -> Self {
        Self::Relationship(RelationshipConfig {
            related_collection: related_collection.into(),
            display_field: None,
            multiple: None,
        })
    }

    /// Build a slug config sourced from a field name.
    pub fn slug(source_field: impl Into<String>) -> Self {
        Self::Slug(SlugConfig {
            source_field: source_field.into(),
            prefix: None,
            suffix: None,
        })
    }
}

/// Validation constraints, keyed the way the backend stores them.
///
/// Only the constraints applicable to a field's type are populated; absent
/// keys are omitted on the wire so the server can distinguish "no
/// constraint" from an explicit value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,
}

impl ValidationRules {
    /// True when no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.min.is_none()
            && self.max.is_none()
            && self.pattern.is_none()
            && self.allowed_types.is_none()
            && self.max_size.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn select_config_from_wire() {
        let config: FieldConfig = serde_json::from_value(json!({
            "options": [
                {"value": "draft", "label": "Draft"},
                {"value": "live", "label": "Live", "color": "green"}
            ]
        }))
        .unwrap();
        assert_eq!(config.options().len(), 2);
        assert_eq!(config.options()[1].color.as_deref(), Some("green"));
    }

    #[test]
    fn relationship_config_from_wire() {
        let config: FieldConfig =
            serde_json::from_value(json!({"relatedCollection": "authors", "multiple": true}))
                .unwrap();
        assert_eq!(config.related_collection(), Some("authors"));
        assert!(config.options().is_empty());
    }

    #[test]
    fn slug_config_from_wire() {
        let config: FieldConfig =
            serde_json::from_value(json!({"sourceField": "title"})).unwrap();
        assert_eq!(config.source_field(), Some("title"));
    }

    #[test]
    fn unmodeled_config_is_preserved() {
        let raw = json!({"precision": 2, "step": 0.5});
        let config: FieldConfig = serde_json::from_value(raw.clone()).unwrap();
        assert!(matches!(config, FieldConfig::Other(_)));
        assert_eq!(serde_json::to_value(&config).unwrap(), raw);
    }

    #[test]
    fn config_wire_shape_is_flat() {
        let config = FieldConfig::slug("title");
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({"sourceField": "title"})
        );
    }

    #[test]
    fn validation_rules_skip_absent_keys() {
        let rules = ValidationRules {
            min_length: Some(1),
            max_length: Some(80),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&rules).unwrap(),
            json!({"minLength": 1, "maxLength": 80})
        );
        assert!(!rules.is_empty());
        assert!(ValidationRules::default().is_empty());
    }
}
