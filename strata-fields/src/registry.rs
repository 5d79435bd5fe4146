//! Field type registry — the single source of truth for what each field
//! type looks like in the console and which configuration sections it gets.
//!
//! The registry is constructed data, not ambient global state: callers hold
//! a [`FieldTypeRegistry`] (usually [`FieldTypeRegistry::builtin`]) and pass
//! it where type capabilities are needed. Lookups on unknown types return
//! `None`; every call site falls back to plain-text handling.

use crate::types::FieldType;

/// Which validation constraints a type's validation section offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    pub min_length: bool,
    pub max_length: bool,
    pub min: bool,
    pub max: bool,
    pub pattern: bool,
    pub allowed_types: bool,
    pub max_size: bool,
}

impl ValidationOptions {
    /// True when at least one constraint applies.
    pub fn any(&self) -> bool {
        self.min_length
            || self.max_length
            || self.min
            || self.max
            || self.pattern
            || self.allowed_types
            || self.max_size
    }
}

/// Display metadata and capability flags for one field type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTypeConfig {
    pub value: FieldType,
    pub label: &'static str,
    pub description: &'static str,
    /// Icon key understood by the console's icon set.
    pub icon: &'static str,
    /// Foreground and background color tokens for the type badge.
    pub color: &'static str,
    pub bg_color: &'static str,
    pub has_options: bool,
    pub has_validation: bool,
    pub has_default_value: bool,
    pub has_relationship: bool,
    pub has_media_config: bool,
    pub has_slug_source: bool,
    pub validation_options: Option<ValidationOptions>,
}

/// Fallback color tokens for types the registry does not know.
const FALLBACK_COLOR: &str = "text-gray-800";
const FALLBACK_BG_COLOR: &str = "bg-gray-100";
const FALLBACK_ICON: &str = "HelpCircle";

/// Immutable lookup table mapping field types to their console metadata.
#[derive(Debug, Clone)]
pub struct FieldTypeRegistry {
    entries: Vec<FieldTypeConfig>,
}

impl FieldTypeRegistry {
    /// Build a registry from an explicit entry list. Used by tests to
    /// substitute a reduced table.
    pub fn new(entries: Vec<FieldTypeConfig>) -> Self {
        Self { entries }
    }

    /// The full builtin type table.
    pub fn builtin() -> Self {
        Self::new(builtin_entries())
    }

    /// Look up a type's configuration. Unknown types return `None`, never
    /// panic — call sites fall back to plain-text handling.
    pub fn lookup(&self, field_type: &FieldType) -> Option<&FieldTypeConfig> {
        self.entries.iter().find(|e| &e.value == field_type)
    }

    /// All registered entries, in presentation order.
    pub fn entries(&self) -> &[FieldTypeConfig] {
        &self.entries
    }

    /// Display label for a type; unknown types show their wire tag.
    pub fn label_for<'a>(&'a self, field_type: &'a FieldType) -> &'a str {
        self.lookup(field_type)
            .map_or(field_type.as_str(), |e| e.label)
    }

    /// Icon key for a type, with a question-mark fallback.
    pub fn icon_for(&self, field_type: &FieldType) -> &'static str {
        self.lookup(field_type).map_or(FALLBACK_ICON, |e| e.icon)
    }

    /// Combined badge color classes for a type.
    pub fn color_for(&self, field_type: &FieldType) -> String {
        match self.lookup(field_type) {
            Some(e) => format!("{} {}", e.bg_color, e.color),
            None => format!("{FALLBACK_BG_COLOR} {FALLBACK_COLOR}"),
        }
    }

    pub fn has_options(&self, field_type: &FieldType) -> bool {
        self.lookup(field_type).is_some_and(|e| e.has_options)
    }

    pub fn has_validation(&self, field_type: &FieldType) -> bool {
        self.lookup(field_type).is_some_and(|e| e.has_validation)
    }

    pub fn has_relationship(&self, field_type: &FieldType) -> bool {
        self.lookup(field_type).is_some_and(|e| e.has_relationship)
    }

    pub fn has_media_config(&self, field_type: &FieldType) -> bool {
        self.lookup(field_type).is_some_and(|e| e.has_media_config)
    }

    pub fn has_slug_source(&self, field_type: &FieldType) -> bool {
        self.lookup(field_type).is_some_and(|e| e.has_slug_source)
    }

    /// Types whose config carries an option list.
    pub fn types_with_options(&self) -> Vec<FieldType> {
        self.entries
            .iter()
            .filter(|e| e.has_options)
            .map(|e| e.value.clone())
            .collect()
    }

    /// Types that expose a validation section.
    pub fn types_with_validation(&self) -> Vec<FieldType> {
        self.entries
            .iter()
            .filter(|e| e.has_validation)
            .map(|e| e.value.clone())
            .collect()
    }
}

impl Default for FieldTypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_entries() -> Vec<FieldTypeConfig> {
    // One row per known type. Capability flags decide which editor sections
    // appear; validation_options narrows the validation section further.
    let plain = FieldTypeConfig {
        value: FieldType::Text,
        label: "",
        description: "",
        icon: "",
        color: "",
        bg_color: "",
        has_options: false,
        has_validation: false,
        has_default_value: true,
        has_relationship: false,
        has_media_config: false,
        has_slug_source: false,
        validation_options: None,
    };

    vec![
        FieldTypeConfig {
            value: FieldType::Text,
            label: "Text",
            description: "Single line text input",
            icon: "Type",
            color: "text-blue-800",
            bg_color: "bg-blue-100",
            has_validation: true,
            validation_options: Some(ValidationOptions {
                min_length: true,
                max_length: true,
                pattern: true,
                ..Default::default()
            }),
            ..plain.clone()
        },
        FieldTypeConfig {
            value: FieldType::TextArea,
            label: "Text Area",
            description: "Multi-line text input",
            icon: "AlignLeft",
            color: "text-blue-800",
            bg_color: "bg-blue-100",
            has_validation: true,
            validation_options: Some(ValidationOptions {
                min_length: true,
                max_length: true,
                ..Default::default()
            }),
            ..plain.clone()
        },
        FieldTypeConfig {
            value: FieldType::RichText,
            label: "Rich Text",
            description: "Rich text editor with formatting",
            icon: "FileText",
            color: "text-purple-800",
            bg_color: "bg-purple-100",
            has_validation: true,
            validation_options: Some(ValidationOptions {
                min_length: true,
                max_length: true,
                ..Default::default()
            }),
            ..plain.clone()
        },
        FieldTypeConfig {
            value: FieldType::Number,
            label: "Number",
            description: "Numeric input (integer or decimal)",
            icon: "Hash",
            color: "text-green-800",
            bg_color: "bg-green-100",
            has_validation: true,
            validation_options: Some(ValidationOptions {
                min: true,
                max: true,
                ..Default::default()
            }),
            ..plain.clone()
        },
        FieldTypeConfig {
            value: FieldType::Boolean,
            label: "Boolean",
            description: "True/False toggle",
            icon: "ToggleLeft",
            color: "text-yellow-800",
            bg_color: "bg-yellow-100",
            ..plain.clone()
        },
        FieldTypeConfig {
            value: FieldType::Date,
            label: "Date",
            description: "Date picker (without time)",
            icon: "Calendar",
            color: "text-orange-800",
            bg_color: "bg-orange-100",
            ..plain.clone()
        },
        FieldTypeConfig {
            value: FieldType::DateTime,
            label: "Date & Time",
            description: "Date and time picker",
            icon: "Clock",
            color: "text-orange-800",
            bg_color: "bg-orange-100",
            ..plain.clone()
        },
        FieldTypeConfig {
            value: FieldType::Select,
            label: "Select",
            description: "Dropdown with predefined options",
            icon: "ChevronDown",
            color: "text-pink-800",
            bg_color: "bg-pink-100",
            has_options: true,
            ..plain.clone()
        },
        FieldTypeConfig {
            value: FieldType::MultiSelect,
            label: "Multi Select",
            description: "Multiple selection from options",
            icon: "CheckSquare",
            color: "text-pink-800",
            bg_color: "bg-pink-100",
            has_options: true,
            ..plain.clone()
        },
        FieldTypeConfig {
            value: FieldType::Media,
            label: "Media",
            description: "Image, video, or file upload",
            icon: "Image",
            color: "text-indigo-800",
            bg_color: "bg-indigo-100",
            has_validation: true,
            has_default_value: false,
            has_media_config: true,
            validation_options: Some(ValidationOptions {
                allowed_types: true,
                max_size: true,
                ..Default::default()
            }),
            ..plain.clone()
        },
        FieldTypeConfig {
            value: FieldType::Relationship,
            label: "Relationship",
            description: "Reference to another collection",
            icon: "Link",
            color: "text-cyan-800",
            bg_color: "bg-cyan-100",
            has_default_value: false,
            has_relationship: true,
            ..plain.clone()
        },
        FieldTypeConfig {
            value: FieldType::Array,
            label: "Array",
            description: "List of values",
            icon: "List",
            color: "text-gray-800",
            bg_color: "bg-gray-100",
            ..plain.clone()
        },
        FieldTypeConfig {
            value: FieldType::Object,
            label: "Object",
            description: "Nested object structure",
            icon: "Braces",
            color: "text-gray-800",
            bg_color: "bg-gray-100",
            ..plain.clone()
        },
        FieldTypeConfig {
            value: FieldType::Json,
            label: "JSON",
            description: "Raw JSON data",
            icon: "Code",
            color: "text-gray-800",
            bg_color: "bg-gray-100",
            ..plain.clone()
        },
        FieldTypeConfig {
            value: FieldType::Slug,
            label: "Slug",
            description: "URL-friendly identifier",
            icon: "Link2",
            color: "text-gray-800",
            bg_color: "bg-gray-100",
            has_validation: true,
            has_default_value: false,
            has_slug_source: true,
            validation_options: Some(ValidationOptions {
                max_length: true,
                ..Default::default()
            }),
            ..plain.clone()
        },
        FieldTypeConfig {
            value: FieldType::Email,
            label: "Email",
            description: "Email address input",
            icon: "Mail",
            color: "text-teal-800",
            bg_color: "bg-teal-100",
            has_validation: true,
            validation_options: Some(ValidationOptions {
                pattern: true,
                ..Default::default()
            }),
            ..plain.clone()
        },
        FieldTypeConfig {
            value: FieldType::Url,
            label: "URL",
            description: "Web address input",
            icon: "Globe",
            color: "text-teal-800",
            bg_color: "bg-teal-100",
            has_validation: true,
            validation_options: Some(ValidationOptions {
                pattern: true,
                ..Default::default()
            }),
            ..plain.clone()
        },
        FieldTypeConfig {
            value: FieldType::Color,
            label: "Color",
            description: "Color picker",
            icon: "Palette",
            color: "text-rose-800",
            bg_color: "bg-rose-100",
            ..plain.clone()
        },
        FieldTypeConfig {
            value: FieldType::Password,
            label: "Password",
            description: "Masked password input",
            icon: "Lock",
            color: "text-red-800",
            bg_color: "bg-red-100",
            has_validation: true,
            has_default_value: false,
            validation_options: Some(ValidationOptions {
                min_length: true,
                max_length: true,
                pattern: true,
                ..Default::default()
            }),
            ..plain
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_known_type() {
        let registry = FieldTypeRegistry::builtin();
        assert_eq!(registry.entries().len(), 19);
        for entry in registry.entries() {
            assert!(entry.value.is_known());
            assert!(!entry.label.is_empty());
        }
    }

    #[test]
    fn lookup_unknown_type_is_none_not_panic() {
        let registry = FieldTypeRegistry::builtin();
        let unknown = FieldType::Other("GEOPOINT".into());
        assert!(registry.lookup(&unknown).is_none());
        assert_eq!(registry.label_for(&unknown), "GEOPOINT");
        assert_eq!(registry.icon_for(&unknown), "HelpCircle");
        assert_eq!(registry.color_for(&unknown), "bg-gray-100 text-gray-800");
    }

    #[test]
    fn capability_flags_match_type_table() {
        let registry = FieldTypeRegistry::builtin();
        assert!(registry.has_options(&FieldType::Select));
        assert!(registry.has_options(&FieldType::MultiSelect));
        assert!(!registry.has_options(&FieldType::Text));
        assert!(registry.has_relationship(&FieldType::Relationship));
        assert!(registry.has_slug_source(&FieldType::Slug));
        assert!(registry.has_media_config(&FieldType::Media));
        assert!(registry.has_validation(&FieldType::Password));
        assert!(!registry.has_validation(&FieldType::Boolean));
    }

    #[test]
    fn validation_options_narrow_by_type() {
        let registry = FieldTypeRegistry::builtin();
        let number = registry.lookup(&FieldType::Number).unwrap();
        let opts = number.validation_options.unwrap();
        assert!(opts.min && opts.max);
        assert!(!opts.min_length && !opts.pattern);

        let slug = registry.lookup(&FieldType::Slug).unwrap();
        let opts = slug.validation_options.unwrap();
        assert!(opts.max_length && opts.any());
        assert!(!opts.min_length);
    }

    #[test]
    fn types_with_options_lists_selects() {
        let registry = FieldTypeRegistry::builtin();
        assert_eq!(
            registry.types_with_options(),
            vec![FieldType::Select, FieldType::MultiSelect]
        );
    }

    #[test]
    fn reduced_registry_can_be_substituted() {
        let registry = FieldTypeRegistry::new(vec![FieldTypeConfig {
            value: FieldType::Text,
            label: "Text",
            description: "plain",
            icon: "Type",
            color: "text-blue-800",
            bg_color: "bg-blue-100",
            has_options: false,
            has_validation: false,
            has_default_value: true,
            has_relationship: false,
            has_media_config: false,
            has_slug_source: false,
            validation_options: None,
        }]);
        assert!(registry.lookup(&FieldType::Text).is_some());
        assert!(registry.lookup(&FieldType::Select).is_none());
    }
}
