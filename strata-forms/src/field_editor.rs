//! Field definition editor — the type-conditional form for creating and
//! editing the fields themselves.
//!
//! Structurally a sibling of the entry form, but the conditional sections
//! depend on the selected field type's capability flags rather than on an
//! entry. The type is only editable at creation; the name derives from the
//! label until the operator takes over.

use std::collections::BTreeMap;

use tracing::debug;

use strata_fields::{
    derive_field_name, derive_option_value, is_valid_field_name, FieldConfig, FieldDef, FieldType,
    FieldTypeRegistry, SelectOption, ValidationOptions, ValidationRules,
};

use crate::entry_form::CloseOutcome;
use crate::error::{FieldIssue, FormError, Result};

/// Create a new field or edit an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { field_id: String },
}

/// One repeatable `{value, label}` row in the options sub-list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionRow {
    pub value: String,
    pub label: String,
}

/// The cleaned field payload built on submit. `config` and `validation`
/// are absent (not empty maps) when nothing applies, so the server can
/// tell "no configuration" apart from "explicitly empty configuration".
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPayload {
    pub name: String,
    pub label: String,
    pub field_type: FieldType,
    pub description: Option<String>,
    pub required: bool,
    pub unique: bool,
    pub config: Option<FieldConfig>,
    pub validation: Option<ValidationRules>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open { submitting: bool },
    Closed(CloseOutcome),
}

/// Form state for one field-definition editing session.
#[derive(Debug, Clone)]
pub struct FieldEditorSession {
    state: State,
    registry: FieldTypeRegistry,
    mode: EditorMode,
    label: String,
    name: String,
    name_touched: bool,
    field_type: FieldType,
    description: String,
    required: bool,
    unique: bool,
    options: Vec<OptionRow>,
    related_collection: String,
    source_field: String,
    // Numeric constraint inputs keep their text; empty means unset.
    min_length: String,
    max_length: String,
    min: String,
    max: String,
    pattern: String,
    issues: BTreeMap<String, String>,
    submit_error: Option<String>,
}

impl FieldEditorSession {
    /// Open in create mode with the default (Text) type selected and one
    /// empty option row ready.
    pub fn open_create(registry: FieldTypeRegistry) -> Self {
        debug!("field editor opened (create)");
        Self {
            state: State::Open { submitting: false },
            registry,
            mode: EditorMode::Create,
            label: String::new(),
            name: String::new(),
            name_touched: false,
            field_type: FieldType::Text,
            description: String::new(),
            required: false,
            unique: false,
            options: vec![OptionRow::default()],
            related_collection: String::new(),
            source_field: String::new(),
            min_length: String::new(),
            max_length: String::new(),
            min: String::new(),
            max: String::new(),
            pattern: String::new(),
            issues: BTreeMap::new(),
            submit_error: None,
        }
    }

    /// Open in edit mode, prefilled from the persisted definition.
    pub fn open_edit(registry: FieldTypeRegistry, field: &FieldDef) -> Self {
        let mut options: Vec<OptionRow> = field
            .options()
            .iter()
            .map(|o| OptionRow {
                value: o.value.clone(),
                label: o.label.clone(),
            })
            .collect();
        if options.is_empty() {
            options.push(OptionRow::default());
        }

        let config = field.config.as_ref();
        let rules = field.validation.clone().unwrap_or_default();
        let number_text = |n: Option<u64>| n.map(|v| v.to_string()).unwrap_or_default();
        let float_text = |n: Option<f64>| n.map(|v| v.to_string()).unwrap_or_default();

        debug!(field = %field.name, "field editor opened (edit)");
        Self {
            state: State::Open { submitting: false },
            registry,
            mode: EditorMode::Edit {
                field_id: field.id.clone(),
            },
            label: field.label.clone(),
            name: field.name.clone(),
            name_touched: true,
            field_type: field.field_type.clone(),
            description: field.description.clone().unwrap_or_default(),
            required: field.required,
            unique: field.unique,
            options,
            related_collection: config
                .and_then(FieldConfig::related_collection)
                .unwrap_or_default()
                .to_string(),
            source_field: config
                .and_then(FieldConfig::source_field)
                .unwrap_or_default()
                .to_string(),
            min_length: number_text(rules.min_length),
            max_length: number_text(rules.max_length),
            min: float_text(rules.min),
            max: float_text(rules.max),
            pattern: rules.pattern.unwrap_or_default(),
            issues: BTreeMap::new(),
            submit_error: None,
        }
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open { .. })
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, State::Open { submitting: true })
    }

    /// The terminal event, once the session has closed.
    pub fn outcome(&self) -> Option<CloseOutcome> {
        match self.state {
            State::Closed(outcome) => Some(outcome),
            State::Open { .. } => None,
        }
    }

    /// Apply the network outcome of an in-flight submission. Success
    /// closes the editor; failure keeps it open with entered values
    /// intact. A no-op once closed.
    pub fn finish_submit(&mut self, result: std::result::Result<(), String>) {
        match self.state {
            State::Closed(_) => {}
            State::Open { .. } => match result {
                Ok(()) => self.state = State::Closed(CloseOutcome::Saved),
                Err(message) => {
                    self.submit_error = Some(message);
                    self.state = State::Open { submitting: false };
                }
            },
        }
    }

    /// Dismiss the editor without saving.
    pub fn close(&mut self) {
        if self.is_open() {
            self.state = State::Closed(CloseOutcome::Cancelled);
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, EditorMode::Edit { .. })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn options(&self) -> &[OptionRow] {
        &self.options
    }

    pub fn issues(&self) -> &BTreeMap<String, String> {
        &self.issues
    }

    /// The message from the last failed submission, if any.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Entries for the type dropdown (create mode only renders it).
    pub fn type_choices(&self) -> &[strata_fields::FieldTypeConfig] {
        self.registry.entries()
    }

    /// Change the label. In create mode, while the name is empty and the
    /// operator has not typed into it, the name is derived automatically.
    pub fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
        if !self.is_edit() && !self.name_touched && self.name.is_empty() {
            self.name = derive_field_name(label);
        }
    }

    /// Change the name directly. Stops label auto-derivation for this
    /// session. Immutable in edit mode.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        if self.is_edit() {
            return Err(FormError::ReadOnly { field: "name" });
        }
        self.name = name.to_string();
        self.name_touched = true;
        Ok(())
    }

    /// Change the field type. Only possible at creation time.
    pub fn set_type(&mut self, field_type: FieldType) -> Result<()> {
        if self.is_edit() {
            return Err(FormError::ReadOnly { field: "type" });
        }
        self.field_type = field_type;
        Ok(())
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn set_unique(&mut self, unique: bool) {
        self.unique = unique;
    }

    pub fn set_related_collection(&mut self, slug: &str) {
        self.related_collection = slug.to_string();
    }

    pub fn set_source_field(&mut self, name: &str) {
        self.source_field = name.to_string();
    }

    pub fn set_min_length(&mut self, text: &str) {
        self.min_length = text.to_string();
    }

    pub fn set_max_length(&mut self, text: &str) {
        self.max_length = text.to_string();
    }

    pub fn set_min(&mut self, text: &str) {
        self.min = text.to_string();
    }

    pub fn set_max(&mut self, text: &str) {
        self.max = text.to_string();
    }

    pub fn set_pattern(&mut self, text: &str) {
        self.pattern = text.to_string();
    }

    /// Append an empty option row.
    pub fn add_option(&mut self) {
        self.options.push(OptionRow::default());
    }

    /// Remove an option row. The last row cannot be removed.
    pub fn remove_option(&mut self, index: usize) -> Result<()> {
        if self.options.len() == 1 {
            return Err(FormError::LastOptionRow);
        }
        if index >= self.options.len() {
            return Err(FormError::InvalidOption { index });
        }
        self.options.remove(index);
        Ok(())
    }

    /// Change an option's label; its stored value derives from the label
    /// (hyphenated) while still empty.
    pub fn set_option_label(&mut self, index: usize, label: &str) -> Result<()> {
        let row = self
            .options
            .get_mut(index)
            .ok_or(FormError::InvalidOption { index })?;
        row.label = label.to_string();
        if row.value.is_empty() {
            row.value = derive_option_value(label);
        }
        Ok(())
    }

    /// Change an option's stored value directly.
    pub fn set_option_value(&mut self, index: usize, value: &str) -> Result<()> {
        let row = self
            .options
            .get_mut(index)
            .ok_or(FormError::InvalidOption { index })?;
        row.value = value.to_string();
        Ok(())
    }

    // --- Conditional sections ---

    pub fn shows_options(&self) -> bool {
        self.registry.has_options(&self.field_type)
    }

    pub fn shows_relationship(&self) -> bool {
        self.registry.has_relationship(&self.field_type)
    }

    pub fn shows_slug_source(&self) -> bool {
        self.registry.has_slug_source(&self.field_type)
    }

    /// The validation section appears only when the type declares at least
    /// one applicable constraint.
    pub fn shows_validation(&self) -> bool {
        self.registry.has_validation(&self.field_type) && self.validation_opts().any()
    }

    /// Slug-source candidates: plain Text fields only.
    pub fn slug_source_candidates<'a>(&self, fields: &'a [FieldDef]) -> Vec<&'a FieldDef> {
        fields
            .iter()
            .filter(|f| f.field_type == FieldType::Text)
            .collect()
    }

    fn validation_opts(&self) -> ValidationOptions {
        self.registry
            .lookup(&self.field_type)
            .filter(|e| e.has_validation)
            .and_then(|e| e.validation_options)
            .unwrap_or_default()
    }

    /// Validate the form and build the submission payload. On success the
    /// submit control is disabled until
    /// [`FieldEditorSession::finish_submit`] reports the network outcome.
    pub fn payload(&mut self) -> Result<FieldPayload> {
        if !self.is_open() {
            return Err(FormError::NotOpen);
        }
        self.issues.clear();
        self.submit_error = None;

        if self.label.trim().is_empty() {
            self.issues.insert("label".into(), "Label is required".into());
        }
        if self.name.is_empty() {
            self.issues.insert("name".into(), "Name is required".into());
        } else if !is_valid_field_name(&self.name) {
            self.issues.insert(
                "name".into(),
                "Lowercase letters, numbers, and underscores only".into(),
            );
        }

        let opts = self.validation_opts();
        let min_length = parse_count(&mut self.issues, opts.min_length, "minLength", &self.min_length);
        let max_length = parse_count(&mut self.issues, opts.max_length, "maxLength", &self.max_length);
        let min = parse_number(&mut self.issues, opts.min, "min", &self.min);
        let max = parse_number(&mut self.issues, opts.max, "max", &self.max);

        if !self.issues.is_empty() {
            let issues = self
                .issues
                .iter()
                .map(|(field, message)| FieldIssue::new(field, message))
                .collect();
            return Err(FormError::Validation { issues });
        }

        let config = self.build_config();

        let validation = ValidationRules {
            min_length,
            max_length,
            min,
            max,
            pattern: (opts.pattern && !self.pattern.is_empty()).then(|| self.pattern.clone()),
            allowed_types: None,
            max_size: None,
        };
        let validation = (!validation.is_empty()).then_some(validation);

        self.state = State::Open { submitting: true };
        Ok(FieldPayload {
            name: self.name.clone(),
            label: self.label.clone(),
            field_type: self.field_type.clone(),
            description: (!self.description.is_empty()).then(|| self.description.clone()),
            required: self.required,
            unique: self.unique,
            config,
            validation,
        })
    }

    /// Only keys relevant to the selected type, only with real values; an
    /// entirely empty config is absent.
    fn build_config(&self) -> Option<FieldConfig> {
        if self.shows_options() {
            let valid: Vec<SelectOption> = self
                .options
                .iter()
                .filter(|row| !row.value.is_empty() && !row.label.is_empty())
                .map(|row| SelectOption::new(&row.value, &row.label))
                .collect();
            if !valid.is_empty() {
                return Some(FieldConfig::select(valid));
            }
        }
        if self.shows_relationship() && !self.related_collection.is_empty() {
            return Some(FieldConfig::relationship(&self.related_collection));
        }
        if self.shows_slug_source() && !self.source_field.is_empty() {
            return Some(FieldConfig::slug(&self.source_field));
        }
        None
    }
}

fn parse_count(
    issues: &mut BTreeMap<String, String>,
    applicable: bool,
    key: &str,
    text: &str,
) -> Option<u64> {
    if !applicable || text.is_empty() {
        return None;
    }
    match text.parse::<u64>() {
        Ok(n) => Some(n),
        Err(_) => {
            issues.insert(key.into(), "Must be a number".into());
            None
        }
    }
}

fn parse_number(
    issues: &mut BTreeMap<String, String>,
    applicable: bool,
    key: &str,
    text: &str,
) -> Option<f64> {
    if !applicable || text.is_empty() {
        return None;
    }
    match text.parse::<f64>() {
        Ok(n) => Some(n),
        Err(_) => {
            issues.insert(key.into(), "Must be a number".into());
            None
        }
    }
}
