//! Entry form session — the live, validated, submittable form for one
//! content entry.
//!
//! A session is opened with a field list and an optional existing entry,
//! holds the in-memory form values while the operator edits, and ends with
//! exactly one terminal event: closed-with-success (after a confirmed
//! submission) or closed-with-cancel. Responses that arrive after the form
//! has closed are ignored here; cache bookkeeping happens upstream.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use strata_fields::{FieldDef, FieldType};

use crate::codec;
use crate::error::{FieldIssue, FormError, Result};
use crate::schema::{self, EntrySchema};
use crate::widget::{self, widget_for, Widget};

/// The entry being edited, as fetched from the backend. `data` is the wire
/// representation; structured values may still be serialized strings.
#[derive(Debug, Clone)]
pub struct ExistingEntry {
    pub id: String,
    pub data: Map<String, Value>,
}

/// Whether a submission creates a new entry or updates an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitMode {
    /// New entries start in draft.
    Create,
    Update { entry_id: String },
}

/// A validated, cleaned submission payload.
#[derive(Debug, Clone)]
pub struct EntrySubmission {
    pub mode: SubmitMode,
    pub data: Map<String, Value>,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Submission confirmed — the list upstream should refresh.
    Saved,
    /// Dismissed without saving.
    Cancelled,
}

/// Render descriptor for one field: everything a widget needs to draw
/// itself, including the validation-error slot.
#[derive(Debug, Clone)]
pub struct FieldControl {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub description: Option<String>,
    pub widget: Widget,
    pub value: Value,
    /// Editor text for the current value (JSON pretty-printed, dates
    /// sliced to their input format).
    pub text: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open { submitting: bool },
    Closed(CloseOutcome),
}

/// Form state for authoring one entry against a collection's schema.
#[derive(Debug, Clone)]
pub struct EntryFormSession {
    fields: Vec<FieldDef>,
    schema: EntrySchema,
    entry: Option<ExistingEntry>,
    values: Map<String, Value>,
    issues: BTreeMap<String, String>,
    submit_error: Option<String>,
    state: State,
}

impl EntryFormSession {
    /// Open a form: filter to editable fields, sort by `sort_order`,
    /// compile the schema, and initialize values from the entry (or from
    /// field defaults when creating).
    pub fn open(fields: &[FieldDef], entry: Option<ExistingEntry>) -> Self {
        let mut editable: Vec<FieldDef> =
            fields.iter().filter(|f| f.is_editable()).cloned().collect();
        editable.sort_by_key(|f| f.sort_order);

        let schema = schema::compile(&editable);
        let values = schema::default_values(&editable, entry.as_ref().map(|e| &e.data));

        debug!(
            fields = editable.len(),
            edit = entry.is_some(),
            "entry form opened"
        );

        Self {
            fields: editable,
            schema,
            entry,
            values,
            issues: BTreeMap::new(),
            submit_error: None,
            state: State::Open { submitting: false },
        }
    }

    /// Re-open the form, possibly on a different entry. Values are rebuilt
    /// from scratch — unsaved edits from the previous session never leak.
    pub fn reopen(&mut self, entry: Option<ExistingEntry>) {
        self.entry = entry;
        self.reset();
    }

    /// Reset values to their defaults for the current entry.
    pub fn reset(&mut self) {
        self.values = schema::default_values(&self.fields, self.entry.as_ref().map(|e| &e.data));
        self.issues.clear();
        self.submit_error = None;
        self.state = State::Open { submitting: false };
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

    /// The editable fields, in presentation order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The message from the last failed submission, if any.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Set a field's form value directly (toggles, selects, multi-selects).
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<()> {
        if !self.is_open() {
            return Err(FormError::NotOpen);
        }
        if self.field(name).is_none() {
            return Err(FormError::UnknownField { name: name.into() });
        }
        self.values.insert(name.to_string(), value);
        self.issues.remove(name);
        Ok(())
    }

    /// Apply a text-input change, routing through the widget-local handler
    /// for the field's type (JSON/Array live parsing, datetime
    /// normalization; plain text otherwise).
    pub fn input(&mut self, name: &str, text: &str) -> Result<()> {
        let field_type = self
            .field(name)
            .map(|f| f.field_type.clone())
            .ok_or_else(|| FormError::UnknownField { name: name.into() })?;

        let value = match field_type {
            FieldType::Json => codec::json_input(text),
            FieldType::Array => codec::array_input(text),
            FieldType::DateTime => Value::String(widget::normalize_datetime_input(text)),
            _ => Value::String(text.to_string()),
        };
        self.set_value(name, value)
    }

    /// Run the compiled schema over the current values, populating the
    /// per-field error slots. Returns true when the form is submittable.
    pub fn validate(&mut self) -> bool {
        let issues = self.schema.validate(&self.values);
        self.issues = issues
            .into_iter()
            .map(|issue| (issue.field, issue.message))
            .collect();
        self.issues.is_empty()
    }

    /// Validation issues by field name.
    pub fn issues(&self) -> &BTreeMap<String, String> {
        &self.issues
    }

    pub fn issue(&self, name: &str) -> Option<&str> {
        self.issues.get(name).map(String::as_str)
    }

    /// Validate and build the cleaned submission payload. On success the
    /// submit control is disabled until [`EntryFormSession::finish_submit`]
    /// is called with the network outcome.
    pub fn submission(&mut self) -> Result<EntrySubmission> {
        if !self.is_open() {
            return Err(FormError::NotOpen);
        }
        if !self.validate() {
            let issues = self
                .issues
                .iter()
                .map(|(field, message)| FieldIssue::new(field, message))
                .collect();
            return Err(FormError::Validation { issues });
        }

        let data = codec::clean_for_submit(&self.fields, &self.values);
        let mode = match &self.entry {
            Some(entry) => SubmitMode::Update {
                entry_id: entry.id.clone(),
            },
            None => SubmitMode::Create,
        };

        self.state = State::Open { submitting: true };
        Ok(EntrySubmission { mode, data })
    }

    /// Apply the network outcome of an in-flight submission. Success closes
    /// the form; failure keeps it open with entered values intact. If the
    /// form was already closed the call is a no-op — the late response must
    /// not resurrect a dismissed sheet.
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

    /// Dismiss the form. An in-flight submission is not cancelled; its
    /// eventual response becomes a no-op for this session.
    pub fn close(&mut self) {
        if self.is_open() {
            self.state = State::Closed(CloseOutcome::Cancelled);
        }
    }

    /// Render descriptors for every field, in order.
    pub fn controls(&self) -> Vec<FieldControl> {
        self.fields
            .iter()
            .map(|field| {
                let value = self.values.get(&field.name).cloned().unwrap_or(Value::Null);
                let widget = widget_for(field);
                let text = control_text(&widget, &value);
                FieldControl {
                    name: field.name.clone(),
                    label: field.label.clone(),
                    required: field.required,
                    description: field.description.clone(),
                    widget,
                    value,
                    text,
                    error: self.issues.get(&field.name).cloned(),
                }
            })
            .collect()
    }
}

fn control_text(widget: &Widget, value: &Value) -> String {
    match widget {
        Widget::JsonEditor { .. } => codec::json_display(value),
        Widget::ArrayEditor { .. } => codec::array_display(value),
        Widget::DateInput => match value {
            Value::String(s) => widget::date_display(s).to_string(),
            _ => String::new(),
        },
        Widget::DateTimeInput => match value {
            Value::String(s) => widget::datetime_display(s).to_string(),
            _ => String::new(),
        },
        _ => match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> Vec<FieldDef> {
        let mut title = FieldDef::new("title", "Title", FieldType::Text);
        title.required = true;
        title.sort_order = 0;

        let mut meta = FieldDef::new("meta", "Metadata", FieldType::Json);
        meta.sort_order = 2;

        let mut items = FieldDef::new("items", "Items", FieldType::Array);
        items.sort_order = 1;

        let mut internal = FieldDef::new("internal", "Internal", FieldType::Text);
        internal.hidden = true;

        vec![title, meta, items, internal]
    }

    fn entry(data: Map<String, Value>) -> ExistingEntry {
        ExistingEntry {
            id: "ent_01".into(),
            data,
        }
    }

    #[test]
    fn open_filters_hidden_and_sorts_by_sort_order() {
        let session = EntryFormSession::open(&fields(), None);
        let names: Vec<_> = session.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["title", "items", "meta"]);
    }

    #[test]
    fn create_mode_initializes_builtin_defaults() {
        let session = EntryFormSession::open(&fields(), None);
        assert_eq!(session.value("title"), Some(&json!("")));
        assert_eq!(session.value("items"), Some(&json!([])));
        assert_eq!(session.value("meta"), Some(&json!({})));
    }

    #[test]
    fn edit_mode_decodes_stored_strings() {
        let data = Map::from_iter([
            ("title".to_string(), json!("Hello")),
            ("meta".to_string(), json!("{\"a\": 1}")),
        ]);
        let session = EntryFormSession::open(&fields(), Some(entry(data)));
        assert_eq!(session.value("meta"), Some(&json!({"a": 1})));
    }

    #[test]
    fn reopen_resets_unsaved_edits() {
        let data = Map::from_iter([("title".to_string(), json!("Hello"))]);
        let mut session = EntryFormSession::open(&fields(), Some(entry(data.clone())));
        let initial = session.values().clone();

        session.input("title", "scratch edits").unwrap();
        session.input("items", "[9]").unwrap();
        session.close();
        assert_eq!(session.outcome(), Some(CloseOutcome::Cancelled));

        session.reopen(Some(entry(data)));
        assert!(session.is_open());
        assert_eq!(session.values(), &initial);
    }

    #[test]
    fn required_field_blocks_submission() {
        let mut session = EntryFormSession::open(&fields(), None);
        let err = session.submission().unwrap_err();
        let issues = err.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "title");
        assert_eq!(session.issue("title"), Some("Required"));
        assert!(!session.is_submitting());
    }

    #[test]
    fn editing_a_field_clears_its_error_slot() {
        let mut session = EntryFormSession::open(&fields(), None);
        assert!(session.submission().is_err());
        session.input("title", "Hello").unwrap();
        assert_eq!(session.issue("title"), None);
        assert!(session.submission().is_ok());
    }

    #[test]
    fn array_text_submits_parsed() {
        let mut session = EntryFormSession::open(&fields(), None);
        session.input("title", "Hello").unwrap();
        session.input("items", "[1,2,3]").unwrap();

        let submission = session.submission().unwrap();
        assert_eq!(submission.mode, SubmitMode::Create);
        assert_eq!(submission.data["items"], json!([1, 2, 3]));
    }

    #[test]
    fn array_garbage_submits_wrapped() {
        let mut session = EntryFormSession::open(&fields(), None);
        session.input("title", "Hello").unwrap();
        session.input("items", "not json").unwrap();

        let submission = session.submission().unwrap();
        assert_eq!(submission.data["items"], json!(["not json"]));
    }

    #[test]
    fn update_mode_carries_entry_id() {
        let data = Map::from_iter([("title".to_string(), json!("Hello"))]);
        let mut session = EntryFormSession::open(&fields(), Some(entry(data)));
        let submission = session.submission().unwrap();
        assert_eq!(
            submission.mode,
            SubmitMode::Update {
                entry_id: "ent_01".into()
            }
        );
    }

    #[test]
    fn successful_submit_closes_with_success() {
        let mut session = EntryFormSession::open(&fields(), None);
        session.input("title", "Hello").unwrap();
        session.submission().unwrap();
        assert!(session.is_submitting());

        session.finish_submit(Ok(()));
        assert_eq!(session.outcome(), Some(CloseOutcome::Saved));
    }

    #[test]
    fn failed_submit_keeps_form_open_with_values() {
        let mut session = EntryFormSession::open(&fields(), None);
        session.input("title", "Hello").unwrap();
        session.submission().unwrap();

        session.finish_submit(Err("server said no".into()));
        assert!(session.is_open());
        assert!(!session.is_submitting());
        assert_eq!(session.submit_error(), Some("server said no"));
        assert_eq!(session.value("title"), Some(&json!("Hello")));
    }

    #[test]
    fn late_response_after_close_is_a_no_op() {
        let mut session = EntryFormSession::open(&fields(), None);
        session.input("title", "Hello").unwrap();
        session.submission().unwrap();

        session.close();
        assert_eq!(session.outcome(), Some(CloseOutcome::Cancelled));

        session.finish_submit(Ok(()));
        assert_eq!(session.outcome(), Some(CloseOutcome::Cancelled));
    }

    #[test]
    fn datetime_input_normalizes_to_instant() {
        let mut dt = FieldDef::new("published", "Published", FieldType::DateTime);
        dt.sort_order = 0;
        let mut session = EntryFormSession::open(&[dt], None);

        session.input("published", "2024-03-15T09:30").unwrap();
        let stored = session.value("published").unwrap().as_str().unwrap();
        assert!(stored.ends_with('Z'));

        session.input("published", "").unwrap();
        assert_eq!(session.value("published"), Some(&json!("")));
    }

    #[test]
    fn unknown_type_field_gets_text_control() {
        let geo = FieldDef::new("geo", "Location", FieldType::Other("GEOPOINT".into()));
        let mut session = EntryFormSession::open(&[geo], None);
        let controls = session.controls();
        assert_eq!(controls[0].widget, Widget::FallbackText);

        session.input("geo", "59.3,18.1").unwrap();
        assert!(session.submission().is_ok());
    }

    #[test]
    fn controls_expose_error_slots_and_editor_text() {
        let mut session = EntryFormSession::open(&fields(), None);
        session.set_value("meta", json!({"a": 1})).unwrap();
        session.validate();

        let controls = session.controls();
        let title = controls.iter().find(|c| c.name == "title").unwrap();
        assert!(title.required);
        assert_eq!(title.error.as_deref(), Some("Required"));

        let meta = controls.iter().find(|c| c.name == "meta").unwrap();
        assert!(meta.text.contains("\"a\""));
    }

    #[test]
    fn unknown_field_name_is_an_error() {
        let mut session = EntryFormSession::open(&fields(), None);
        assert!(matches!(
            session.input("nope", "x"),
            Err(FormError::UnknownField { .. })
        ));
    }
}
