//! Dynamic form engine for the Strata console
//!
//! This crate turns a collection's field list into a live, validated,
//! submittable form:
//!
//! - **Schema compiler** — one runtime validator and one default value per
//!   field, selected by field type
//! - **Value codec** — wire↔form conversion for JSON-like types, plus the
//!   permissive live-edit handlers the JSON and Array editors use
//! - **Widgets** — the typed input catalogue and the per-type widget match
//! - **Entry form session** — open/reset/input/validate/submit lifecycle
//!   for authoring content entries
//! - **Field editor session** — the smaller, type-conditional form for
//!   creating and editing field definitions themselves
//!
//! All state here is request-scoped: a session lives from open to
//! submit/cancel and is then discarded. The remote API owns the real data.

pub mod codec;
pub mod entry_form;
pub mod error;
pub mod field_editor;
pub mod schema;
pub mod widget;

pub use entry_form::{
    CloseOutcome, EntryFormSession, EntrySubmission, ExistingEntry, FieldControl, SubmitMode,
};
pub use error::{FieldIssue, FormError, Result};
pub use field_editor::{EditorMode, FieldEditorSession, FieldPayload, OptionRow};
pub use schema::{compile, default_values, EntrySchema, FieldValidator, ValueShape};
pub use widget::{widget_for, TextKind, Widget};
