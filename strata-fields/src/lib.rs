//! Field definitions and field type registry
//!
//! `strata-fields` is a standalone, schema-only crate that models collection
//! fields for the Strata console. It knows nothing about HTTP or rendering —
//! it owns the field data model, the type registry that drives which UI
//! capabilities a type gets, and the label-to-name derivation rules.
//!
//! # Architecture
//!
//! - **Schema-only**: Owns field definitions, not field values
//! - **Wire-faithful**: Types serialize to/from the backend's camelCase JSON
//! - **Forward-compatible**: Unknown field types round-trip losslessly and
//!   downgrade to plain-text handling instead of erroring
//! - **Explicit registry**: The type table is constructed data, not ambient
//!   global state — tests can substitute a reduced registry

pub mod config;
pub mod error;
pub mod naming;
pub mod registry;
pub mod types;

pub use config::{
    FieldConfig, MediaConfig, RelationshipConfig, SelectConfig, SlugConfig, ValidationRules,
};
pub use error::{FieldsError, Result};
pub use naming::{derive_field_name, derive_option_value, is_valid_field_name, validate_field_name};
pub use registry::{FieldTypeConfig, FieldTypeRegistry, ValidationOptions};
pub use types::{FieldDef, FieldType, SelectOption};
