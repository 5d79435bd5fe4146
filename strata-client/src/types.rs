//! API request and response types for the console backend.
//!
//! Everything here mirrors the backend's camelCase JSON. Unknown entry
//! statuses and activity actions are carried through verbatim and displayed
//! generically — the backend's state machine can grow without breaking this
//! client.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use strata_fields::{FieldConfig, FieldDef, FieldType, ValidationRules};
use strata_forms::FieldPayload;

/// Lifecycle state of an entry. Server-owned; the client only displays it
/// and triggers transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    Draft,
    Published,
    /// Published, with unpublished edits on top.
    Changed,
    Scheduled,
    Archived,
    /// A status this client does not know; displayed generically.
    Other(String),
}

impl EntryStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::Changed => "CHANGED",
            Self::Scheduled => "SCHEDULED",
            Self::Archived => "ARCHIVED",
            Self::Other(tag) => tag,
        }
    }

    pub fn from_wire(tag: &str) -> Self {
        match tag {
            "DRAFT" => Self::Draft,
            "PUBLISHED" => Self::Published,
            "CHANGED" => Self::Changed,
            "SCHEDULED" => Self::Scheduled,
            "ARCHIVED" => Self::Archived,
            other => Self::Other(other.to_string()),
        }
    }

    /// Badge text; unknown statuses get a generic label.
    pub fn display_label(&self) -> &str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
            Self::Changed => "Changed",
            Self::Scheduled => "Scheduled",
            Self::Archived => "Archived",
            Self::Other(_) => "Unknown",
        }
    }
}

impl Serialize for EntryStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntryStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&tag))
    }
}

/// One content record belonging to a collection. `data` is the wire
/// representation — structured fields may be serialized strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    #[serde(default)]
    pub collection_id: String,
    #[serde(default)]
    pub workspace_id: String,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_data: Option<Map<String, Value>>,
    pub status: EntryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// A collection with its nested field list. Field order in the payload is
/// not guaranteed — sort by `sort_order` before presenting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    #[serde(default)]
    pub workspace_id: String,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

impl Collection {
    /// Fields sorted by `sort_order`, as the console presents them.
    pub fn sorted_fields(&self) -> Vec<&FieldDef> {
        let mut fields: Vec<&FieldDef> = self.fields.iter().collect();
        fields.sort_by_key(|f| f.sort_order);
        fields
    }
}

/// One row of a collection's activity feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub id: String,
    /// Action tag, e.g. `entry.published`. Unknown tags display verbatim.
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

impl ActivityEvent {
    /// Feed text for known actions; the raw tag for anything else.
    pub fn display_label(&self) -> &str {
        match self.action.as_str() {
            "entry.created" => "Created entry",
            "entry.updated" => "Updated entry",
            "entry.published" => "Published entry",
            "entry.unpublished" => "Unpublished entry",
            "entry.archived" => "Archived entry",
            "entry.deleted" => "Deleted entry",
            "field.created" => "Added field",
            "field.updated" => "Updated field",
            "field.deleted" => "Deleted field",
            other => other,
        }
    }
}

/// Paging metadata on list responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
    pub has_more: bool,
}

/// Envelope for single-item responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse<T> {
    pub data: T,
}

/// Envelope for list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub meta: ListMeta,
}

/// Per-id outcome of a bulk operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BulkResult {
    pub success: Vec<String>,
    pub failed: Vec<BulkFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BulkFailure {
    pub id: String,
    pub error: String,
}

/// Body for `POST …/entries`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub data: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntryStatus>,
}

/// Body for `PATCH …/entries/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    pub data: Map<String, Value>,
}

/// Body for `POST …/fields`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFieldRequest {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    pub unique: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<FieldConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
}

impl From<FieldPayload> for CreateFieldRequest {
    fn from(payload: FieldPayload) -> Self {
        Self {
            name: payload.name,
            label: payload.label,
            field_type: payload.field_type,
            description: payload.description,
            required: payload.required,
            unique: payload.unique,
            config: payload.config,
            validation: payload.validation,
        }
    }
}

/// Body for `PATCH …/fields/{id}`. Name and type are immutable and never
/// sent on update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFieldRequest {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    pub unique: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<FieldConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
}

impl From<FieldPayload> for UpdateFieldRequest {
    fn from(payload: FieldPayload) -> Self {
        Self {
            label: payload.label,
            description: payload.description,
            required: payload.required,
            unique: payload.unique,
            config: payload.config,
            validation: payload.validation,
        }
    }
}

/// Query parameters for entry listing.
#[derive(Debug, Clone, Default)]
pub struct EntryQuery {
    pub status: Option<EntryStatus>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub sort: Option<String>,
}

impl EntryQuery {
    /// Render as a query string, empty when no parameter is set.
    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some(status) = &self.status {
            parts.push(format!("status={}", status.as_str()));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("limit={limit}"));
        }
        if let Some(offset) = self.offset {
            parts.push(format!("offset={offset}"));
        }
        if let Some(sort) = &self.sort {
            parts.push(format!("sort={sort}"));
        }
        if parts.is_empty() {
            String::new()
        } else {
            format!("?{}", parts.join("&"))
        }
    }
}
