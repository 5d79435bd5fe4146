//! REST client for the Strata console backend
//!
//! The backend owns all real state — collections, fields, entries, activity.
//! This crate holds the typed wire shapes, the HTTP client over them, a
//! request-scoped entry cache with explicit two-phase optimistic inserts,
//! and the submit flows that connect a form session to the API.
//!
//! Status transitions (publish/unpublish/archive/restore) are fire-and-
//! forget triggers; the server computes the resulting status and the client
//! only displays it, tolerating values it does not recognize.

pub mod cache;
pub mod client;
pub mod error;
pub mod flows;
pub mod types;

pub use cache::{EntryCache, TentativeId};
pub use client::{ConsoleClient, Scope};
pub use error::{ApiError, Result};
pub use flows::{create_entry_optimistic, save_entry, save_field, SaveOutcome};
pub use types::{
    ActivityEvent, BulkFailure, BulkResult, Collection, CreateEntryRequest, CreateFieldRequest,
    Entry, EntryQuery, EntryStatus, ItemResponse, ListMeta, ListResponse, UpdateEntryRequest,
    UpdateFieldRequest,
};
