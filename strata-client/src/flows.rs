//! Submit flows — the glue between a form session and the API.
//!
//! A flow takes the session's cleaned payload, dispatches create or update,
//! feeds the outcome back into the session, and invalidates the cache on
//! success. Validation failures never reach the network. A response that
//! arrives after the sheet was closed still invalidates the cache, but the
//! session call becomes a no-op — the dismissed form is never resurrected.

use tracing::debug;

use strata_forms::{EntryFormSession, FieldEditorSession, FormError, SubmitMode};

use crate::cache::EntryCache;
use crate::client::{ConsoleClient, Scope};
use crate::error::Result;
use crate::types::{CreateEntryRequest, Entry, EntryStatus, UpdateEntryRequest};

/// What a save attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Persisted; the session closed with success.
    Saved,
    /// Local validation failed; no request was made and the form shows
    /// its field issues.
    ValidationBlocked,
}

/// Submit an entry form: create as draft or update in place.
///
/// On API failure the error is returned for the notification surface and
/// the form stays open with entered values intact.
pub async fn save_entry(
    client: &ConsoleClient,
    scope: &Scope,
    cache: &mut EntryCache,
    session: &mut EntryFormSession,
) -> Result<SaveOutcome> {
    let submission = match session.submission() {
        Ok(submission) => submission,
        Err(FormError::Validation { issues }) => {
            debug!(issues = issues.len(), "entry submission blocked by validation");
            return Ok(SaveOutcome::ValidationBlocked);
        }
        Err(_) => return Ok(SaveOutcome::ValidationBlocked),
    };

    let result = match &submission.mode {
        SubmitMode::Create => {
            let request = CreateEntryRequest {
                data: submission.data,
                status: Some(EntryStatus::Draft),
            };
            client.create_entry(scope, &request).await
        }
        SubmitMode::Update { entry_id } => {
            let request = UpdateEntryRequest {
                data: submission.data,
            };
            client.update_entry(scope, entry_id, &request).await
        }
    };

    match result {
        Ok(_entry) => {
            cache.invalidate(&scope.collection);
            session.finish_submit(Ok(()));
            Ok(SaveOutcome::Saved)
        }
        Err(err) => {
            session.finish_submit(Err(err.to_string()));
            Err(err)
        }
    }
}

/// Submit a field editor: add a new definition or patch an existing one.
pub async fn save_field(
    client: &ConsoleClient,
    scope: &Scope,
    cache: &mut EntryCache,
    editor: &mut FieldEditorSession,
) -> Result<SaveOutcome> {
    let payload = match editor.payload() {
        Ok(payload) => payload,
        Err(FormError::Validation { issues }) => {
            debug!(issues = issues.len(), "field submission blocked by validation");
            return Ok(SaveOutcome::ValidationBlocked);
        }
        Err(_) => return Ok(SaveOutcome::ValidationBlocked),
    };

    let result = match editor.mode() {
        strata_forms::EditorMode::Create => client.add_field(scope, &payload.into()).await,
        strata_forms::EditorMode::Edit { field_id } => {
            let field_id = field_id.clone();
            client.update_field(scope, &field_id, &payload.into()).await
        }
    };

    match result {
        Ok(_field) => {
            // The field list lives on the collection; entry forms compiled
            // from it must refetch too.
            cache.invalidate(&scope.collection);
            editor.finish_submit(Ok(()));
            Ok(SaveOutcome::Saved)
        }
        Err(err) => {
            editor.finish_submit(Err(err.to_string()));
            Err(err)
        }
    }
}

/// Optimistic entry create: a tentative row becomes visible immediately and
/// is replaced by the persisted record on confirm or removed on reject.
pub async fn create_entry_optimistic(
    client: &ConsoleClient,
    scope: &Scope,
    cache: &mut EntryCache,
    request: CreateEntryRequest,
) -> Result<Entry> {
    let preview = Entry {
        id: String::new(),
        collection_id: String::new(),
        workspace_id: String::new(),
        data: request.data.clone(),
        published_data: None,
        status: request.status.clone().unwrap_or(EntryStatus::Draft),
        author_id: None,
        published_at: None,
        scheduled_at: None,
        archived_at: None,
        created_at: String::new(),
        updated_at: String::new(),
    };
    let tentative = cache.insert_tentative(&scope.collection, preview);

    match client.create_entry(scope, &request).await {
        Ok(entry) => {
            cache.confirm(&scope.collection, tentative, entry.clone());
            Ok(entry)
        }
        Err(err) => {
            cache.reject(&scope.collection, tentative);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};
    use strata_fields::{FieldDef, FieldType, FieldTypeRegistry};
    use strata_forms::CloseOutcome;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const POSTS: &str = "/v1/organizations/acme/workspaces/site/collections/posts";

    fn scope() -> Scope {
        Scope::new("acme", "site", "posts")
    }

    fn fields() -> Vec<FieldDef> {
        let mut title = FieldDef::new("title", "Title", FieldType::Text);
        title.required = true;
        vec![title]
    }

    fn entry_body(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "data": {"title": "Hello"},
            "status": "DRAFT"
        })
    }

    #[tokio::test]
    async fn save_entry_creates_draft_and_closes_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("{POSTS}/entries")))
            .and(body_json(json!({
                "data": {"title": "Hello"},
                "status": "DRAFT"
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"data": entry_body("ent_01")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ConsoleClient::new(server.uri()).unwrap();
        let mut cache = EntryCache::new();
        cache.seed("posts", Vec::new());

        let mut session = EntryFormSession::open(&fields(), None);
        session.input("title", "Hello").unwrap();

        let outcome = save_entry(&client, &scope(), &mut cache, &mut session)
            .await
            .unwrap();
        assert_eq!(outcome, SaveOutcome::Saved);
        assert_eq!(session.outcome(), Some(CloseOutcome::Saved));
        // Invalidation point: the list must be refetched.
        assert!(!cache.is_fresh("posts"));
    }

    #[tokio::test]
    async fn validation_failure_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("{POSTS}/entries")))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = ConsoleClient::new(server.uri()).unwrap();
        let mut cache = EntryCache::new();
        let mut session = EntryFormSession::open(&fields(), None);

        let outcome = save_entry(&client, &scope(), &mut cache, &mut session)
            .await
            .unwrap();
        assert_eq!(outcome, SaveOutcome::ValidationBlocked);
        assert_eq!(session.issue("title"), Some("Required"));
        assert!(session.is_open());
    }

    #[tokio::test]
    async fn server_rejection_keeps_form_open() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("{POSTS}/entries")))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({"message": "slug taken"})),
            )
            .mount(&server)
            .await;

        let client = ConsoleClient::new(server.uri()).unwrap();
        let mut cache = EntryCache::new();
        let mut session = EntryFormSession::open(&fields(), None);
        session.input("title", "Hello").unwrap();

        let err = save_entry(&client, &scope(), &mut cache, &mut session)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::ApiError::Conflict(_)));
        assert!(session.is_open());
        assert_eq!(session.submit_error(), Some("conflict: slug taken"));
        assert_eq!(session.value("title"), Some(&json!("Hello")));
    }

    #[tokio::test]
    async fn save_entry_update_patches_in_place() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path(format!("{POSTS}/entries/ent_01")))
            .and(body_json(json!({"data": {"title": "Hello"}})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": entry_body("ent_01")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ConsoleClient::new(server.uri()).unwrap();
        let mut cache = EntryCache::new();
        cache.seed("posts", Vec::new());

        let existing = strata_forms::ExistingEntry {
            id: "ent_01".into(),
            data: Map::from_iter([("title".to_string(), json!("Hello"))]),
        };
        let mut session = EntryFormSession::open(&fields(), Some(existing));

        let outcome = save_entry(&client, &scope(), &mut cache, &mut session)
            .await
            .unwrap();
        assert_eq!(outcome, SaveOutcome::Saved);
        assert!(!cache.is_fresh("posts"));
    }

    #[tokio::test]
    async fn save_field_posts_payload_without_empty_config() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("{POSTS}/fields")))
            .and(body_json(json!({
                "name": "title",
                "label": "Title",
                "type": "TEXT",
                "required": false,
                "unique": false
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {"id": "fld_01", "name": "title", "label": "Title", "type": "TEXT"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ConsoleClient::new(server.uri()).unwrap();
        let mut cache = EntryCache::new();
        let mut editor = FieldEditorSession::open_create(FieldTypeRegistry::builtin());
        editor.set_label("Title");

        let outcome = save_field(&client, &scope(), &mut cache, &mut editor)
            .await
            .unwrap();
        assert_eq!(outcome, SaveOutcome::Saved);
        assert_eq!(editor.outcome(), Some(CloseOutcome::Saved));
    }

    #[tokio::test]
    async fn optimistic_create_confirms_tentative_row() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("{POSTS}/entries")))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"data": entry_body("ent_01")})),
            )
            .mount(&server)
            .await;

        let client = ConsoleClient::new(server.uri()).unwrap();
        let mut cache = EntryCache::new();
        cache.seed("posts", Vec::new());

        let request = CreateEntryRequest {
            data: Map::from_iter([("title".to_string(), json!("Hello"))]),
            status: None,
        };
        let entry = create_entry_optimistic(&client, &scope(), &mut cache, request)
            .await
            .unwrap();
        assert_eq!(entry.id, "ent_01");

        let visible = cache.entries("posts").unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "ent_01");
    }

    #[tokio::test]
    async fn optimistic_create_rejects_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("{POSTS}/entries")))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = ConsoleClient::new(server.uri()).unwrap();
        let mut cache = EntryCache::new();
        cache.seed("posts", Vec::new());

        let request = CreateEntryRequest {
            data: Map::new(),
            status: None,
        };
        let err = create_entry_optimistic(&client, &scope(), &mut cache, request)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::ApiError::Api { status: 500, .. }));
        assert!(cache.entries("posts").unwrap().is_empty());
    }
}
