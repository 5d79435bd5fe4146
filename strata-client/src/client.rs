//! HTTP client for the console backend API.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use tracing::debug;

use strata_fields::FieldDef;

use crate::error::{extract_error_message, ApiError, Result};
use crate::types::*;

/// Generous upper bound on any single request; the UI stays interactive
/// while a request is outstanding so this only guards against hung
/// connections.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Addresses one collection: organization slug, workspace slug, collection
/// slug. All endpoint paths hang off this triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub org: String,
    pub workspace: String,
    pub collection: String,
}

impl Scope {
    pub fn new(
        org: impl Into<String>,
        workspace: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            org: org.into(),
            workspace: workspace.into(),
            collection: collection.into(),
        }
    }

    /// The collection's path prefix.
    pub fn path(&self) -> String {
        format!(
            "/v1/organizations/{}/workspaces/{}/collections/{}",
            self.org, self.workspace, self.collection
        )
    }
}

/// Client for the console backend.
pub struct ConsoleClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ConsoleClient {
    /// Create a client against a base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Attach a bearer token for authenticated requests.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.request(method, &url);
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder
    }

    /// Map a non-2xx response to an `ApiError` by status code.
    async fn check_response(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body);

        match status_code {
            401 => Err(ApiError::Unauthorized(message)),
            403 => Err(ApiError::Forbidden(message)),
            404 => Err(ApiError::NotFound(message)),
            409 => Err(ApiError::Conflict(message)),
            _ => Err(ApiError::Api {
                status: status_code,
                body: message,
            }),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path).send().await?;
        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<T> {
        let response = self.request(method, path).json(body).send().await?;
        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    // ── Collections and fields ───────────────────────────────────────

    /// Fetch a collection with its nested field list.
    pub async fn get_collection(&self, scope: &Scope) -> Result<Collection> {
        let response: ItemResponse<Collection> = self.get_json(&scope.path()).await?;
        Ok(response.data)
    }

    /// Create a field. The response carries the canonical persisted
    /// definition, ready for schema compilation.
    pub async fn add_field(&self, scope: &Scope, request: &CreateFieldRequest) -> Result<FieldDef> {
        debug!(collection = %scope.collection, field = %request.name, "adding field");
        let path = format!("{}/fields", scope.path());
        let response: ItemResponse<FieldDef> =
            self.send_json(Method::POST, &path, request).await?;
        Ok(response.data)
    }

    /// Update a field's mutable attributes.
    pub async fn update_field(
        &self,
        scope: &Scope,
        field_id: &str,
        request: &UpdateFieldRequest,
    ) -> Result<FieldDef> {
        let path = format!("{}/fields/{}", scope.path(), field_id);
        let response: ItemResponse<FieldDef> =
            self.send_json(Method::PATCH, &path, request).await?;
        Ok(response.data)
    }

    /// Delete a field definition.
    pub async fn delete_field(&self, scope: &Scope, field_id: &str) -> Result<()> {
        let path = format!("{}/fields/{}", scope.path(), field_id);
        let response = self.request(Method::DELETE, &path).send().await?;
        self.check_response(response).await?;
        Ok(())
    }

    // ── Entries ──────────────────────────────────────────────────────

    /// List entries with optional status/paging filters.
    pub async fn list_entries(
        &self,
        scope: &Scope,
        query: &EntryQuery,
    ) -> Result<ListResponse<Entry>> {
        let path = format!("{}/entries{}", scope.path(), query.to_query_string());
        self.get_json(&path).await
    }

    /// Fetch one entry.
    pub async fn get_entry(&self, scope: &Scope, entry_id: &str) -> Result<Entry> {
        let path = format!("{}/entries/{}", scope.path(), entry_id);
        let response: ItemResponse<Entry> = self.get_json(&path).await?;
        Ok(response.data)
    }

    /// Create an entry from a cleaned submission payload.
    pub async fn create_entry(
        &self,
        scope: &Scope,
        request: &CreateEntryRequest,
    ) -> Result<Entry> {
        let path = format!("{}/entries", scope.path());
        let response: ItemResponse<Entry> = self.send_json(Method::POST, &path, request).await?;
        Ok(response.data)
    }

    /// Update an entry's data.
    pub async fn update_entry(
        &self,
        scope: &Scope,
        entry_id: &str,
        request: &UpdateEntryRequest,
    ) -> Result<Entry> {
        let path = format!("{}/entries/{}", scope.path(), entry_id);
        let response: ItemResponse<Entry> = self.send_json(Method::PATCH, &path, request).await?;
        Ok(response.data)
    }

    /// Delete an entry.
    pub async fn delete_entry(&self, scope: &Scope, entry_id: &str) -> Result<()> {
        let path = format!("{}/entries/{}", scope.path(), entry_id);
        let response = self.request(Method::DELETE, &path).send().await?;
        self.check_response(response).await?;
        Ok(())
    }

    // ── Status transitions ───────────────────────────────────────────
    //
    // Fire-and-forget triggers: the server owns the state machine and
    // returns the entry with its new status.

    pub async fn publish_entry(&self, scope: &Scope, entry_id: &str) -> Result<Entry> {
        self.transition(scope, entry_id, "publish").await
    }

    pub async fn unpublish_entry(&self, scope: &Scope, entry_id: &str) -> Result<Entry> {
        self.transition(scope, entry_id, "unpublish").await
    }

    pub async fn archive_entry(&self, scope: &Scope, entry_id: &str) -> Result<Entry> {
        self.transition(scope, entry_id, "archive").await
    }

    pub async fn restore_entry(&self, scope: &Scope, entry_id: &str) -> Result<Entry> {
        self.transition(scope, entry_id, "restore").await
    }

    /// Duplicate an entry as a new draft.
    pub async fn duplicate_entry(&self, scope: &Scope, entry_id: &str) -> Result<Entry> {
        self.transition(scope, entry_id, "duplicate").await
    }

    async fn transition(&self, scope: &Scope, entry_id: &str, verb: &str) -> Result<Entry> {
        let path = format!("{}/entries/{}/{}", scope.path(), entry_id, verb);
        let response: ItemResponse<Entry> = self
            .send_json(Method::POST, &path, &serde_json::json!({}))
            .await?;
        Ok(response.data)
    }

    // ── Bulk operations ──────────────────────────────────────────────

    pub async fn bulk_publish(&self, scope: &Scope, ids: &[String]) -> Result<BulkResult> {
        self.bulk(scope, "publish", ids).await
    }

    pub async fn bulk_unpublish(&self, scope: &Scope, ids: &[String]) -> Result<BulkResult> {
        self.bulk(scope, "unpublish", ids).await
    }

    pub async fn bulk_delete(&self, scope: &Scope, ids: &[String]) -> Result<BulkResult> {
        self.bulk(scope, "delete", ids).await
    }

    async fn bulk(&self, scope: &Scope, verb: &str, ids: &[String]) -> Result<BulkResult> {
        let path = format!("{}/bulk/{}", scope.path(), verb);
        let response: ItemResponse<BulkResult> = self
            .send_json(Method::POST, &path, &serde_json::json!({ "ids": ids }))
            .await?;
        Ok(response.data)
    }

    // ── Activity ─────────────────────────────────────────────────────

    /// Fetch the collection's activity feed, newest first.
    pub async fn list_activity(
        &self,
        scope: &Scope,
        limit: Option<u64>,
    ) -> Result<Vec<ActivityEvent>> {
        let query = limit.map(|l| format!("?limit={l}")).unwrap_or_default();
        let path = format!("{}/activity{}", scope.path(), query);
        let response: ListResponse<ActivityEvent> = self.get_json(&path).await?;
        Ok(response.data)
    }
}
