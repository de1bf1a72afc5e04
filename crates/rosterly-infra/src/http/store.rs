//! HttpStore -- concrete store client for the console backend.
//!
//! Implements the rosterly-core store traits over reqwest. Every endpoint
//! returns the backend's `{success, data, message}` envelope; decoding and
//! envelope unwrapping are centralized in [`HttpStore::send_envelope`].
//!
//! The API token is wrapped in [`secrecy::SecretString`] and is only
//! exposed when constructing the Authorization header.

use std::time::Duration;

use reqwest::multipart;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;

use rosterly_core::store::catalog::CatalogStore;
use rosterly_core::store::resource::{AttachmentUpdate, ResourceStore};
use rosterly_core::store::vendor_skill::VendorSkillStore;
use rosterly_core::store::ListQuery;
use rosterly_types::error::StoreError;
use rosterly_types::file::{FileOwner, FileRecord, PendingFile, UploadMeta};
use rosterly_types::page::Page;
use rosterly_types::resource::{Resource, ResourceId, ResourcePayload};
use rosterly_types::skill::{ApprovalStatus, Category, Skill, VendorSkill, VendorSkillId};

use super::envelope::{ApiEnvelope, PagedData};
use crate::config::ClientConfig;

/// HTTP implementation of the Rosterly store traits.
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<SecretString>,
}

impl HttpStore {
    /// Create a store client from configuration.
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        }
    }

    /// Build the full URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request, attaching the bearer token when configured.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.api_token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Send a request and unwrap its envelope.
    async fn send_envelope<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("request failed: {e}")))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| StoreError::Transport(format!("failed to read response: {e}")))?;

        let envelope: ApiEnvelope<T> = serde_json::from_slice(&body).map_err(|e| {
            if status.is_success() {
                StoreError::Decode(format!("invalid envelope: {e}"))
            } else {
                StoreError::Rejected(format!("HTTP {status}"))
            }
        })?;
        envelope.into_result()
    }

    /// Send a request whose payload is irrelevant (deletes).
    async fn send_ack(&self, request: reqwest::RequestBuilder) -> Result<(), StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("request failed: {e}")))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| StoreError::Transport(format!("failed to read response: {e}")))?;

        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_slice(&body)
            .map_err(|e| {
                if status.is_success() {
                    StoreError::Decode(format!("invalid envelope: {e}"))
                } else {
                    StoreError::Rejected(format!("HTTP {status}"))
                }
            })?;
        envelope.into_ack()
    }
}

/// Query parameters for a paginated list endpoint.
fn list_params(query: &ListQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("page", query.page.to_string()),
        ("limit", query.limit.to_string()),
    ];
    if let Some(status) = &query.status {
        params.push(("status", status.clone()));
    }
    if let Some(search) = &query.search {
        params.push(("search", search.clone()));
    }
    params
}

impl ResourceStore for HttpStore {
    async fn create_resource(&self, payload: &ResourcePayload) -> Result<Resource, StoreError> {
        tracing::debug!(name = %payload.name, "POST /resources");
        self.send_envelope(
            self.request(reqwest::Method::POST, "/resources")
                .json(payload),
        )
        .await
    }

    async fn update_resource(
        &self,
        id: &ResourceId,
        payload: &ResourcePayload,
    ) -> Result<Resource, StoreError> {
        tracing::debug!(resource = %id, "PUT /resources/{{id}}");
        self.send_envelope(
            self.request(reqwest::Method::PUT, &format!("/resources/{id}"))
                .json(payload),
        )
        .await
    }

    async fn patch_attachment(
        &self,
        id: &ResourceId,
        update: AttachmentUpdate,
    ) -> Result<Resource, StoreError> {
        // Clear is an explicit null so the backend distinguishes removal
        // from an omitted field.
        let body = match update {
            AttachmentUpdate::Set(attachment) => json!({ "attachment": attachment }),
            AttachmentUpdate::Clear => json!({ "attachment": null }),
        };
        tracing::debug!(resource = %id, "PATCH /resources/{{id}}");
        self.send_envelope(
            self.request(reqwest::Method::PATCH, &format!("/resources/{id}"))
                .json(&body),
        )
        .await
    }

    async fn upload_file(
        &self,
        file: &PendingFile,
        owner: FileOwner,
        meta: &UploadMeta,
    ) -> Result<FileRecord, StoreError> {
        let part = multipart::Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime_type())
            .map_err(|e| StoreError::Transport(format!("invalid mime type: {e}")))?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("ownerType", owner.owner_type().to_string())
            .text("ownerId", owner.owner_id().to_string())
            .text("category", meta.category.clone())
            .text("description", meta.description.clone())
            .text("isPublic", meta.is_public.to_string());

        tracing::debug!(
            file = file.name(),
            size = file.size(),
            owner = owner.owner_id(),
            "POST /files/upload"
        );
        self.send_envelope(
            self.request(reqwest::Method::POST, "/files/upload")
                .multipart(form),
        )
        .await
    }

    async fn get_resource(&self, id: &ResourceId) -> Result<Resource, StoreError> {
        self.send_envelope(self.request(reqwest::Method::GET, &format!("/resources/{id}")))
            .await
    }

    async fn list_resources(&self, query: &ListQuery) -> Result<Page<Resource>, StoreError> {
        let paged: PagedData<Resource> = self
            .send_envelope(
                self.request(reqwest::Method::GET, "/resources")
                    .query(&list_params(query)),
            )
            .await?;
        Ok(paged.into())
    }

    async fn delete_resource(&self, id: &ResourceId) -> Result<(), StoreError> {
        tracing::debug!(resource = %id, "DELETE /resources/{{id}}");
        self.send_ack(self.request(reqwest::Method::DELETE, &format!("/resources/{id}")))
            .await
    }
}

impl CatalogStore for HttpStore {
    async fn list_skills(&self) -> Result<Vec<Skill>, StoreError> {
        self.send_envelope(self.request(reqwest::Method::GET, "/skills"))
            .await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.send_envelope(self.request(reqwest::Method::GET, "/categories"))
            .await
    }
}

impl VendorSkillStore for HttpStore {
    async fn list_vendor_skills(&self, query: &ListQuery) -> Result<Page<VendorSkill>, StoreError> {
        let paged: PagedData<VendorSkill> = self
            .send_envelope(
                self.request(reqwest::Method::GET, "/vendor-skills")
                    .query(&list_params(query)),
            )
            .await?;
        Ok(paged.into())
    }

    async fn set_approval(
        &self,
        id: &VendorSkillId,
        status: ApprovalStatus,
    ) -> Result<VendorSkill, StoreError> {
        tracing::debug!(vendor_skill = %id, %status, "PATCH /vendor-skills/{{id}}/status");
        self.send_envelope(
            self.request(
                reqwest::Method::PATCH,
                &format!("/vendor-skills/{id}/status"),
            )
            .json(&json!({ "status": status })),
        )
        .await
    }

    async fn delete_vendor_skill(&self, id: &VendorSkillId) -> Result<(), StoreError> {
        self.send_ack(self.request(reqwest::Method::DELETE, &format!("/vendor-skills/{id}")))
            .await
    }
}
