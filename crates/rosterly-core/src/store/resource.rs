//! Resource store trait definition.

use rosterly_types::error::StoreError;
use rosterly_types::file::{AttachmentRef, FileOwner, FileRecord, PendingFile, UploadMeta};
use rosterly_types::page::Page;
use rosterly_types::resource::{Resource, ResourceId, ResourcePayload};

use super::ListQuery;

/// Attachment mutation applied to an already-written resource record.
///
/// `Clear` serializes as an explicit `{"attachment": null}` on the wire --
/// the backend distinguishes "remove the attachment" from "leave it alone".
#[derive(Debug, Clone, PartialEq)]
pub enum AttachmentUpdate {
    Set(AttachmentRef),
    Clear,
}

/// Store trait for resource records and their file uploads.
///
/// Implementations live in rosterly-infra (e.g., HttpStore).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait ResourceStore: Send + Sync {
    /// Create a new resource record. Returns the created resource.
    fn create_resource(
        &self,
        payload: &ResourcePayload,
    ) -> impl std::future::Future<Output = Result<Resource, StoreError>> + Send;

    /// Replace the mutable fields of an existing resource record.
    fn update_resource(
        &self,
        id: &ResourceId,
        payload: &ResourcePayload,
    ) -> impl std::future::Future<Output = Result<Resource, StoreError>> + Send;

    /// Set or clear the attachment pointer on a resource record.
    fn patch_attachment(
        &self,
        id: &ResourceId,
        update: AttachmentUpdate,
    ) -> impl std::future::Future<Output = Result<Resource, StoreError>> + Send;

    /// Upload a file and create its file record.
    fn upload_file(
        &self,
        file: &PendingFile,
        owner: FileOwner,
        meta: &UploadMeta,
    ) -> impl std::future::Future<Output = Result<FileRecord, StoreError>> + Send;

    /// Fetch a resource record by id.
    fn get_resource(
        &self,
        id: &ResourceId,
    ) -> impl std::future::Future<Output = Result<Resource, StoreError>> + Send;

    /// List resources with pagination and optional filtering.
    fn list_resources(
        &self,
        query: &ListQuery,
    ) -> impl std::future::Future<Output = Result<Page<Resource>, StoreError>> + Send;

    /// Permanently delete a resource record.
    fn delete_resource(
        &self,
        id: &ResourceId,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
