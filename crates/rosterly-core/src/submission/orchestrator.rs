//! Submission orchestrator: drives the create/update saga for a resource.
//!
//! Writing a resource with an attachment cannot happen in one call: the
//! resource record must exist before a file can be uploaded against it,
//! and the file record must exist before the resource can point at it.
//! The orchestrator runs the stages strictly in order, branching on the
//! draft's attachment state after the record write:
//!
//! ```text
//! WritingResource
//!   -> UploadingFile -> PatchingAttachment   (draft has a pending file)
//!   -> ClearingAttachment                    (edit removed the attachment)
//!   -> Done                                  (attachment untouched)
//! ```
//!
//! Every stage can fail independently, leaving the remote state partially
//! applied; failures carry the stage and the committed resource id so the
//! caller can say exactly what happened and offer an attachment-only retry.
//! No stage is retried automatically.

use std::sync::atomic::{AtomicBool, Ordering};

use rosterly_types::error::{StoreError, SubmissionStage, SubmitError};
use rosterly_types::file::{AttachmentRef, FileOwner, UploadMeta};
use rosterly_types::resource::{Resource, ResourceDraft, ResourceId, SubmissionOutcome};

use crate::cache::ListCache;
use crate::store::resource::{AttachmentUpdate, ResourceStore};

/// Whether a submission creates a new resource or rewrites an existing one.
#[derive(Debug, Clone)]
pub enum SubmitMode {
    Create,
    Update {
        id: ResourceId,
        /// Attachment on the resource as originally fetched. Compared with
        /// the draft's current attachment to detect removal.
        original_attachment: Option<AttachmentRef>,
    },
}

impl SubmitMode {
    fn kind(&self) -> &'static str {
        match self {
            SubmitMode::Create => "create",
            SubmitMode::Update { .. } => "update",
        }
    }
}

/// Drives the resource write saga against a [`ResourceStore`].
///
/// Single-flight per instance: a second `submit` while one is running is
/// rejected with [`SubmitError::AlreadyInFlight`] -- the saga's multi-stage
/// nature makes concurrent submissions of the same draft unsafe.
pub struct SubmissionOrchestrator<S: ResourceStore> {
    store: S,
    in_flight: AtomicBool,
}

impl<S: ResourceStore> SubmissionOrchestrator<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run the saga for one draft.
    ///
    /// On success, exactly one cache mutation is applied, keyed by mode
    /// (`apply_created` vs `apply_updated`) and fed with the last entity
    /// the backend returned, so patched attachment metadata lands in the
    /// cache. On any failure the cache is untouched. Callers using
    /// [`crate::cache::InsertPolicy::Refetch`] should reload the page
    /// after a `Created` outcome.
    pub async fn submit(
        &self,
        draft: &ResourceDraft,
        mode: SubmitMode,
        cache: &mut ListCache<Resource>,
    ) -> Result<SubmissionOutcome, SubmitError> {
        let _guard =
            InFlightGuard::acquire(&self.in_flight).ok_or(SubmitError::AlreadyInFlight)?;

        // Pre-flight: an invalid draft never reaches the network.
        let payload = draft.payload()?;
        tracing::debug!(draft = %draft.draft_id, mode = mode.kind(), "submission started");

        let written = match &mode {
            SubmitMode::Create => self
                .store
                .create_resource(&payload)
                .await
                .map_err(|cause| stage_failure(SubmissionStage::ResourceWrite, None, cause))?,
            SubmitMode::Update { id, .. } => self
                .store
                .update_resource(id, &payload)
                .await
                .map_err(|cause| stage_failure(SubmissionStage::ResourceWrite, None, cause))?,
        };
        tracing::debug!(resource = %written.id, "resource record written");

        let removed_existing = matches!(
            (&mode, &draft.existing_attachment),
            (
                SubmitMode::Update {
                    original_attachment: Some(_),
                    ..
                },
                None,
            )
        );

        let finished = if let Some(file) = &draft.pending_file {
            // The upload needs the committed resource id; the patch needs
            // the uploaded file id. Strictly sequential by construction.
            let record = self
                .store
                .upload_file(
                    file,
                    FileOwner::Resource(written.id.clone()),
                    &UploadMeta::resume(&payload.name),
                )
                .await
                .map_err(|cause| {
                    stage_failure(
                        SubmissionStage::FileUpload,
                        Some(written.id.clone()),
                        cause,
                    )
                })?;
            tracing::debug!(resource = %written.id, file = %record.id, "file uploaded");

            self.store
                .patch_attachment(&written.id, AttachmentUpdate::Set(record.into()))
                .await
                .map_err(|cause| {
                    stage_failure(
                        SubmissionStage::AttachmentPatch,
                        Some(written.id.clone()),
                        cause,
                    )
                })?
        } else if removed_existing {
            self.store
                .patch_attachment(&written.id, AttachmentUpdate::Clear)
                .await
                .map_err(|cause| {
                    stage_failure(
                        SubmissionStage::AttachmentClear,
                        Some(written.id.clone()),
                        cause,
                    )
                })?
        } else {
            written
        };

        let id = finished.id.clone();
        match &mode {
            SubmitMode::Create => {
                if cache.apply_created(finished).is_some() {
                    tracing::debug!(resource = %id, "cache requests a page refetch");
                }
                tracing::debug!(resource = %id, "submission complete (created)");
                Ok(SubmissionOutcome::Created(id))
            }
            SubmitMode::Update { .. } => {
                cache.apply_updated(finished);
                tracing::debug!(resource = %id, "submission complete (updated)");
                Ok(SubmissionOutcome::Updated(id))
            }
        }
    }
}

fn stage_failure(
    stage: SubmissionStage,
    resource_id: Option<ResourceId>,
    cause: StoreError,
) -> SubmitError {
    tracing::warn!(
        %stage,
        resource = ?resource_id,
        error = %cause,
        "submission stage failed"
    );
    SubmitError::Stage {
        stage,
        resource_id,
        cause,
    }
}

/// RAII flag for the single-flight guard; releases on drop so every exit
/// path, including stage failures, re-arms the orchestrator.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
