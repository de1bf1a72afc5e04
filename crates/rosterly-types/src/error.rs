use thiserror::Error;

use std::fmt;

use crate::resource::ResourceId;

/// Local draft validation failures. Never reach the network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("a category must be selected")]
    MissingCategory,

    #[error("at least one skill is required")]
    NoSkills,

    #[error("skill entries cannot be empty")]
    EmptySkill,

    #[error("experience years must be at most {max}, got {actual}")]
    YearsOutOfRange { actual: u8, max: u8 },

    #[error("hours per week must be at most {max}, got {actual}")]
    HoursOutOfRange { actual: u8, max: u8 },

    #[error("hourly rate must be between 1 and 500, got {actual}")]
    RateOutOfRange { actual: f64 },
}

/// Rejections of a local file before it can enter a draft.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FileError {
    #[error("file name cannot be empty")]
    EmptyName,

    #[error("unsupported file type '{0}': expected .pdf, .doc, or .docx")]
    UnsupportedExtension(String),

    #[error("file is {actual} bytes, over the {max} byte limit")]
    TooLarge { actual: u64, max: u64 },
}

/// Failures of a single backend call.
///
/// The backend wraps every response in a `{success, data, message}`
/// envelope. An envelope with `success: false` maps to [`StoreError::Rejected`];
/// network and deserialization problems map to [`StoreError::Transport`]
/// and [`StoreError::Decode`]. Callers treat all three the same for
/// control flow and differ only in the message shown.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

/// The stage of a resource submission at which a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    ResourceWrite,
    FileUpload,
    AttachmentPatch,
    AttachmentClear,
}

impl fmt::Display for SubmissionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionStage::ResourceWrite => write!(f, "resource write"),
            SubmissionStage::FileUpload => write!(f, "file upload"),
            SubmissionStage::AttachmentPatch => write!(f, "attachment patch"),
            SubmissionStage::AttachmentClear => write!(f, "attachment clear"),
        }
    }
}

/// Terminal failure of a resource submission.
///
/// Stage failures keep the stage tag and, once the resource record has been
/// committed, its id -- enough for a caller to render stage-specific
/// guidance and offer an attachment-only retry instead of a full resubmit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("a submission for this draft is already in flight")]
    AlreadyInFlight,

    #[error("{stage} failed: {cause}")]
    Stage {
        stage: SubmissionStage,
        /// Id of the resource record if it was committed before the failure.
        resource_id: Option<ResourceId>,
        cause: StoreError,
    },
}

impl SubmitError {
    /// The failed stage, if this error came from a backend call.
    pub fn stage(&self) -> Option<SubmissionStage> {
        match self {
            SubmitError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Id of the resource record that was committed despite the failure.
    pub fn committed_resource(&self) -> Option<&ResourceId> {
        match self {
            SubmitError::Stage { resource_id, .. } => resource_id.as_ref(),
            _ => None,
        }
    }

    /// Stage-specific guidance suitable for direct display.
    ///
    /// A resource write failure changed nothing remotely; the later stages
    /// leave the record committed with missing or stale attachment state,
    /// which the message must say.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Validation(cause) => cause.to_string(),
            SubmitError::AlreadyInFlight => {
                "This profile is still being saved -- wait for it to finish.".to_string()
            }
            SubmitError::Stage { stage, .. } => match stage {
                SubmissionStage::ResourceWrite => {
                    "The profile could not be saved. Nothing was changed; try again.".to_string()
                }
                SubmissionStage::FileUpload => {
                    "The profile was saved, but the resume failed to upload. \
                     Retry attaching the file."
                        .to_string()
                }
                SubmissionStage::AttachmentPatch => {
                    "The profile and resume were saved, but linking them failed. \
                     Retry attaching the file."
                        .to_string()
                }
                SubmissionStage::AttachmentClear => {
                    "The profile was saved, but the removed resume is still linked. \
                     Retry removing it."
                        .to_string()
                }
            },
        }
    }
}
