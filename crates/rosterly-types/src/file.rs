//! File attachment types: pending uploads, stored file records, and the
//! attachment pointer a resource holds onto a file record.
//!
//! A [`PendingFile`] can only be constructed through validation -- a file
//! with a disallowed extension or over the size limit never enters a draft.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::error::FileError;
use crate::resource::ResourceId;

/// Maximum accepted upload size in bytes (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Accepted resume file extensions, lowercase, without the leading dot.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

/// Unique identifier for a stored file record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An in-memory upload candidate held by a draft until submission.
///
/// Ephemeral: never persisted locally beyond the draft's lifetime. The
/// constructor enforces the extension and size constraints, so every
/// `PendingFile` in existence is uploadable.
#[derive(Debug, Clone)]
pub struct PendingFile {
    name: String,
    bytes: Vec<u8>,
    mime_type: &'static str,
}

impl PendingFile {
    /// Validate and wrap an upload candidate.
    ///
    /// Rejects empty names, extensions outside {.pdf, .doc, .docx}
    /// (case-insensitive), and contents over [`MAX_UPLOAD_BYTES`].
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, FileError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FileError::EmptyName);
        }

        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        let mime_type = match extension.as_str() {
            "pdf" => "application/pdf",
            "doc" => "application/msword",
            "docx" => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            _ => return Err(FileError::UnsupportedExtension(name)),
        };

        let size = bytes.len() as u64;
        if size > MAX_UPLOAD_BYTES {
            return Err(FileError::TooLarge {
                actual: size,
                max: MAX_UPLOAD_BYTES,
            });
        }

        Ok(Self {
            name,
            bytes,
            mime_type,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn mime_type(&self) -> &str {
        self.mime_type
    }
}

/// A stored file entity as returned by the upload endpoint.
///
/// Lives independently of the resource that references it; linking the two
/// is a separate write against the resource record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    #[serde(rename = "_id")]
    pub id: FileId,
    pub filename: String,
    pub path: String,
    pub original_name: String,
    pub size: u64,
    #[serde(rename = "mimetype")]
    pub mime_type: String,
}

/// Pointer from a resource record to its stored file.
///
/// Owned by the resource, but the file record itself is a separate remote
/// entity with its own id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRef {
    pub file_id: FileId,
    pub filename: String,
    pub path: String,
    pub original_name: String,
    pub size: u64,
    pub mime_type: String,
}

impl From<FileRecord> for AttachmentRef {
    fn from(record: FileRecord) -> Self {
        Self {
            file_id: record.id,
            filename: record.filename,
            path: record.path,
            original_name: record.original_name,
            size: record.size,
            mime_type: record.mime_type,
        }
    }
}

/// The entity a file upload is attached to.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOwner {
    Resource(ResourceId),
}

impl FileOwner {
    /// Owner type discriminator sent with the upload form.
    pub fn owner_type(&self) -> &'static str {
        match self {
            FileOwner::Resource(_) => "resource",
        }
    }

    /// Owner id sent with the upload form.
    pub fn owner_id(&self) -> &str {
        match self {
            FileOwner::Resource(id) => id.as_str(),
        }
    }
}

/// Metadata accompanying a file upload.
#[derive(Debug, Clone)]
pub struct UploadMeta {
    pub category: String,
    pub description: String,
    pub is_public: bool,
}

impl UploadMeta {
    /// Metadata for a resume upload on behalf of the named resource.
    pub fn resume(resource_name: &str) -> Self {
        Self {
            category: "resume".to_string(),
            description: format!("Resume for {resource_name}"),
            is_public: false,
        }
    }
}
