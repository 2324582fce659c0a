//! Error types for the deposit client and publish pipeline.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from individual repository calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The repository refused the submitted document.
    #[error("Repository rejected document ({status}): {message}")]
    SchemaRejection { status: u16, message: String },

    /// Network or protocol failure talking to the repository.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The local data file could not be read for upload.
    #[error("Failed to read upload file: {0}")]
    FileRead(#[from] std::io::Error),

    /// The upload path has no usable file name component.
    #[error("Invalid upload path: {0}")]
    InvalidUploadPath(PathBuf),

    /// The repository answered success but the body lacked the draft id or
    /// file bucket.
    #[error("Malformed repository response: {0}")]
    MalformedResponse(String),
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStage {
    Create,
    Patch,
    Upload,
}

impl fmt::Display for PublishStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishStage::Create => "create_draft",
            PublishStage::Patch => "update_draft",
            PublishStage::Upload => "upload_file",
        };
        f.write_str(name)
    }
}

/// A publish pipeline failure carrying the best-known repository state.
///
/// Once a draft exists its id is always included, so a caller can resume or
/// clean up instead of re-creating a duplicate draft. Drafts are never
/// deleted by the pipeline.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Draft creation failed: {source}")]
    Create {
        #[source]
        source: ClientError,
    },

    #[error("Parameter patch failed, draft {draft_id} left unpatched: {source}")]
    Patch {
        draft_id: String,
        #[source]
        source: ClientError,
    },

    #[error("File upload failed, draft {draft_id} left without its data file: {source}")]
    Upload {
        draft_id: String,
        #[source]
        source: ClientError,
    },
}

impl PublishError {
    /// Stage at which the pipeline stopped.
    pub fn stage(&self) -> PublishStage {
        match self {
            PublishError::Create { .. } => PublishStage::Create,
            PublishError::Patch { .. } => PublishStage::Patch,
            PublishError::Upload { .. } => PublishStage::Upload,
        }
    }

    /// Identifier of the draft created before the failure, if one exists.
    pub fn draft_id(&self) -> Option<&str> {
        match self {
            PublishError::Create { .. } => None,
            PublishError::Patch { draft_id, .. } | PublishError::Upload { draft_id, .. } => {
                Some(draft_id)
            }
        }
    }
}
