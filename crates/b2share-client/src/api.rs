//! Deposit-repository interface.
//!
//! The repository is an external collaborator with three operations, each of
//! which either returns or fails. Implementations live behind this trait so
//! the publish pipeline can be driven against a test double.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use eiscat_metadata::{MetadataRecord, ParameterPatch};

use crate::error::ClientError;

/// Opaque handle to a draft's file bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesHandle {
    /// Bucket URL that uploads are PUT into.
    pub bucket_url: String,
}

/// A draft record created in the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftHandle {
    /// Repository identifier of the draft.
    pub id: String,
    /// File bucket attached to the draft.
    pub files: FilesHandle,
}

/// The repository operations consumed by the publish pipeline.
#[async_trait]
pub trait DepositRepository {
    /// Create a draft from a basic record. Fails if the repository rejects
    /// the document.
    async fn create_draft(&self, record: &MetadataRecord) -> Result<DraftHandle, ClientError>;

    /// Apply a parameter patch to an existing draft.
    async fn update_draft(&self, draft_id: &str, patch: &ParameterPatch)
        -> Result<(), ClientError>;

    /// Upload the data file into a draft's bucket.
    async fn upload_file(&self, files: &FilesHandle, local_path: &Path)
        -> Result<(), ClientError>;
}
