//! Publish pipeline: create draft, patch parameters, upload the data file.
//!
//! The three repository calls share no transaction, so the pipeline is an
//! explicit sequence with one attempt per stage and no rollback. Every
//! failure after draft creation carries the draft id, so the caller can
//! resume or clean up instead of creating a duplicate draft.

use std::path::Path;

use tracing::{error, info};

use eiscat_metadata::{MetadataRecord, ParameterPatch};

use crate::api::DepositRepository;
use crate::error::PublishError;

/// Result of a completed publish run.
#[derive(Debug, Clone)]
pub struct PublishReceipt {
    /// Identifier of the fully published draft.
    pub draft_id: String,
}

/// Drives one draft lifecycle against the repository.
///
/// Precondition: callers must not run two publishes for the same run
/// descriptor concurrently. The repository has no uniqueness constraint and
/// would accept two drafts for the same logical run.
pub struct Publisher<R> {
    repository: R,
}

impl<R: DepositRepository> Publisher<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Publish one record: draft, then patch, then file upload.
    pub async fn publish(
        &self,
        record: &MetadataRecord,
        patch: &ParameterPatch,
        data_file: &Path,
    ) -> Result<PublishReceipt, PublishError> {
        let draft = self
            .repository
            .create_draft(record)
            .await
            .map_err(|source| PublishError::Create { source })?;
        info!(draft_id = %draft.id, "Draft created");

        if let Err(source) = self.repository.update_draft(&draft.id, patch).await {
            error!(
                draft_id = %draft.id,
                error = %source,
                "Patch failed, draft remains in repository"
            );
            return Err(PublishError::Patch {
                draft_id: draft.id,
                source,
            });
        }
        info!(draft_id = %draft.id, "Parameters patched");

        if let Err(source) = self.repository.upload_file(&draft.files, data_file).await {
            error!(
                draft_id = %draft.id,
                error = %source,
                "Upload failed, draft remains in repository"
            );
            return Err(PublishError::Upload {
                draft_id: draft.id,
                source,
            });
        }
        info!(draft_id = %draft.id, file = %data_file.display(), "Data file uploaded");

        Ok(PublishReceipt { draft_id: draft.id })
    }
}
