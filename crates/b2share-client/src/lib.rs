//! B2SHARE deposit client and publish pipeline.
//!
//! Consumes records and patches built by `eiscat-metadata` and publishes
//! them through the repository's three-call sequence: create a draft, patch
//! the measured parameters in, upload the data file. The repository sits
//! behind the [`DepositRepository`] trait so the pipeline can be tested
//! without a network.

pub mod api;
pub mod error;
pub mod http;
pub mod pipeline;

// Re-exports
pub use api::{DepositRepository, DraftHandle, FilesHandle};
pub use error::{ClientError, PublishError, PublishStage};
pub use http::{B2ShareClient, B2ShareConfig};
pub use pipeline::{PublishReceipt, Publisher};
