//! Metadata synthesis for EISCAT data deposits.
//!
//! Converts a run descriptor from the file-conversion pipeline into a
//! B2SHARE-schema metadata record, plus an incremental JSON patch carrying
//! the parameters that were actually measured. Everything in this crate is
//! pure and synchronous; talking to the repository lives in the
//! `b2share-client` crate.
//!
//! # Architecture
//!
//! - Static lookup tables (antennas, station positions, parameter names)
//! - Dispatch-name normalization behind the [`NameResolver`] seam
//! - Embargo policy for preliminary data levels
//! - [`MetadataBuilder`] assembling the schema-conformant record
//! - [`build_parameter_patch`] producing the two-operation patch document

pub mod embargo;
pub mod error;
pub mod names;
pub mod patch;
pub mod record;
pub mod tables;
pub mod types;

// Re-exports
pub use embargo::{embargo_date, EMBARGO_PERIOD_DAYS};
pub use error::{MetadataError, Result};
pub use names::{ExperimentName, NameResolver, SegmentedNameResolver};
pub use patch::{build_parameter_patch, ParameterPatch, PatchOperation};
pub use record::{format_timestamp, MetadataBuilder, MetadataRecord, TIMESTAMP_FORMAT};
pub use types::{DataLevel, ParameterDescriptor, RunDescriptor};
