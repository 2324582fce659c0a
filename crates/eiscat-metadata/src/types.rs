//! Input model handed over by the file-conversion pipeline.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Processing level of a data product.
///
/// Levels below 3 are derived products still subject to the data-access
/// embargo and experiment versioning; level 3 and above are final, openly
/// accessible products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataLevel(pub u8);

impl DataLevel {
    /// Whether this level falls in the embargoed/versioned band.
    pub fn is_preliminary(self) -> bool {
        self.0 < 3
    }
}

impl fmt::Display for DataLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One experiment run, as described by the conversion pipeline.
///
/// All times are naive UTC; the deposit schema carries no timezone offsets.
/// The descriptor is read-only input to this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunDescriptor {
    /// Experiment identifier in the source database.
    pub experiment_id: String,
    /// Instrument-specific dispatch name, e.g. `manda_4.0_SW`.
    pub raw_name: String,
    /// Raw lowercase antenna token, e.g. `uhf` or `32m`.
    pub antenna: String,
    /// Resource/account label for the run.
    pub resource: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Site label; logged for traceability but not deposited.
    pub location: String,
    /// URL of the experiment information directory, when one exists.
    #[serde(default)]
    pub info_directory_url: Option<String>,
    /// Local path of the data file to deposit.
    pub output_path: PathBuf,
}

/// One entry of an experiment's instrument-parameter catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Instrument mnemonic, e.g. `NEL` or `DTI`.
    pub mnemonic: String,
    /// Whether the parameter was actually measured in this run.
    pub is_measured: bool,
    /// Whether the entry is an error estimate.
    pub is_error: bool,
}
