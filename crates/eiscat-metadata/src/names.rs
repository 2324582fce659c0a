//! Experiment name normalization.
//!
//! Dispatch names follow the convention `<name>[_<variant>]_<version>_<CC>`,
//! e.g. `manda_4.0_SW` or `beata_ant_1.0_NO`; the trailing association code
//! and version segments are both optional.

use serde::{Deserialize, Serialize};

/// Normalized identity derived from a raw dispatch name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentName {
    /// Canonical display name.
    pub display_name: String,
    /// Two-letter association code, uppercased, when the raw name carries one.
    pub country_code: Option<String>,
    /// Experiment version token, when the raw name carries one.
    pub version: Option<String>,
}

/// Normalizes raw instrument identifiers.
///
/// Implementations must be pure: no network or filesystem access.
pub trait NameResolver {
    fn resolve(&self, raw_name: &str) -> ExperimentName;
}

/// Resolver for the underscore-segmented dispatch-name convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentedNameResolver;

impl NameResolver for SegmentedNameResolver {
    fn resolve(&self, raw_name: &str) -> ExperimentName {
        let mut segments: Vec<&str> = raw_name.split('_').collect();

        // Trailing two-letter alphabetic segment is the association code.
        let country_code = segments
            .last()
            .filter(|s| {
                segments.len() > 1 && s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic())
            })
            .map(|s| s.to_ascii_uppercase());
        if country_code.is_some() {
            segments.pop();
        }

        // A remaining trailing segment starting with a digit is the version.
        let version = segments
            .last()
            .filter(|s| segments.len() > 1 && s.starts_with(|c: char| c.is_ascii_digit()))
            .map(|s| (*s).to_string());
        if version.is_some() {
            segments.pop();
        }

        ExperimentName {
            display_name: segments.join("_"),
            country_code,
            version,
        }
    }
}
