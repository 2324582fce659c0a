//! Incremental parameter patch for an existing draft record.

use serde::{Deserialize, Serialize};

use crate::tables;
use crate::types::ParameterDescriptor;

/// A single JSON Patch "add" operation (RFC 6902 subset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: String,
    pub path: String,
    pub value: Vec<String>,
}

impl PatchOperation {
    fn add(path: String, value: Vec<String>) -> Self {
        Self {
            op: "add".to_string(),
            path,
            value,
        }
    }
}

/// Ordered patch adding the measured parameter and error listings to a
/// draft's community-specific block.
///
/// Serializes as the patch document itself: a JSON array of operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterPatch {
    pub operations: Vec<PatchOperation>,
}

/// Build the parameter patch for one experiment.
///
/// A single pass over the catalogue, preserving input order. The parameter
/// and error map checks are evaluated independently for every descriptor;
/// mnemonics outside either map are dropped without error. Both operations
/// are always emitted, with empty lists when nothing matched.
pub fn build_parameter_patch(
    parameters: &[ParameterDescriptor],
    community_specific_id: &str,
) -> ParameterPatch {
    let mut measured = Vec::new();
    let mut errors = Vec::new();

    for descriptor in parameters {
        if let Some(name) = tables::schema_parameter(&descriptor.mnemonic) {
            if descriptor.is_measured {
                measured.push(name.to_string());
            }
        }
        if let Some(name) = tables::schema_error_parameter(&descriptor.mnemonic) {
            if descriptor.is_error {
                errors.push(name.to_string());
            }
        }
    }

    ParameterPatch {
        operations: vec![
            PatchOperation::add(
                format!("/community_specific/{}/parameters", community_specific_id),
                measured,
            ),
            PatchOperation::add(
                format!("/community_specific/{}/parameter_errors", community_specific_id),
                errors,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(mnemonic: &str, is_measured: bool, is_error: bool) -> ParameterDescriptor {
        ParameterDescriptor {
            mnemonic: mnemonic.to_string(),
            is_measured,
            is_error,
        }
    }

    #[test]
    fn test_order_preserved_and_unmapped_dropped() {
        let parameters = [
            descriptor("NEL", true, false),
            descriptor("BOGUS", true, false),
            descriptor("DTI", false, true),
            descriptor("TI", true, false),
        ];

        let patch = build_parameter_patch(&parameters, "block-1");
        assert_eq!(patch.operations.len(), 2);

        let measured = &patch.operations[0];
        assert_eq!(measured.op, "add");
        assert_eq!(measured.path, "/community_specific/block-1/parameters");
        assert_eq!(measured.value, ["ElectronDensity", "IonTemperature"]);

        let errors = &patch.operations[1];
        assert_eq!(errors.path, "/community_specific/block-1/parameter_errors");
        assert_eq!(errors.value, ["DIonTemperature"]);
    }

    #[test]
    fn test_flags_gate_each_list() {
        // Mapped mnemonics contribute nothing unless the matching flag is set.
        let parameters = [descriptor("NEL", false, false), descriptor("DNEL", false, false)];
        let patch = build_parameter_patch(&parameters, "block-1");
        assert!(patch.operations[0].value.is_empty());
        assert!(patch.operations[1].value.is_empty());
    }

    #[test]
    fn test_empty_catalogue_still_emits_both_operations() {
        let patch = build_parameter_patch(&[], "block-1");
        assert_eq!(patch.operations.len(), 2);
        assert_eq!(patch.operations[0].value, Vec::<String>::new());
        assert_eq!(patch.operations[1].value, Vec::<String>::new());
    }

    #[test]
    fn test_both_checks_run_for_every_descriptor() {
        // A descriptor flagged both ways is checked against both maps.
        let parameters = [descriptor("NEL", true, true), descriptor("DNEL", true, true)];
        let patch = build_parameter_patch(&parameters, "block-1");
        assert_eq!(patch.operations[0].value, ["ElectronDensity"]);
        assert_eq!(patch.operations[1].value, ["DElectronDensity"]);
    }

    #[test]
    fn test_serializes_as_json_patch_document() {
        let patch = build_parameter_patch(&[descriptor("VO", true, false)], "block-1");
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {
                    "op": "add",
                    "path": "/community_specific/block-1/parameters",
                    "value": ["IonDriftVelocity"]
                },
                {
                    "op": "add",
                    "path": "/community_specific/block-1/parameter_errors",
                    "value": []
                }
            ])
        );
    }
}
