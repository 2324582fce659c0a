//! Deposit-schema metadata record and its builder.
//!
//! The record types serialize with serde in declaration order, which is the
//! key order the deposit schema consumers expect; conditional fields are
//! `Option`s skipped when absent, so each presence rule is one guarded field
//! rather than a nested branch.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::embargo::embargo_date;
use crate::error::Result;
use crate::names::NameResolver;
use crate::tables;
use crate::types::{DataLevel, RunDescriptor};

/// Timestamp layout used throughout the deposit schema: naive UTC, second
/// precision, no offset suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const CREATOR_NAME: &str = "EISCAT Scientific Association";
const LICENSE_NAME: &str = "EISCAT Rules of the Road";
const LICENSE_URI: &str = "https://www.eiscat.se/scientist/data/#rules";
const CONTACT_EMAIL: &str = "carl-fredrik.enell@eiscat.se";
const DISCIPLINES: [&str; 2] = [
    "3.4.12 \u{2192} Physics \u{2192} Geophysics",
    "3.5 \u{2192} Natural sciences \u{2192} Space sciences",
];
const KEYWORDS: [&str; 3] = ["Radar", "Incoherent scatter", "Ionosphere"];

/// Parameter listing deposited with preliminary records before the measured
/// catalogue is patched in.
const PRELIMINARY_PARAMETERS: [&str; 2] = ["LagProfile", "ParameterBlock"];

/// Format a timestamp the way the deposit schema expects.
pub fn format_timestamp(t: NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub creator_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub license: String,
    pub license_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    pub description: String,
    pub description_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceType {
    pub resource_type: String,
    pub resource_type_general: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternateIdentifier {
    pub alternate_identifier: String,
    pub alternate_identifier_type: String,
}

/// Community-specific metadata block for one experiment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antenna: Option<Vec<String>>,
    pub latitude: String,
    pub longitude: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_directory_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<String>>,
}

/// A complete deposit-schema metadata record.
///
/// Constructed once per data product by [`MetadataBuilder::build`] and never
/// mutated in place; later enrichment happens through a separate patch
/// document applied to the repository draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub community: String,
    pub titles: Vec<Title>,
    pub creators: Vec<Creator>,
    pub license: License,
    pub contact_email: String,
    pub descriptions: Vec<Description>,
    pub open_access: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embargo_date: Option<String>,
    pub disciplines: Vec<String>,
    pub keywords: Vec<String>,
    pub resource_types: Vec<ResourceType>,
    pub alternate_identifiers: Vec<AlternateIdentifier>,
    pub community_specific: HashMap<String, ExperimentMetadata>,
}

/// Assembles deposit records for one community.
///
/// Constructed once at startup with the community identifiers and a name
/// resolver; [`build`](Self::build) is then a pure function of the run, the
/// data level, the target file URL and the caller-supplied clock.
pub struct MetadataBuilder<R> {
    community_id: String,
    community_specific_id: String,
    resolver: R,
}

impl<R: NameResolver> MetadataBuilder<R> {
    pub fn new(
        community_id: impl Into<String>,
        community_specific_id: impl Into<String>,
        resolver: R,
    ) -> Self {
        Self {
            community_id: community_id.into(),
            community_specific_id: community_specific_id.into(),
            resolver,
        }
    }

    /// Key of the community-specific block this builder writes.
    pub fn community_specific_id(&self) -> &str {
        &self.community_specific_id
    }

    /// Build the basic record for one run.
    ///
    /// Fails with `MetadataError::UnknownAntenna` when the run's antenna
    /// token or its station tag is outside the closed lookup tables.
    pub fn build(
        &self,
        run: &RunDescriptor,
        level: DataLevel,
        output_file_url: &str,
        now: NaiveDateTime,
    ) -> Result<MetadataRecord> {
        let antenna = tables::canonical_antenna(&run.antenna)?;
        let coordinates = tables::station_coordinates(antenna)?;
        let name = self.resolver.resolve(&run.raw_name);

        // Association and version are only deposited for embargo-band data.
        let (account, account_info, version) = if level.is_preliminary() {
            let account = name
                .country_code
                .as_deref()
                .map(|cc| vec![tables::associate_country(cc).to_string()]);
            let account_info = account.as_ref().map(|_| run.resource.clone());
            (account, account_info, name.version.clone())
        } else {
            (None, None, None)
        };

        let embargo = embargo_date(run.end_time, level, now);
        let start_time = format_timestamp(run.start_time);
        let end_time = format_timestamp(run.end_time);

        let resource_type = if level.is_preliminary() {
            ResourceType {
                resource_type: "EISCAT Level 2 data".to_string(),
                resource_type_general: "Collection".to_string(),
            }
        } else {
            ResourceType {
                resource_type: "EISCAT Level 3 data".to_string(),
                resource_type_general: "Dataset".to_string(),
            }
        };

        let experiment = ExperimentMetadata {
            experiment_id: Some(run.experiment_id.clone()),
            start_time: Some(start_time.clone()),
            end_time: Some(end_time),
            account,
            account_info,
            antenna: Some(vec![antenna.to_string()]),
            latitude: coordinates.latitude.to_string(),
            longitude: coordinates.longitude.to_string(),
            info_directory_url: run.info_directory_url.clone(),
            version,
            parameters: level
                .is_preliminary()
                .then(|| PRELIMINARY_PARAMETERS.iter().map(|p| p.to_string()).collect()),
        };

        Ok(MetadataRecord {
            community: self.community_id.clone(),
            titles: vec![Title {
                title: format!("{} {} {}", name.display_name, antenna, start_time),
            }],
            creators: vec![Creator {
                creator_name: CREATOR_NAME.to_string(),
            }],
            license: License {
                license: LICENSE_NAME.to_string(),
                license_uri: LICENSE_URI.to_string(),
            },
            contact_email: CONTACT_EMAIL.to_string(),
            descriptions: vec![Description {
                description: format!(
                    "{} Level {} data from EISCAT {}",
                    name.display_name, level, antenna
                ),
                description_type: "Abstract".to_string(),
            }],
            open_access: embargo.is_none(),
            embargo_date: embargo.map(format_timestamp),
            disciplines: DISCIPLINES.iter().map(|d| d.to_string()).collect(),
            keywords: KEYWORDS.iter().map(|k| k.to_string()).collect(),
            resource_types: vec![resource_type],
            alternate_identifiers: vec![AlternateIdentifier {
                alternate_identifier: output_file_url.to_string(),
                alternate_identifier_type: "URL".to_string(),
            }],
            community_specific: HashMap::from([(self.community_specific_id.clone(), experiment)]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::ExperimentName;
    use chrono::NaiveDate;

    /// Resolver with a fixed answer, so builder tests control the country
    /// code and version independently of the parsing rules.
    struct StubResolver {
        country_code: Option<&'static str>,
        version: Option<&'static str>,
    }

    impl NameResolver for StubResolver {
        fn resolve(&self, raw_name: &str) -> ExperimentName {
            ExperimentName {
                display_name: raw_name.to_string(),
                country_code: self.country_code.map(str::to_string),
                version: self.version.map(str::to_string),
            }
        }
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn run() -> RunDescriptor {
        RunDescriptor {
            experiment_id: "12345".to_string(),
            raw_name: "manda".to_string(),
            antenna: "uhf".to_string(),
            resource: "SW(80)".to_string(),
            start_time: at(2020, 1, 1),
            end_time: at(2020, 1, 2),
            location: "Tromso".to_string(),
            info_directory_url: None,
            output_path: "/data/manda.hdf5".into(),
        }
    }

    fn builder(country_code: Option<&'static str>, version: Option<&'static str>) -> MetadataBuilder<StubResolver> {
        MetadataBuilder::new("community-1", "block-1", StubResolver { country_code, version })
    }

    #[test]
    fn test_title_and_description() {
        let record = builder(None, None)
            .build(&run(), DataLevel(2), "http://data/manda.hdf5", at(2020, 6, 1))
            .unwrap();

        assert_eq!(record.titles[0].title, "manda UHF 2020-01-01T00:00:00");
        assert_eq!(
            record.descriptions[0].description,
            "manda Level 2 data from EISCAT UHF"
        );
        assert_eq!(record.descriptions[0].description_type, "Abstract");
    }

    #[test]
    fn test_unknown_antenna_is_fatal() {
        let mut bad = run();
        bad.antenna = "esr".to_string();
        let result = builder(None, None).build(&bad, DataLevel(2), "http://x", at(2020, 6, 1));
        assert!(result.is_err());
    }

    #[test]
    fn test_account_follows_country_code_and_level() {
        // Legacy SW remaps to SE; account_info mirrors the resource label.
        let record = builder(Some("SW"), Some("4.0"))
            .build(&run(), DataLevel(2), "http://x", at(2020, 6, 1))
            .unwrap();
        let experiment = &record.community_specific["block-1"];
        assert_eq!(experiment.account.as_deref(), Some(&["SE".to_string()][..]));
        assert_eq!(experiment.account_info.as_deref(), Some("SW(80)"));
        assert_eq!(experiment.version.as_deref(), Some("4.0"));

        // No country code: no account block even at level 2.
        let record = builder(None, Some("4.0"))
            .build(&run(), DataLevel(2), "http://x", at(2020, 6, 1))
            .unwrap();
        let experiment = &record.community_specific["block-1"];
        assert_eq!(experiment.account, None);
        assert_eq!(experiment.account_info, None);
    }

    #[test]
    fn test_final_level_drops_versioned_fields() {
        let record = builder(Some("SW"), Some("4.0"))
            .build(&run(), DataLevel(3), "http://x", at(2020, 6, 1))
            .unwrap();
        let experiment = &record.community_specific["block-1"];
        assert_eq!(experiment.account, None);
        assert_eq!(experiment.account_info, None);
        assert_eq!(experiment.version, None);
        assert_eq!(experiment.parameters, None);
        assert_eq!(record.resource_types[0].resource_type, "EISCAT Level 3 data");
        assert_eq!(record.resource_types[0].resource_type_general, "Dataset");
    }

    #[test]
    fn test_preliminary_parameter_listing() {
        let record = builder(None, None)
            .build(&run(), DataLevel(2), "http://x", at(2020, 6, 1))
            .unwrap();
        let experiment = &record.community_specific["block-1"];
        assert_eq!(
            experiment.parameters.as_deref(),
            Some(&["LagProfile".to_string(), "ParameterBlock".to_string()][..])
        );
        assert_eq!(record.resource_types[0].resource_type, "EISCAT Level 2 data");
        assert_eq!(record.resource_types[0].resource_type_general, "Collection");
    }

    #[test]
    fn test_info_directory_url_guard() {
        let mut with_url = run();
        with_url.info_directory_url = Some("http://info/manda".to_string());
        let record = builder(None, None)
            .build(&with_url, DataLevel(2), "http://x", at(2020, 6, 1))
            .unwrap();
        let experiment = &record.community_specific["block-1"];
        assert_eq!(experiment.info_directory_url.as_deref(), Some("http://info/manda"));

        let record = builder(None, None)
            .build(&run(), DataLevel(2), "http://x", at(2020, 6, 1))
            .unwrap();
        assert_eq!(record.community_specific["block-1"].info_directory_url, None);
    }

    #[test]
    fn test_alternate_identifier_points_at_file_url() {
        let record = builder(None, None)
            .build(&run(), DataLevel(3), "http://data/2020/manda.hdf5", at(2020, 6, 1))
            .unwrap();
        assert_eq!(
            record.alternate_identifiers[0].alternate_identifier,
            "http://data/2020/manda.hdf5"
        );
        assert_eq!(record.alternate_identifiers[0].alternate_identifier_type, "URL");
    }

    #[test]
    fn test_fixed_constants() {
        let record = builder(None, None)
            .build(&run(), DataLevel(3), "http://x", at(2020, 6, 1))
            .unwrap();
        assert_eq!(record.creators[0].creator_name, "EISCAT Scientific Association");
        assert_eq!(record.license.license, "EISCAT Rules of the Road");
        assert_eq!(record.contact_email, "carl-fredrik.enell@eiscat.se");
        assert_eq!(record.keywords, ["Radar", "Incoherent scatter", "Ionosphere"]);
        assert_eq!(record.disciplines.len(), 2);
    }
}
