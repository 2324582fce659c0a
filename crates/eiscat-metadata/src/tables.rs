//! Static lookup tables for the deposit schema.
//!
//! Antenna canonicalization and station coordinates are closed sets: a miss
//! is a data-integrity error. The parameter-name maps are intentionally
//! partial filters over the instrument mnemonic vocabulary, since not every
//! mnemonic has a counterpart in the deposit schema.

use crate::error::{MetadataError, Result};

/// Station position as decimal-degree strings, at the precision recorded in
/// the station table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationCoordinates {
    pub latitude: &'static str,
    pub longitude: &'static str,
}

/// Raw antenna tokens accepted by [`canonical_antenna`].
pub const ANTENNA_TOKENS: [&str; 9] = [
    "uhf", "vhf", "kir", "sod", "hf", "32m", "32p", "42m", "lyr",
];

/// Canonicalize a raw lowercase antenna token to its station tag.
///
/// The Longyearbyen token `lyr` maps to the `ESR` site tag.
pub fn canonical_antenna(token: &str) -> Result<&'static str> {
    match token {
        "uhf" => Ok("UHF"),
        "vhf" => Ok("VHF"),
        "kir" => Ok("KIR"),
        "sod" => Ok("SOD"),
        "hf" => Ok("HF"),
        "32m" => Ok("32m"),
        "32p" => Ok("32p"),
        "42m" => Ok("42m"),
        "lyr" => Ok("ESR"),
        _ => Err(MetadataError::UnknownAntenna(token.to_string())),
    }
}

/// Look up the geographic position of a canonical station tag.
///
/// Every tag produced by [`canonical_antenna`] has an entry here; the table
/// additionally covers legacy site tags found in older records.
pub fn station_coordinates(tag: &str) -> Result<StationCoordinates> {
    let (latitude, longitude) = match tag {
        "UHF" | "TRO" | "VHF" | "EIS" | "HF" | "HOT" => ("69.58", "19.23"),
        "KIR" => ("67.87", "20.43"),
        "SOD" => ("67.37", "26.63"),
        "32m" | "32p" | "42m" | "ESR" | "LYR" => ("78.15", "16.02"),
        _ => return Err(MetadataError::UnknownAntenna(tag.to_string())),
    };
    Ok(StationCoordinates { latitude, longitude })
}

/// Map a Madrigal parameter mnemonic to its deposit-schema name.
///
/// Partial by design: mnemonics outside the deposit vocabulary return `None`
/// and are silently excluded.
pub fn schema_parameter(mnemonic: &str) -> Option<&'static str> {
    match mnemonic {
        "PP" => Some("RawPower"),
        "NEL" => Some("ElectronDensity"),
        "TR" => Some("ElectronTemperature"),
        "TI" => Some("IonTemperature"),
        "VO" | "VOBI" => Some("IonDriftVelocity"),
        "PO+" => Some("IonCompositionO+"),
        "COL" => Some("IonNeutralCollisionFrequency"),
        _ => None,
    }
}

/// Map an error-estimate mnemonic to its deposit-schema name.
pub fn schema_error_parameter(mnemonic: &str) -> Option<&'static str> {
    match mnemonic {
        "DPP" => Some("DRawPower"),
        "DNEL" => Some("DElectronDensity"),
        "DTR" => Some("DElectronTemperature"),
        "DTI" => Some("DIonTemperature"),
        "DVO" | "DVOBI" => Some("DIonDriftVelocity"),
        "DPO+" => Some("DIonCompositionO+"),
        "DCOL" => Some("DIonNeutralCollisionFrequency"),
        _ => None,
    }
}

/// Rewrite legacy association codes to ISO country codes.
///
/// GE, NI and SW predate the ISO convention in the source database; all
/// other codes pass through unchanged.
pub fn associate_country(code: &str) -> &str {
    match code {
        "GE" => "DE",
        "NI" => "JP",
        "SW" => "SE",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_antenna_has_coordinates() {
        // Closure invariant between the two closed tables.
        for token in ANTENNA_TOKENS {
            let tag = canonical_antenna(token).unwrap();
            assert!(
                station_coordinates(tag).is_ok(),
                "no coordinates for antenna {}",
                tag
            );
        }
    }

    #[test]
    fn test_canonical_antenna() {
        assert_eq!(canonical_antenna("uhf").unwrap(), "UHF");
        assert_eq!(canonical_antenna("lyr").unwrap(), "ESR");
        assert_eq!(canonical_antenna("32m").unwrap(), "32m");
    }

    #[test]
    fn test_unknown_antenna_fails() {
        // "esr" is a station tag, not a raw token; uppercase is also invalid.
        assert!(matches!(
            canonical_antenna("esr"),
            Err(MetadataError::UnknownAntenna(_))
        ));
        assert!(canonical_antenna("UHF").is_err());
        assert!(station_coordinates("XYZ").is_err());
    }

    #[test]
    fn test_station_coordinates() {
        let tromso = station_coordinates("UHF").unwrap();
        assert_eq!(tromso.latitude, "69.58");
        assert_eq!(tromso.longitude, "19.23");

        let svalbard = station_coordinates("ESR").unwrap();
        assert_eq!(svalbard.latitude, "78.15");
        assert_eq!(svalbard.longitude, "16.02");
    }

    #[test]
    fn test_parameter_maps_are_partial() {
        assert_eq!(schema_parameter("NEL"), Some("ElectronDensity"));
        assert_eq!(schema_parameter("VOBI"), Some("IonDriftVelocity"));
        assert_eq!(schema_parameter("BOGUS"), None);

        assert_eq!(schema_error_parameter("DNEL"), Some("DElectronDensity"));
        assert_eq!(schema_error_parameter("NEL"), None);
    }

    #[test]
    fn test_associate_country_remap() {
        assert_eq!(associate_country("GE"), "DE");
        assert_eq!(associate_country("NI"), "JP");
        assert_eq!(associate_country("SW"), "SE");
        assert_eq!(associate_country("NO"), "NO");
        assert_eq!(associate_country("FI"), "FI");
    }
}
