// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Consensus version module
//!
//! Versioned payloads served by a Beacon Node follow the schema of the fork they belong to. The fork
//! is announced by the `Eth-Consensus-Version` response header or, for JSON bodies, by the top-level
//! `version` field.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name of the response header carrying the consensus version.
pub const CONSENSUS_VERSION_HEADER: &str = "Eth-Consensus-Version";

/// `DataVersion` identifies which fork schema a versioned payload follows. Variants are ordered by
/// fork sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataVersion {
    Phase0,
    Altair,
    Bellatrix,
    Capella,
    Deneb,
    Electra,
    Fulu,
}

/// Error returned when a consensus version tag is not recognised.
#[derive(Debug, Error)]
#[error("Unrecognised consensus version \"{0}\"")]
pub struct UnknownVersionError(pub String);

impl DataVersion {
    /// Lowercase tag of the version, as used on the wire.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DataVersion::Phase0 => "phase0",
            DataVersion::Altair => "altair",
            DataVersion::Bellatrix => "bellatrix",
            DataVersion::Capella => "capella",
            DataVersion::Deneb => "deneb",
            DataVersion::Electra => "electra",
            DataVersion::Fulu => "fulu",
        }
    }
}

impl FromStr for DataVersion {
    type Err = UnknownVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phase0" => Ok(DataVersion::Phase0),
            "altair" => Ok(DataVersion::Altair),
            "bellatrix" => Ok(DataVersion::Bellatrix),
            "capella" => Ok(DataVersion::Capella),
            "deneb" => Ok(DataVersion::Deneb),
            "electra" => Ok(DataVersion::Electra),
            "fulu" => Ok(DataVersion::Fulu),
            _ => Err(UnknownVersionError(s.to_string())),
        }
    }
}

impl fmt::Display for DataVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DataVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DataVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("deneb".parse::<DataVersion>().unwrap(), DataVersion::Deneb);
        assert_eq!("DENEB".parse::<DataVersion>().unwrap(), DataVersion::Deneb);
        assert_eq!(" Capella".parse::<DataVersion>().unwrap(), DataVersion::Capella);
        assert!("merge".parse::<DataVersion>().is_err());
        assert!("".parse::<DataVersion>().is_err());
    }

    #[test]
    fn test_fork_order() {
        assert!(DataVersion::Phase0 < DataVersion::Altair);
        assert!(DataVersion::Deneb < DataVersion::Electra);
    }

    #[test]
    fn test_serde() {
        let version: DataVersion = serde_json::from_str("\"electra\"").unwrap();
        assert_eq!(version, DataVersion::Electra);
        assert_eq!(serde_json::to_string(&version).unwrap(), "\"electra\"");
        assert!(serde_json::from_str::<DataVersion>("\"unknown\"").is_err());
    }
}
