// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Beacon state module
//!
//! The beacon state schema changes with every fork. [`VersionedBeaconState`] keeps the state in the
//! encoding it was served in, tagged with its consensus version, so that callers can decode it with
//! the schema of their choice.

use bytes::Bytes;
use ethereum_beacon_core::deserialization_error;
use ethereum_beacon_core::types::error::TypesError;
use ethereum_beacon_core::types::utils::extract_u64;
use ethereum_beacon_core::types::version::DataVersion;
use ethereum_beacon_core::types::{BYTES_32_LEN, U64_LEN};
use getset::{CopyGetters, Getters};

/// Offset of the slot in an SSZ encoded state. It follows `genesis_time` and
/// `genesis_validators_root` in every fork.
pub const STATE_SLOT_OFFSET: usize = U64_LEN + BYTES_32_LEN;

/// Minimum length of an SSZ encoded state for its slot to be readable.
pub const MIN_STATE_BYTES_LEN: usize = STATE_SLOT_OFFSET + U64_LEN;

/// A beacon state in its wire encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum BeaconStateData {
    Ssz(Bytes),
    Json(serde_json::Value),
}

/// A beacon state tagged with its consensus version.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct VersionedBeaconState {
    #[getset(get_copy = "pub")]
    version: DataVersion,
    #[getset(get = "pub")]
    data: BeaconStateData,
}

impl VersionedBeaconState {
    /// Create a state from its SSZ encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is too short to hold a state.
    pub fn from_ssz(version: DataVersion, bytes: Bytes) -> Result<Self, TypesError> {
        if bytes.len() < MIN_STATE_BYTES_LEN {
            return Err(TypesError::UnderLength {
                structure: "BeaconState".into(),
                minimum: MIN_STATE_BYTES_LEN,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            version,
            data: BeaconStateData::Ssz(bytes),
        })
    }

    /// Create a state from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not a JSON object.
    pub fn from_json(version: DataVersion, value: serde_json::Value) -> Result<Self, TypesError> {
        if !value.is_object() {
            return Err(deserialization_error!(
                "BeaconState",
                "state is not a JSON object"
            ));
        }

        Ok(Self {
            version,
            data: BeaconStateData::Json(value),
        })
    }

    /// Slot of the state.
    pub fn slot(&self) -> Result<u64, TypesError> {
        match &self.data {
            BeaconStateData::Ssz(bytes) => {
                extract_u64("BeaconState", bytes, STATE_SLOT_OFFSET).map(|(_, slot)| slot)
            }
            BeaconStateData::Json(value) => value
                .get("slot")
                .and_then(serde_json::Value::as_str)
                .ok_or_else(|| deserialization_error!("BeaconState", "missing slot"))?
                .parse()
                .map_err(|err: std::num::ParseIntError| deserialization_error!("BeaconState", err)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_slot_from_ssz() {
        let mut bytes = vec![0; 256];
        bytes[STATE_SLOT_OFFSET..MIN_STATE_BYTES_LEN].copy_from_slice(&123_456u64.to_le_bytes());

        let state = VersionedBeaconState::from_ssz(DataVersion::Deneb, Bytes::from(bytes)).unwrap();

        assert_eq!(state.version(), DataVersion::Deneb);
        assert_eq!(state.slot().unwrap(), 123_456);
    }

    #[test]
    fn test_slot_from_json() {
        let state = VersionedBeaconState::from_json(
            DataVersion::Capella,
            serde_json::json!({"genesis_time": "1", "slot": "77"}),
        )
        .unwrap();

        assert_eq!(state.slot().unwrap(), 77);
    }

    #[test]
    fn test_rejects_malformed_states() {
        assert!(matches!(
            VersionedBeaconState::from_ssz(DataVersion::Deneb, Bytes::from_static(&[0; 16])),
            Err(TypesError::UnderLength { .. })
        ));
        assert!(VersionedBeaconState::from_json(DataVersion::Deneb, serde_json::json!([])).is_err());

        let no_slot =
            VersionedBeaconState::from_json(DataVersion::Deneb, serde_json::json!({})).unwrap();
        assert!(no_slot.slot().is_err());
    }
}
