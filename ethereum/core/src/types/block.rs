// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Block module
//!
//! This module contains the data structures used by the Beacon Node to describe block headers.
//!
//! It mainly contains the `BeaconBlockHeader` data structure, which represent the header of a beacon
//! block, and its signed counterpart `SignedBeaconBlockHeader`.

use crate::crypto::hash::HashValue;
use crate::merkle::utils::{merkle_root, u64_leaf, DataType};
use crate::merkle::Merkleized;
use crate::types::error::TypesError;
use crate::types::serde_utils::{hex_array, quoted_u64};
use crate::types::utils::{check_length, extract_fixed_bytes, extract_u64};
use crate::types::{BLSSignature, Bytes32, BLS_SIGNATURE_LEN, BYTES_32_LEN, U64_LEN};
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

/// Length in bytes of a serialized `BeaconBlockHeader`.
pub const BEACON_BLOCK_HEADER_BYTES_LEN: usize = BYTES_32_LEN * 3 + U64_LEN * 2;

/// Length in bytes of a serialized `SignedBeaconBlockHeader`.
pub const SIGNED_BEACON_BLOCK_HEADER_BYTES_LEN: usize =
    BEACON_BLOCK_HEADER_BYTES_LEN + BLS_SIGNATURE_LEN;

/// `BeaconBlockHeader` represents the header of a beacon block.
///
/// From [the CL specifications](https://github.com/ethereum/consensus-specs/blob/v1.4.0/specs/phase0/beacon-chain.md#beaconblockheader).
#[derive(Debug, Default, Clone, PartialEq, Eq, Getters, CopyGetters, Serialize, Deserialize)]
pub struct BeaconBlockHeader {
    #[getset(get_copy = "pub")]
    #[serde(with = "quoted_u64")]
    slot: u64,
    #[getset(get_copy = "pub")]
    #[serde(with = "quoted_u64")]
    proposer_index: u64,
    #[getset(get = "pub")]
    #[serde(with = "hex_array")]
    parent_root: Bytes32,
    #[getset(get = "pub")]
    #[serde(with = "hex_array")]
    state_root: Bytes32,
    #[getset(get = "pub")]
    #[serde(with = "hex_array")]
    body_root: Bytes32,
}

impl BeaconBlockHeader {
    /// Create a new `BeaconBlockHeader`.
    ///
    /// # Arguments
    ///
    /// * `slot` - The slot of the block.
    /// * `proposer_index` - The registry index of the validator who proposed the block.
    /// * `parent_root` - The root of the parent block.
    /// * `state_root` - The root of the beacon state after the block.
    /// * `body_root` - The root of the block body.
    pub const fn new(
        slot: u64,
        proposer_index: u64,
        parent_root: Bytes32,
        state_root: Bytes32,
        body_root: Bytes32,
    ) -> Self {
        Self {
            slot,
            proposer_index,
            parent_root,
            state_root,
            body_root,
        }
    }

    /// Serialize a `BeaconBlockHeader` data structure to an SSZ formatted vector of bytes.
    ///
    /// # Returns
    ///
    /// A `Vec<u8>` containing the SSZ serialized `BeaconBlockHeader` data structure.
    pub fn to_ssz_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(BEACON_BLOCK_HEADER_BYTES_LEN);

        bytes.extend(&self.slot.to_le_bytes());
        bytes.extend(&self.proposer_index.to_le_bytes());
        bytes.extend(&self.parent_root);
        bytes.extend(&self.state_root);
        bytes.extend(&self.body_root);

        bytes
    }

    /// Deserialize a `BeaconBlockHeader` data structure from SSZ formatted bytes.
    ///
    /// # Arguments
    ///
    /// * `bytes` - The SSZ formatted bytes to deserialize the `BeaconBlockHeader` data structure from.
    ///
    /// # Returns
    ///
    /// A `Result` containing the deserialized `BeaconBlockHeader` data structure or a `TypesError`.
    ///
    /// # Errors
    ///
    /// Returns a `TypesError` if the length of `bytes` is not equal to [`BEACON_BLOCK_HEADER_BYTES_LEN`].
    pub fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        check_length("BeaconBlockHeader", bytes, BEACON_BLOCK_HEADER_BYTES_LEN)?;

        let cursor = 0;
        let (cursor, slot) = extract_u64("BeaconBlockHeader", bytes, cursor)?;
        let (cursor, proposer_index) = extract_u64("BeaconBlockHeader", bytes, cursor)?;
        let (cursor, parent_root) =
            extract_fixed_bytes::<BYTES_32_LEN>("BeaconBlockHeader", bytes, cursor)?;
        let (cursor, state_root) =
            extract_fixed_bytes::<BYTES_32_LEN>("BeaconBlockHeader", bytes, cursor)?;
        let (_, body_root) =
            extract_fixed_bytes::<BYTES_32_LEN>("BeaconBlockHeader", bytes, cursor)?;

        Ok(Self {
            slot,
            proposer_index,
            parent_root,
            state_root,
            body_root,
        })
    }
}

impl Merkleized for BeaconBlockHeader {
    fn hash_tree_root(&self) -> HashValue {
        merkle_root(DataType::Struct(vec![
            u64_leaf(self.slot),
            u64_leaf(self.proposer_index),
            HashValue::new(self.parent_root),
            HashValue::new(self.state_root),
            HashValue::new(self.body_root),
        ]))
    }
}

/// `SignedBeaconBlockHeader` is a `BeaconBlockHeader` with the BLS signature of its proposer.
///
/// From [the CL specifications](https://github.com/ethereum/consensus-specs/blob/v1.4.0/specs/phase0/beacon-chain.md#signedbeaconblockheader).
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct SignedBeaconBlockHeader {
    message: BeaconBlockHeader,
    #[serde(with = "hex_array")]
    signature: BLSSignature,
}

impl SignedBeaconBlockHeader {
    pub const fn new(message: BeaconBlockHeader, signature: BLSSignature) -> Self {
        Self { message, signature }
    }

    /// Serialize a `SignedBeaconBlockHeader` data structure to an SSZ formatted vector of bytes.
    pub fn to_ssz_bytes(&self) -> Vec<u8> {
        let mut bytes = self.message.to_ssz_bytes();
        bytes.extend(&self.signature);

        bytes
    }

    /// Deserialize a `SignedBeaconBlockHeader` data structure from SSZ formatted bytes.
    ///
    /// # Errors
    ///
    /// Returns a `TypesError` if the length of `bytes` is not equal to
    /// [`SIGNED_BEACON_BLOCK_HEADER_BYTES_LEN`].
    pub fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        check_length(
            "SignedBeaconBlockHeader",
            bytes,
            SIGNED_BEACON_BLOCK_HEADER_BYTES_LEN,
        )?;

        let message = BeaconBlockHeader::from_ssz_bytes(&bytes[..BEACON_BLOCK_HEADER_BYTES_LEN])?;
        let (_, signature) = extract_fixed_bytes::<BLS_SIGNATURE_LEN>(
            "SignedBeaconBlockHeader",
            bytes,
            BEACON_BLOCK_HEADER_BYTES_LEN,
        )?;

        Ok(Self { message, signature })
    }
}

impl Merkleized for SignedBeaconBlockHeader {
    fn hash_tree_root(&self) -> HashValue {
        merkle_root(DataType::Struct(vec![
            self.message.hash_tree_root(),
            merkle_root(DataType::Bytes(&self.signature)),
        ]))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use test_strategy::proptest;

    fn sample_header() -> BeaconBlockHeader {
        BeaconBlockHeader::new(1, 2, [1; 32], [2; 32], [3; 32])
    }

    #[test]
    fn test_hash_tree_root() {
        assert_eq!(
            sample_header().hash_tree_root().to_hex(),
            "0xbb3917003756216bccee4f87d53d4e52b948b8190b14a552cb1e78fcede06dd5"
        );
        assert_eq!(
            BeaconBlockHeader::default().hash_tree_root().to_hex(),
            "0xc78009fdf07fc56a11f122370658a353aaa542ed63e44c4bc15ff4cd105ab33c"
        );

        let signed = SignedBeaconBlockHeader::new(sample_header(), [7; BLS_SIGNATURE_LEN]);
        assert_eq!(
            signed.hash_tree_root().to_hex(),
            "0x4d693ab894773efc927027d636d2b728a69e5072b4950bf2d5e81a154bc82aeb"
        );
    }

    #[test]
    fn test_json_serde() {
        let json = serde_json::json!({
            "message": {
                "slot": "1",
                "proposer_index": "2",
                "parent_root": format!("0x{}", "01".repeat(32)),
                "state_root": format!("0x{}", "02".repeat(32)),
                "body_root": format!("0x{}", "03".repeat(32)),
            },
            "signature": format!("0x{}", "07".repeat(96)),
        });

        let signed: SignedBeaconBlockHeader = serde_json::from_value(json.clone()).unwrap();

        assert_eq!(signed.message(), &sample_header());
        assert_eq!(serde_json::to_value(&signed).unwrap(), json);
    }

    #[proptest]
    fn test_ssz_serde(
        slot: u64,
        proposer_index: u64,
        parent_root: [u8; 32],
        state_root: [u8; 32],
        body_root: [u8; 32],
        #[strategy(proptest::collection::vec(any::<u8>(), BLS_SIGNATURE_LEN))] signature: Vec<u8>,
    ) {
        let header = BeaconBlockHeader::new(slot, proposer_index, parent_root, state_root, body_root);
        let signed = SignedBeaconBlockHeader::new(header.clone(), signature.try_into().unwrap());

        let bytes = header.to_ssz_bytes();
        prop_assert_eq!(bytes.len(), BEACON_BLOCK_HEADER_BYTES_LEN);
        prop_assert_eq!(BeaconBlockHeader::from_ssz_bytes(&bytes).unwrap(), header);

        let bytes = signed.to_ssz_bytes();
        prop_assert_eq!(bytes.len(), SIGNED_BEACON_BLOCK_HEADER_BYTES_LEN);
        prop_assert_eq!(SignedBeaconBlockHeader::from_ssz_bytes(&bytes).unwrap(), signed);
    }

    #[proptest]
    fn test_ssz_rejects_wrong_length(
        #[strategy(proptest::collection::vec(any::<u8>(), 0..512))] bytes: Vec<u8>,
    ) {
        prop_assume!(bytes.len() != BEACON_BLOCK_HEADER_BYTES_LEN);
        prop_assume!(bytes.len() != SIGNED_BEACON_BLOCK_HEADER_BYTES_LEN);

        let is_invalid_length = matches!(
            BeaconBlockHeader::from_ssz_bytes(&bytes),
            Err(TypesError::InvalidLength { .. })
        );
        prop_assert!(is_invalid_length);
        prop_assert!(SignedBeaconBlockHeader::from_ssz_bytes(&bytes).is_err());
    }
}
