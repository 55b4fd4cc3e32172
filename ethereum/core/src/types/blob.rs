// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Blob module
//!
//! This module contains the data structures related to the blobs introduced by the Deneb upgrade.
//! A `BlobSidecar` carries one blob of a block along with its KZG commitment, the proof of the
//! commitment and a Merkle proof of the commitment inclusion in the block body. The layout is shared
//! by the Deneb and Electra forks.

use crate::crypto::hash::HashValue;
use crate::merkle::utils::{merkle_root, u64_leaf, DataType};
use crate::merkle::Merkleized;
use crate::types::block::{SignedBeaconBlockHeader, SIGNED_BEACON_BLOCK_HEADER_BYTES_LEN};
use crate::types::error::TypesError;
use crate::types::serde_utils::{decode_hex, encode_hex, hex_array, hex_array_vector, quoted_u64};
use crate::types::utils::{check_length, extract_fixed_bytes, extract_u64};
use crate::types::{Bytes32, BYTES_32_LEN, U64_LEN};
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Number of bytes in a blob.
pub const BYTES_PER_BLOB: usize = 131_072;

/// Length in bytes of a KZG commitment or proof.
pub const KZG_BYTES_LEN: usize = 48;

/// Depth of the Merkle proof of a KZG commitment inclusion in a block body.
pub const KZG_COMMITMENT_INCLUSION_PROOF_DEPTH: usize = 17;

/// Length in bytes of a serialized `BlobSidecar`.
pub const BLOB_SIDECAR_BYTES_LEN: usize = U64_LEN
    + BYTES_PER_BLOB
    + KZG_BYTES_LEN * 2
    + SIGNED_BEACON_BLOCK_HEADER_BYTES_LEN
    + KZG_COMMITMENT_INCLUSION_PROOF_DEPTH * BYTES_32_LEN;

/// A KZG commitment or proof.
pub type KzgBytes = [u8; KZG_BYTES_LEN];

/// Merkle proof of a KZG commitment inclusion in a block body.
pub type KzgCommitmentInclusionProof = [Bytes32; KZG_COMMITMENT_INCLUSION_PROOF_DEPTH];

/// Raw blob data. Boxed as it is too large to be moved around on the stack.
#[derive(Clone, PartialEq, Eq)]
pub struct Blob(Box<[u8; BYTES_PER_BLOB]>);

impl Blob {
    /// Create a blob from a slice of exactly [`BYTES_PER_BLOB`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TypesError> {
        check_length("Blob", bytes, BYTES_PER_BLOB)?;

        let inner: Box<[u8; BYTES_PER_BLOB]> = bytes
            .to_vec()
            .into_boxed_slice()
            .try_into()
            .map_err(|_| TypesError::InvalidLength {
                structure: "Blob".into(),
                expected: BYTES_PER_BLOB,
                actual: bytes.len(),
            })?;

        Ok(Self(inner))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blob(0x{}..)", hex::encode(&self.0[..8]))
    }
}

impl Serialize for Blob {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_hex(self.as_bytes()))
    }
}

impl<'de> Deserialize<'de> for Blob {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        let bytes = decode_hex(&value).map_err(serde::de::Error::custom)?;

        Blob::from_slice(&bytes).map_err(serde::de::Error::custom)
    }
}

/// `BlobSidecar` holds a blob and the data needed to verify it against its block.
///
/// From [the Deneb specifications](https://github.com/ethereum/consensus-specs/blob/v1.4.0/specs/deneb/p2p-interface.md#blobsidecar).
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters, Serialize, Deserialize)]
pub struct BlobSidecar {
    #[getset(get_copy = "pub")]
    #[serde(with = "quoted_u64")]
    index: u64,
    #[getset(get = "pub")]
    blob: Blob,
    #[getset(get = "pub")]
    #[serde(with = "hex_array")]
    kzg_commitment: KzgBytes,
    #[getset(get = "pub")]
    #[serde(with = "hex_array")]
    kzg_proof: KzgBytes,
    #[getset(get = "pub")]
    signed_block_header: SignedBeaconBlockHeader,
    #[getset(get = "pub")]
    #[serde(with = "hex_array_vector")]
    kzg_commitment_inclusion_proof: KzgCommitmentInclusionProof,
}

impl BlobSidecar {
    pub const fn new(
        index: u64,
        blob: Blob,
        kzg_commitment: KzgBytes,
        kzg_proof: KzgBytes,
        signed_block_header: SignedBeaconBlockHeader,
        kzg_commitment_inclusion_proof: KzgCommitmentInclusionProof,
    ) -> Self {
        Self {
            index,
            blob,
            kzg_commitment,
            kzg_proof,
            signed_block_header,
            kzg_commitment_inclusion_proof,
        }
    }

    /// Serialize a `BlobSidecar` data structure to an SSZ formatted vector of bytes.
    ///
    /// # Returns
    ///
    /// A `Vec<u8>` containing the SSZ serialized `BlobSidecar` data structure.
    pub fn to_ssz_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(BLOB_SIDECAR_BYTES_LEN);

        bytes.extend(&self.index.to_le_bytes());
        bytes.extend_from_slice(self.blob.as_bytes());
        bytes.extend(&self.kzg_commitment);
        bytes.extend(&self.kzg_proof);
        bytes.extend(self.signed_block_header.to_ssz_bytes());
        for node in &self.kzg_commitment_inclusion_proof {
            bytes.extend(node);
        }

        bytes
    }

    /// Deserialize a `BlobSidecar` data structure from SSZ formatted bytes.
    ///
    /// # Arguments
    ///
    /// * `bytes` - The SSZ formatted bytes to deserialize the `BlobSidecar` data structure from.
    ///
    /// # Returns
    ///
    /// A `Result` containing the deserialized `BlobSidecar` data structure or a `TypesError`.
    ///
    /// # Errors
    ///
    /// Returns a `TypesError` if the length of `bytes` is not equal to [`BLOB_SIDECAR_BYTES_LEN`].
    pub fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        check_length("BlobSidecar", bytes, BLOB_SIDECAR_BYTES_LEN)?;

        let (cursor, index) = extract_u64("BlobSidecar", bytes, 0)?;

        let blob = Blob::from_slice(&bytes[cursor..cursor + BYTES_PER_BLOB])?;
        let cursor = cursor + BYTES_PER_BLOB;

        let (cursor, kzg_commitment) =
            extract_fixed_bytes::<KZG_BYTES_LEN>("BlobSidecar", bytes, cursor)?;
        let (cursor, kzg_proof) = extract_fixed_bytes::<KZG_BYTES_LEN>("BlobSidecar", bytes, cursor)?;

        let signed_block_header = SignedBeaconBlockHeader::from_ssz_bytes(
            &bytes[cursor..cursor + SIGNED_BEACON_BLOCK_HEADER_BYTES_LEN],
        )?;
        let mut cursor = cursor + SIGNED_BEACON_BLOCK_HEADER_BYTES_LEN;

        let mut kzg_commitment_inclusion_proof =
            [[0; BYTES_32_LEN]; KZG_COMMITMENT_INCLUSION_PROOF_DEPTH];
        for node in kzg_commitment_inclusion_proof.iter_mut() {
            let (next, value) = extract_fixed_bytes::<BYTES_32_LEN>("BlobSidecar", bytes, cursor)?;
            *node = value;
            cursor = next;
        }

        Ok(Self {
            index,
            blob,
            kzg_commitment,
            kzg_proof,
            signed_block_header,
            kzg_commitment_inclusion_proof,
        })
    }

    /// Serialize a list of `BlobSidecar` as the SSZ list served by the Beacon Node. Elements are of
    /// fixed size and are concatenated without offsets.
    pub fn list_to_ssz_bytes(sidecars: &[BlobSidecar]) -> Vec<u8> {
        sidecars
            .iter()
            .flat_map(BlobSidecar::to_ssz_bytes)
            .collect()
    }

    /// Deserialize an SSZ list of `BlobSidecar`.
    ///
    /// # Errors
    ///
    /// Returns a `TypesError` if the length of `bytes` is not a multiple of [`BLOB_SIDECAR_BYTES_LEN`].
    pub fn list_from_ssz_bytes(bytes: &[u8]) -> Result<Vec<Self>, TypesError> {
        if bytes.len() % BLOB_SIDECAR_BYTES_LEN != 0 {
            return Err(TypesError::InvalidLength {
                structure: "BlobSidecarList".into(),
                expected: (bytes.len() / BLOB_SIDECAR_BYTES_LEN + 1) * BLOB_SIDECAR_BYTES_LEN,
                actual: bytes.len(),
            });
        }

        bytes
            .chunks(BLOB_SIDECAR_BYTES_LEN)
            .map(BlobSidecar::from_ssz_bytes)
            .collect()
    }
}

impl Merkleized for BlobSidecar {
    fn hash_tree_root(&self) -> HashValue {
        let inclusion_proof_leaves = self
            .kzg_commitment_inclusion_proof
            .iter()
            .copied()
            .map(HashValue::new)
            .collect();

        merkle_root(DataType::Struct(vec![
            u64_leaf(self.index),
            merkle_root(DataType::Bytes(self.blob.as_bytes())),
            merkle_root(DataType::Bytes(&self.kzg_commitment)),
            merkle_root(DataType::Bytes(&self.kzg_proof)),
            self.signed_block_header.hash_tree_root(),
            merkle_root(DataType::Vector(inclusion_proof_leaves)),
        ]))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::block::BeaconBlockHeader;
    use crate::types::BLS_SIGNATURE_LEN;

    fn sample_sidecar(index: u64) -> BlobSidecar {
        let blob_bytes = (0..BYTES_PER_BLOB).map(|i| i as u8).collect::<Vec<_>>();
        let mut inclusion_proof = [[0; BYTES_32_LEN]; KZG_COMMITMENT_INCLUSION_PROOF_DEPTH];
        for (i, node) in inclusion_proof.iter_mut().enumerate() {
            *node = [i as u8; BYTES_32_LEN];
        }

        BlobSidecar::new(
            index,
            Blob::from_slice(&blob_bytes).unwrap(),
            [4; KZG_BYTES_LEN],
            [5; KZG_BYTES_LEN],
            SignedBeaconBlockHeader::new(
                BeaconBlockHeader::new(1, 2, [1; 32], [2; 32], [3; 32]),
                [7; BLS_SIGNATURE_LEN],
            ),
            inclusion_proof,
        )
    }

    #[test]
    fn test_ssz_serde() {
        let sidecar = sample_sidecar(3);

        let bytes = sidecar.to_ssz_bytes();

        assert_eq!(bytes.len(), BLOB_SIDECAR_BYTES_LEN);
        assert_eq!(BlobSidecar::from_ssz_bytes(&bytes).unwrap(), sidecar);
        assert!(BlobSidecar::from_ssz_bytes(&bytes[1..]).is_err());
    }

    #[test]
    fn test_ssz_list_serde() {
        let sidecars = vec![sample_sidecar(0), sample_sidecar(1)];

        let bytes = BlobSidecar::list_to_ssz_bytes(&sidecars);

        assert_eq!(bytes.len(), 2 * BLOB_SIDECAR_BYTES_LEN);
        assert_eq!(BlobSidecar::list_from_ssz_bytes(&bytes).unwrap(), sidecars);
        assert!(BlobSidecar::list_from_ssz_bytes(&[]).unwrap().is_empty());
        assert!(matches!(
            BlobSidecar::list_from_ssz_bytes(&bytes[..bytes.len() - 1]),
            Err(TypesError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_hash_tree_root() {
        assert_eq!(
            sample_sidecar(3).hash_tree_root().to_hex(),
            "0xd9483dd254d8f777b37d149b26425aa704eafe4d2b5373c18574c16fca4d373d"
        );
    }

    #[test]
    fn test_json_serde() {
        let sidecar = sample_sidecar(3);

        let json = serde_json::to_value(&sidecar).unwrap();

        assert_eq!(json["index"], "3");
        assert_eq!(
            json["kzg_commitment_inclusion_proof"]
                .as_array()
                .unwrap()
                .len(),
            KZG_COMMITMENT_INCLUSION_PROOF_DEPTH
        );
        assert_eq!(
            serde_json::from_value::<BlobSidecar>(json).unwrap(),
            sidecar
        );
    }

    #[test]
    fn test_blob_rejects_wrong_length() {
        assert!(Blob::from_slice(&[0; BYTES_PER_BLOB - 1]).is_err());
        assert!(serde_json::from_str::<Blob>("\"0x00\"").is_err());
    }
}
