// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

use crate::crypto::hash::HashValue;
use crate::merkle::utils::{merkle_root, u64_leaf, DataType};
use crate::merkle::Merkleized;
use crate::types::error::TypesError;
use crate::types::serde_utils::{hex_array, quoted_u64};
use crate::types::utils::{check_length, extract_fixed_bytes, extract_u64};
use crate::types::{Bytes32, BYTES_32_LEN, U64_LEN};
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

/// Length in bytes of a serialized `Checkpoint`.
pub const CHECKPOINT_BYTES_LEN: usize = U64_LEN + BYTES_32_LEN;

/// `Checkpoint` is an epoch boundary block, identified by its epoch and root.
///
/// From [the CL specifications](https://github.com/ethereum/consensus-specs/blob/v1.4.0/specs/phase0/beacon-chain.md#checkpoint).
#[derive(Debug, Default, Clone, PartialEq, Eq, Getters, CopyGetters, Serialize, Deserialize)]
pub struct Checkpoint {
    #[getset(get_copy = "pub")]
    #[serde(with = "quoted_u64")]
    epoch: u64,
    #[getset(get = "pub")]
    #[serde(with = "hex_array")]
    root: Bytes32,
}

impl Checkpoint {
    pub const fn new(epoch: u64, root: Bytes32) -> Self {
        Self { epoch, root }
    }

    /// Serialize a `Checkpoint` data structure to an SSZ formatted vector of bytes.
    pub fn to_ssz_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(CHECKPOINT_BYTES_LEN);
        bytes.extend(&self.epoch.to_le_bytes());
        bytes.extend(&self.root);

        bytes
    }

    /// Deserialize a `Checkpoint` data structure from SSZ formatted bytes.
    ///
    /// # Errors
    ///
    /// Returns a `TypesError` if the length of `bytes` is not equal to [`CHECKPOINT_BYTES_LEN`].
    pub fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        check_length("Checkpoint", bytes, CHECKPOINT_BYTES_LEN)?;

        let (cursor, epoch) = extract_u64("Checkpoint", bytes, 0)?;
        let (_, root) = extract_fixed_bytes::<BYTES_32_LEN>("Checkpoint", bytes, cursor)?;

        Ok(Self { epoch, root })
    }
}

impl Merkleized for Checkpoint {
    fn hash_tree_root(&self) -> HashValue {
        merkle_root(DataType::Struct(vec![
            u64_leaf(self.epoch),
            HashValue::new(self.root),
        ]))
    }
}
