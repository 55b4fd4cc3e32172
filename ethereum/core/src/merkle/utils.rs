// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

use crate::crypto::hash::{sha2_hash_concat, HashValue};
use crate::types::BYTES_32_LEN;

/// The type of data that can be used to compute a Merkle root.
pub enum DataType<'a> {
    /// Fixed-size byte vector, split in 32 bytes chunks (the last one zero padded).
    Bytes(&'a [u8]),
    /// Hash tree roots of the fields of a container.
    Struct(Vec<HashValue>),
    /// Hash tree roots of the elements of a fixed-size vector.
    Vector(Vec<HashValue>),
}

/// Computes the Merkle root of the given data.
///
/// # Arguments
///
/// * `data_type` - The type of data to compute the Merkle root of.
///
/// # Returns
///
/// The Merkle root of the given data.
pub fn merkle_root(data_type: DataType) -> HashValue {
    match data_type {
        DataType::Bytes(bytes) => calculate_root(pack_bytes(bytes)),
        DataType::Struct(leaves) | DataType::Vector(leaves) => calculate_root(leaves),
    }
}

/// Returns the leaf representing a `u64` in an SSZ Merkle tree: its little-endian bytes, zero padded
/// to 32 bytes.
pub fn u64_leaf(value: u64) -> HashValue {
    let mut leaf = [0; BYTES_32_LEN];
    leaf[..8].copy_from_slice(&value.to_le_bytes());
    HashValue::new(leaf)
}

/// Split bytes in 32 bytes chunks, zero padding the last one.
fn pack_bytes(bytes: &[u8]) -> Vec<HashValue> {
    if bytes.is_empty() {
        return vec![HashValue::default()];
    }

    bytes
        .chunks(BYTES_32_LEN)
        .map(|chunk| {
            let mut leaf = [0; BYTES_32_LEN];
            leaf[..chunk.len()].copy_from_slice(chunk);
            HashValue::new(leaf)
        })
        .collect()
}

/// Computes the root of a Merkle tree given a list of leaves.
///
/// # Arguments
///
/// * `leaves` - The leaves of the Merkle tree.
///
/// # Returns
///
/// The root of the Merkle tree.
fn calculate_root(mut leaves: Vec<HashValue>) -> HashValue {
    if leaves.is_empty() {
        return HashValue::default();
    }

    let num_leaves = leaves.len().next_power_of_two();

    // Pad the leaves with empty leaves so that the tree is balanced
    leaves.resize(num_leaves, HashValue::default());

    while leaves.len() > 1 {
        leaves = leaves
            .chunks(2)
            .map(|pair| sha2_hash_concat(&pair[0], &pair[1]))
            .collect();
    }

    leaves[0]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_zero_struct_root() {
        // Root of eight zero leaves, third level of the SSZ zero hashes.
        let expected = "0xc78009fdf07fc56a11f122370658a353aaa542ed63e44c4bc15ff4cd105ab33c";

        let root = merkle_root(DataType::Struct(vec![HashValue::default(); 5]));

        assert_eq!(root.to_hex(), expected);
    }

    #[test]
    fn test_single_chunk_is_its_own_root() {
        let bytes = [7u8; BYTES_32_LEN];

        assert_eq!(merkle_root(DataType::Bytes(&bytes)), HashValue::new(bytes));
    }

    #[test]
    fn test_short_bytes_are_zero_padded() {
        let root = merkle_root(DataType::Bytes(&5u64.to_le_bytes()));

        assert_eq!(root, u64_leaf(5));
    }
}
