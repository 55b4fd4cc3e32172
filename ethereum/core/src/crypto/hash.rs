// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

use crate::types::Bytes32;
use getset::Getters;
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of hash digests in bytes.
pub const HASH_LEN: usize = 32;

/// A structure representing a hash value.
#[derive(Default, PartialEq, Eq, Clone, Copy, Getters, Hash)]
pub struct HashValue {
    #[getset(get = "pub")]
    hash: [u8; HASH_LEN],
}

impl HashValue {
    /// Creates a new `HashValue` from a given hash.
    ///
    /// # Arguments
    ///
    /// * `hash` - A byte array of length `HASH_LEN` representing the hash value.
    ///
    /// # Returns
    ///
    /// A new `HashValue` instance.
    pub const fn new(hash: [u8; HASH_LEN]) -> Self {
        HashValue { hash }
    }

    /// Returns the `0x` prefixed hexadecimal representation of the hash.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.hash))
    }
}

impl fmt::Debug for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashValue({})", self.to_hex())
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Bytes32> for HashValue {
    fn from(bytes: Bytes32) -> Self {
        HashValue::new(bytes)
    }
}

impl From<HashValue> for Bytes32 {
    fn from(value: HashValue) -> Self {
        value.hash
    }
}

/// Computes the SHA-256 digest of the given bytes.
pub fn sha2_hash(input: &[u8]) -> HashValue {
    HashValue::new(Sha256::digest(input).into())
}

/// Computes the SHA-256 digest of the concatenation of two hash values, as done for each inner node
/// of an SSZ Merkle tree.
///
/// # Arguments
///
/// * `left` - The left child.
/// * `right` - The right child.
///
/// # Returns
///
/// The hash of the parent node.
pub fn sha2_hash_concat(left: &HashValue, right: &HashValue) -> HashValue {
    let mut hasher = Sha256::new();
    hasher.update(left.hash);
    hasher.update(right.hash);
    HashValue::new(hasher.finalize().into())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_concat_of_zero_leaves() {
        // sha256 of 64 zero bytes, the first zero hash of SSZ merkleization.
        let expected = "0xf5a5fd42d16a20302798ef6ed309979b43003d2320d9f0e8ea9831a92759fb4b";

        let hash = sha2_hash_concat(&HashValue::default(), &HashValue::default());

        assert_eq!(hash.to_hex(), expected);
        assert_eq!(sha2_hash(&[0; 64]), hash);
    }
}
