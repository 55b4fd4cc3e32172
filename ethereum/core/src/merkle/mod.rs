// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Merkle Tree
//!
//! This module provides the utilities to compute SSZ hash tree roots. Every leaf of an SSZ Merkle
//! tree is a 32 bytes chunk and each internal node is the SHA-256 hash of its two children. The root
//! of the tree is the value committed to by block headers and signatures.
//!
//! ## Sub-modules
//!
//! - `utils`: This sub-module contains the utilities to chunk data and compute Merkle roots.

use crate::crypto::hash::HashValue;

pub mod utils;

/// The `Merkleized` trait is implemented by types that can be hashed and represented as a single
/// Merkle Tree root.
pub trait Merkleized {
    /// Hash the object following [SSZ standard](https://www.ssz.dev/show) and return the root of the
    /// Merkle Tree.
    ///
    /// # Returns
    ///
    /// The root of the Merkle Tree.
    fn hash_tree_root(&self) -> HashValue;
}
