// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Types Module
//!
//! This module provides the consensus data structures served by a Beacon Node. Types defined in
//! this module implement custom `to_ssz_bytes` and `from_ssz_bytes` methods to handle their
//! serialization and deserialization, along with their JSON representation through `serde`.
//!
//! ## Sub-modules
//!
//! - `block`: This sub-module contains the block header structures.
//! - `blob`: This sub-module contains the blob sidecar structures introduced by Deneb.
//! - `checkpoint`: This sub-module contains the `Checkpoint` structure.
//! - `serde_utils`: This sub-module contains the helpers for the JSON encoding of the Beacon API.
//! - `version`: This sub-module contains the consensus version tag of versioned payloads.
//!
//! For more detailed information, users should refer to the specific
//! documentation for each sub-module.

pub mod blob;
pub mod block;
pub mod checkpoint;
pub mod error;
pub mod serde_utils;
pub mod utils;
pub mod version;

/// Length of a bytes32 array.
pub const BYTES_32_LEN: usize = 32;

/// Length of u64 in bytes.
pub const U64_LEN: usize = (u64::BITS / 8) as usize;

/// Length in bytes of a BLS signature.
pub const BLS_SIGNATURE_LEN: usize = 96;

/// A 32-byte array.
pub type Bytes32 = [u8; BYTES_32_LEN];

/// A compressed BLS signature.
pub type BLSSignature = [u8; BLS_SIGNATURE_LEN];
