// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Ethereum Beacon Core
//!
//! This crate provides the core types and utilities leveraged when dealing with data served by a
//! Beacon Node. It is divided into several sub-modules, each with its own specific functionality.
//!
//! ## Sub-modules
//!
//! - `crypto`: This sub-module contains the hashing utilities.
//! - `merkle`: This sub-module contains the SSZ Merkleization utilities and the `Merkleized` trait.
//! - `types`: This sub-module contains the consensus data structures, their SSZ codec and the
//!   consensus version tag.
//!
//! For more detailed information, users should refer to the specific documentation for each sub-module.

pub mod crypto;
pub mod merkle;
pub mod types;
