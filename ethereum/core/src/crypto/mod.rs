// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Cryptographic Utilities
//!
//! This module contains the hashing primitives used to compute SSZ hash tree roots.
//!
//! ## Sub-modules
//!
//! - `hash`: This sub-module contains the `HashValue` structure and the SHA-256 helpers.

pub mod hash;
