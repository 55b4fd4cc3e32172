// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Ethereum Beacon Client
//!
//! This crate provides a client for the HTTP API of Ethereum consensus layer nodes. It fetches
//! typed consensus data from one or several independently operated Beacon Nodes, handling both the
//! SSZ and JSON encodings and the consensus version attached to versioned payloads.
//!
//! ## Binaries
//!
//! - `client`: A command line client printing the state of the chain as seen by a set of Beacon
//!   Nodes.
//!
//! ## Library
//!
//! The library has the following modules:
//! - [`api`]: The catalog of typed requests.
//! - [`client`]: The single node and multi node clients, and the policies used to combine answers.
//! - [`types`]: Types of the Beacon Node API responses.
//!
//! For more detailed information, users should refer to the specific documentation for each
//! sub-module.

pub mod api;
pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;
