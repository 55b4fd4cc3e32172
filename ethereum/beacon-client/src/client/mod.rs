// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Client module
//!
//! This module contains the clients used to reach Beacon Nodes. It is the entrypoint for any remote
//! call.
//!
//! ## Sub-modules
//!
//! - `beacon`: The Beacon Client sends requests to a single Beacon Node and resolves the responses
//!   into envelopes.
//! - `endpoint`: The configuration of a single Beacon Node and the capabilities it serves.
//! - `envelope`: The normalized outcome of a call, with its content type and consensus version.
//! - `multi`: The Multi Client dispatches operations across several Beacon Nodes.
//! - `provider`: The `Provider` trait implemented by both clients and the typed `BeaconApi`.
//! - `selection`: The policies combining the answers of several Beacon Nodes.

pub mod beacon;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod multi;
pub mod provider;
pub mod selection;
pub mod utils;
