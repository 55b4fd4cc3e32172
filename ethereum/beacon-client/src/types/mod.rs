// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Types module
//!
//! This module contains the response types of the Beacon Node API that only exist on the wire. The
//! consensus structures they wrap are defined in [`ethereum_beacon_core::types`].
//!
//! ## Sub-modules
//!
//! - `beacon`: This sub-module contains the responses of the `/eth/*/beacon` and `/eth/*/debug`
//!   endpoints.
//! - `node`: This sub-module contains the responses of the `/eth/v1/node` endpoints.
//! - `validator`: This sub-module contains the responses of the `/eth/v1/validator` endpoints.
//!
//! For more detailed information, users should refer to the specific documentation for each sub-module.

use serde::{Deserialize, Serialize};

pub mod beacon;
pub mod node;
pub mod validator;

/// The `{"data": ...}` wrapper of JSON responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}
