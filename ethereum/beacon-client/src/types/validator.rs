// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

use ethereum_beacon_core::types::serde_utils::quoted_u64;
use getset::CopyGetters;
use serde::{Deserialize, Serialize};

/// Liveness of a validator during an epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters, Serialize, Deserialize)]
#[getset(get_copy = "pub")]
pub struct ValidatorLiveness {
    /// Registry index of the validator.
    #[serde(with = "quoted_u64")]
    index: u64,
    /// Whether the validator was seen taking part in the epoch.
    is_live: bool,
}

impl ValidatorLiveness {
    pub const fn new(index: u64, is_live: bool) -> Self {
        Self { index, is_live }
    }
}
