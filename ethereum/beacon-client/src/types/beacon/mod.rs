// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Beacon module
//!
//! This module contains the data structures served by the `/eth/*/beacon` and `/eth/*/debug`
//! endpoints of a Beacon Node.
//!
//! ## Sub-modules
//!
//! - `blob`: This sub-module contains the versioned list of blob sidecars of a block.
//! - `state`: This sub-module contains the versioned beacon state, kept in its wire encoding.
//!
//! For more detailed information, users should refer to the specific documentation for each sub-module.

use ethereum_beacon_core::types::block::SignedBeaconBlockHeader;
use ethereum_beacon_core::types::checkpoint::Checkpoint;
use ethereum_beacon_core::types::serde_utils::{hex_array, quoted_u64};
use ethereum_beacon_core::types::Bytes32;
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

pub mod blob;
pub mod state;

/// Length in bytes of a fork version.
pub const FORK_VERSION_LEN: usize = 4;

/// Genesis parameters of the chain followed by a Beacon Node.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters, Serialize, Deserialize)]
pub struct Genesis {
    #[getset(get_copy = "pub")]
    #[serde(with = "quoted_u64")]
    genesis_time: u64,
    #[getset(get = "pub")]
    #[serde(with = "hex_array")]
    genesis_validators_root: Bytes32,
    #[getset(get = "pub")]
    #[serde(with = "hex_array")]
    genesis_fork_version: [u8; FORK_VERSION_LEN],
}

impl Genesis {
    pub const fn new(
        genesis_time: u64,
        genesis_validators_root: Bytes32,
        genesis_fork_version: [u8; FORK_VERSION_LEN],
    ) -> Self {
        Self {
            genesis_time,
            genesis_validators_root,
            genesis_fork_version,
        }
    }
}

/// Root of a block or a state.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct RootResponse {
    #[serde(with = "hex_array")]
    root: Bytes32,
}

impl RootResponse {
    pub const fn new(root: Bytes32) -> Self {
        Self { root }
    }
}

/// Header of a block along with its root.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters, Serialize, Deserialize)]
pub struct BlockHeaderResponse {
    #[getset(get = "pub")]
    #[serde(with = "hex_array")]
    root: Bytes32,
    /// Whether the block is part of the canonical chain of the node.
    #[getset(get_copy = "pub")]
    canonical: bool,
    #[getset(get = "pub")]
    header: SignedBeaconBlockHeader,
}

impl BlockHeaderResponse {
    pub const fn new(root: Bytes32, canonical: bool, header: SignedBeaconBlockHeader) -> Self {
        Self {
            root,
            canonical,
            header,
        }
    }
}

/// Finality checkpoints recorded in a state.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct FinalityCheckpoints {
    previous_justified: Checkpoint,
    current_justified: Checkpoint,
    finalized: Checkpoint,
}

impl FinalityCheckpoints {
    pub const fn new(
        previous_justified: Checkpoint,
        current_justified: Checkpoint,
        finalized: Checkpoint,
    ) -> Self {
        Self {
            previous_justified,
            current_justified,
            finalized,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ethereum_beacon_core::types::block::BeaconBlockHeader;

    #[test]
    fn test_genesis_json() {
        let json = serde_json::json!({
            "genesis_time": "1606824023",
            "genesis_validators_root": "0x4b363db94e286120d76eb905340fdd4e54bfe9f06bf33ff6cf5ad27f511bfe95",
            "genesis_fork_version": "0x00000000"
        });

        let genesis: Genesis = serde_json::from_value(json).unwrap();

        assert_eq!(genesis.genesis_time(), 1_606_824_023);
        assert_eq!(genesis.genesis_validators_root()[0], 0x4b);
        assert_eq!(genesis.genesis_fork_version(), &[0; FORK_VERSION_LEN]);
    }

    #[test]
    fn test_block_header_json() {
        let json = serde_json::json!({
            "root": format!("0x{}", "aa".repeat(32)),
            "canonical": true,
            "header": {
                "message": {
                    "slot": "10",
                    "proposer_index": "3",
                    "parent_root": format!("0x{}", "01".repeat(32)),
                    "state_root": format!("0x{}", "02".repeat(32)),
                    "body_root": format!("0x{}", "03".repeat(32)),
                },
                "signature": format!("0x{}", "00".repeat(96)),
            }
        });

        let response: BlockHeaderResponse = serde_json::from_value(json).unwrap();

        assert!(response.canonical());
        assert_eq!(response.root(), &[0xaa; 32]);
        assert_eq!(
            response.header().message(),
            &BeaconBlockHeader::new(10, 3, [1; 32], [2; 32], [3; 32])
        );
    }

    #[test]
    fn test_finality_checkpoints_json() {
        let checkpoint = |epoch: u64, byte: &str| {
            serde_json::json!({"epoch": epoch.to_string(), "root": format!("0x{}", byte.repeat(32))})
        };
        let json = serde_json::json!({
            "previous_justified": checkpoint(9, "01"),
            "current_justified": checkpoint(10, "02"),
            "finalized": checkpoint(8, "03"),
        });

        let checkpoints: FinalityCheckpoints = serde_json::from_value(json).unwrap();

        assert_eq!(checkpoints.finalized(), &Checkpoint::new(8, [3; 32]));
        assert_eq!(checkpoints.current_justified().epoch(), 10);
    }
}
