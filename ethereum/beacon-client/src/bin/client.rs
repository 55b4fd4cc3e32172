// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use ethereum_beacon_client::api::beacon::{BeaconBlockHeaderRequest, BeaconStateRootRequest};
use ethereum_beacon_client::client::multi::{DeadlinePolicy, MultiClient, MultiClientConfig};
use ethereum_beacon_client::client::provider::BeaconApi;
use ethereum_beacon_client::client::selection::{FirstSuccess, Majority};
use ethereum_beacon_core::types::serde_utils::encode_hex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// The CLI for the beacon client.
#[derive(Parser)]
struct Cli {
    /// The address of a beacon node API. Repeat the flag to query several nodes at once.
    #[arg(short, long = "beacon-node-address", required = true)]
    beacon_node_addresses: Vec<String>,

    /// Deadline of each operation, in seconds.
    #[arg(short, long, default_value_t = 120)]
    timeout_secs: u64,

    /// The state to inspect.
    #[arg(long, default_value = "head")]
    state_id: String,

    /// The block to inspect.
    #[arg(long, default_value = "head")]
    block_id: String,

    /// Only accept answers given by a majority of the nodes.
    #[arg(long)]
    majority: bool,

    /// Decide over the nodes that answered when the deadline elapses.
    #[arg(long)]
    best_effort: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        beacon_node_addresses,
        timeout_secs,
        state_id,
        block_id,
        majority,
        best_effort,
    } = Cli::parse();

    // Initialize the logger.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let deadline_policy = if best_effort {
        DeadlinePolicy::BestEffort
    } else {
        DeadlinePolicy::Fail
    };
    let config = MultiClientConfig::default()
        .with_timeout(Duration::from_secs(timeout_secs))
        .with_deadline_policy(deadline_policy);
    let client = MultiClient::from_addresses(&beacon_node_addresses, config)
        .context("Failed to build client")?;

    info!(nodes = beacon_node_addresses.len(), "Fetching chain data...");

    let genesis = client
        .genesis()
        .await
        .context("Failed to fetch genesis")?
        .ok_or_else(|| anyhow!("Genesis not found"))?;
    println!("Genesis time: {}", genesis.genesis_time());
    println!(
        "Genesis validators root: {}",
        encode_hex(genesis.genesis_validators_root())
    );

    // Roots and headers must match across nodes when a majority is requested.
    let state_root_request = BeaconStateRootRequest::new(&state_id);
    let state_root = if majority {
        client.call_with(state_root_request, &Majority).await
    } else {
        client.call_with(state_root_request, &FirstSuccess).await
    }
    .context("Failed to fetch state root")?;
    match state_root {
        Some(root) => println!("State root at {state_id}: {}", encode_hex(&root)),
        None => println!("State {state_id} not found"),
    }

    match client
        .finality_checkpoints(&state_id)
        .await
        .context("Failed to fetch finality checkpoints")?
    {
        Some(checkpoints) => {
            let finalized = checkpoints.finalized();
            println!(
                "Finalized checkpoint: epoch {} root {}",
                finalized.epoch(),
                encode_hex(finalized.root())
            );
        }
        None => println!("No finality checkpoints for state {state_id}"),
    }

    let header_request = BeaconBlockHeaderRequest::new(&block_id);
    let header = if majority {
        client.call_with(header_request, &Majority).await
    } else {
        client.call_with(header_request, &FirstSuccess).await
    }
    .context("Failed to fetch block header")?;
    match header {
        Some(response) => {
            let message = response.header().message();
            println!(
                "Block {block_id}: slot {} root {} canonical {}",
                message.slot(),
                encode_hex(response.root()),
                response.canonical()
            );
        }
        None => println!("Block {block_id} not found"),
    }

    Ok(())
}
