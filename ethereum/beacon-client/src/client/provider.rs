// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Provider module
//!
//! A [`Provider`] executes typed requests against one or more Beacon Nodes. [`BeaconApi`] is
//! implemented for every provider and exposes one method per request of the catalog.

use crate::api::beacon::{
    BeaconBlockHeaderRequest, BeaconBlockRootRequest, BeaconStateRequest, BeaconStateRootRequest,
    BlobSidecarsRequest, FinalityCheckpointsRequest, GenesisRequest,
};
use crate::api::node::NodeVersionRequest;
use crate::api::validator::ValidatorLivenessRequest;
use crate::api::ApiRequest;
use crate::client::endpoint::CapabilitySet;
use crate::client::error::ClientError;
use crate::types::beacon::blob::VersionedBlobSidecars;
use crate::types::beacon::state::VersionedBeaconState;
use crate::types::beacon::{BlockHeaderResponse, FinalityCheckpoints, Genesis};
use crate::types::node::NodeVersion;
use crate::types::validator::ValidatorLiveness;
use ethereum_beacon_core::types::Bytes32;
use std::future::Future;

/// Executes typed requests.
pub trait Provider: Send + Sync + 'static {
    /// Address identifying the provider in logs and errors.
    fn address(&self) -> &str;

    /// Operations the provider can serve.
    fn capabilities(&self) -> &CapabilitySet;

    /// Execute a request. Resources that do not exist resolve to `Ok(None)`.
    fn execute<R: ApiRequest>(
        &self,
        request: &R,
    ) -> impl Future<Output = Result<Option<R::Output>, ClientError>> + Send;
}

/// Typed methods of the Beacon Node API.
pub trait BeaconApi: Provider {
    fn genesis(&self) -> impl Future<Output = Result<Option<Genesis>, ClientError>> + Send {
        async move { self.execute(&GenesisRequest).await }
    }

    fn node_version(&self) -> impl Future<Output = Result<Option<NodeVersion>, ClientError>> + Send {
        async move { self.execute(&NodeVersionRequest).await }
    }

    fn beacon_block_header(
        &self,
        block_id: &str,
    ) -> impl Future<Output = Result<Option<BlockHeaderResponse>, ClientError>> + Send {
        let request = BeaconBlockHeaderRequest::new(block_id);
        async move { self.execute(&request).await }
    }

    fn beacon_block_root(
        &self,
        block_id: &str,
    ) -> impl Future<Output = Result<Option<Bytes32>, ClientError>> + Send {
        let request = BeaconBlockRootRequest::new(block_id);
        async move { self.execute(&request).await }
    }

    fn beacon_state_root(
        &self,
        state_id: &str,
    ) -> impl Future<Output = Result<Option<Bytes32>, ClientError>> + Send {
        let request = BeaconStateRootRequest::new(state_id);
        async move { self.execute(&request).await }
    }

    fn finality_checkpoints(
        &self,
        state_id: &str,
    ) -> impl Future<Output = Result<Option<FinalityCheckpoints>, ClientError>> + Send {
        let request = FinalityCheckpointsRequest::new(state_id);
        async move { self.execute(&request).await }
    }

    fn beacon_state(
        &self,
        state_id: &str,
    ) -> impl Future<Output = Result<Option<VersionedBeaconState>, ClientError>> + Send {
        let request = BeaconStateRequest::new(state_id);
        async move { self.execute(&request).await }
    }

    fn blob_sidecars(
        &self,
        block_id: &str,
        indices: Vec<u64>,
    ) -> impl Future<Output = Result<Option<VersionedBlobSidecars>, ClientError>> + Send {
        let request = BlobSidecarsRequest::new(block_id, indices);
        async move { self.execute(&request).await }
    }

    fn validator_liveness(
        &self,
        epoch: u64,
        indices: Vec<u64>,
    ) -> impl Future<Output = Result<Option<Vec<ValidatorLiveness>>, ClientError>> + Send {
        let request = ValidatorLivenessRequest::new(epoch, indices);
        async move { self.execute(&request).await }
    }
}

impl<P: Provider> BeaconApi for P {}
