// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Beacon requests
//!
//! Block identifiers accepted by the Beacon Node are `head`, `genesis`, `finalized`, a slot number
//! or a `0x` prefixed block root. State identifiers additionally accept `justified` and a state
//! root.

use crate::api::{decode_json_data, required_version, ApiRequest};
use crate::client::endpoint::Capability;
use crate::client::envelope::{ContentType, Envelope, Versioning};
use crate::types::beacon::blob::VersionedBlobSidecars;
use crate::types::beacon::state::VersionedBeaconState;
use crate::types::beacon::{BlockHeaderResponse, FinalityCheckpoints, Genesis, RootResponse};
use crate::types::DataResponse;
use ethereum_beacon_core::deserialization_error;
use ethereum_beacon_core::types::blob::BlobSidecar;
use ethereum_beacon_core::types::error::TypesError;
use ethereum_beacon_core::types::Bytes32;

/// Genesis parameters of the chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenesisRequest;

impl ApiRequest for GenesisRequest {
    type Output = Genesis;

    fn capability(&self) -> Capability {
        Capability::Genesis
    }

    fn path(&self) -> String {
        String::from("/eth/v1/beacon/genesis")
    }

    fn decode(&self, envelope: &Envelope) -> Result<Self::Output, TypesError> {
        decode_json_data("Genesis", envelope)
    }
}

/// Header of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeaconBlockHeaderRequest {
    block_id: String,
}

impl BeaconBlockHeaderRequest {
    pub fn new(block_id: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
        }
    }
}

impl ApiRequest for BeaconBlockHeaderRequest {
    type Output = BlockHeaderResponse;

    fn capability(&self) -> Capability {
        Capability::BeaconBlockHeader
    }

    fn path(&self) -> String {
        format!("/eth/v1/beacon/headers/{}", self.block_id)
    }

    fn decode(&self, envelope: &Envelope) -> Result<Self::Output, TypesError> {
        decode_json_data("BlockHeaderResponse", envelope)
    }
}

/// Root of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeaconBlockRootRequest {
    block_id: String,
}

impl BeaconBlockRootRequest {
    pub fn new(block_id: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
        }
    }
}

impl ApiRequest for BeaconBlockRootRequest {
    type Output = Bytes32;

    fn capability(&self) -> Capability {
        Capability::BeaconBlockRoot
    }

    fn path(&self) -> String {
        format!("/eth/v1/beacon/blocks/{}/root", self.block_id)
    }

    fn decode(&self, envelope: &Envelope) -> Result<Self::Output, TypesError> {
        decode_json_data::<RootResponse>("BlockRoot", envelope).map(|response| *response.root())
    }
}

/// Root of a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeaconStateRootRequest {
    state_id: String,
}

impl BeaconStateRootRequest {
    pub fn new(state_id: impl Into<String>) -> Self {
        Self {
            state_id: state_id.into(),
        }
    }
}

impl ApiRequest for BeaconStateRootRequest {
    type Output = Bytes32;

    fn capability(&self) -> Capability {
        Capability::BeaconStateRoot
    }

    fn path(&self) -> String {
        format!("/eth/v1/beacon/states/{}/root", self.state_id)
    }

    fn decode(&self, envelope: &Envelope) -> Result<Self::Output, TypesError> {
        decode_json_data::<RootResponse>("StateRoot", envelope).map(|response| *response.root())
    }
}

/// Finality checkpoints recorded in a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalityCheckpointsRequest {
    state_id: String,
}

impl FinalityCheckpointsRequest {
    pub fn new(state_id: impl Into<String>) -> Self {
        Self {
            state_id: state_id.into(),
        }
    }
}

impl ApiRequest for FinalityCheckpointsRequest {
    type Output = FinalityCheckpoints;

    fn capability(&self) -> Capability {
        Capability::FinalityCheckpoints
    }

    fn path(&self) -> String {
        format!("/eth/v1/beacon/states/{}/finality_checkpoints", self.state_id)
    }

    fn decode(&self, envelope: &Envelope) -> Result<Self::Output, TypesError> {
        decode_json_data("FinalityCheckpoints", envelope)
    }
}

/// Full beacon state, served by the debug namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeaconStateRequest {
    state_id: String,
}

impl BeaconStateRequest {
    pub fn new(state_id: impl Into<String>) -> Self {
        Self {
            state_id: state_id.into(),
        }
    }
}

impl ApiRequest for BeaconStateRequest {
    type Output = VersionedBeaconState;

    fn capability(&self) -> Capability {
        Capability::BeaconState
    }

    fn path(&self) -> String {
        format!("/eth/v2/debug/beacon/states/{}", self.state_id)
    }

    fn versioning(&self) -> Versioning {
        Versioning::Required
    }

    fn decode(&self, envelope: &Envelope) -> Result<Self::Output, TypesError> {
        let version = required_version("BeaconState", envelope)?;

        match envelope.content_type() {
            Some(ContentType::Ssz) => {
                VersionedBeaconState::from_ssz(version, envelope.payload().clone())
            }
            _ => {
                let value = decode_json_data("BeaconState", envelope)?;
                VersionedBeaconState::from_json(version, value)
            }
        }
    }
}

/// Blob sidecars of a block, optionally restricted to some indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobSidecarsRequest {
    block_id: String,
    indices: Vec<u64>,
}

impl BlobSidecarsRequest {
    pub fn new(block_id: impl Into<String>, indices: Vec<u64>) -> Self {
        Self {
            block_id: block_id.into(),
            indices,
        }
    }
}

impl ApiRequest for BlobSidecarsRequest {
    type Output = VersionedBlobSidecars;

    fn capability(&self) -> Capability {
        Capability::BlobSidecars
    }

    fn path(&self) -> String {
        let path = format!("/eth/v1/beacon/blob_sidecars/{}", self.block_id);

        if self.indices.is_empty() {
            return path;
        }

        let query = self
            .indices
            .iter()
            .map(|index| format!("indices={index}"))
            .collect::<Vec<_>>()
            .join("&");

        format!("{path}?{query}")
    }

    fn versioning(&self) -> Versioning {
        Versioning::Required
    }

    fn decode(&self, envelope: &Envelope) -> Result<Self::Output, TypesError> {
        let version = required_version("BlobSidecars", envelope)?;

        // Sidecars of other forks do not share the deneb layout.
        if !VersionedBlobSidecars::is_supported(version) {
            return Err(TypesError::UnsupportedVersion {
                structure: "BlobSidecars".into(),
                version,
            });
        }

        let sidecars = match envelope.content_type() {
            Some(ContentType::Ssz) => BlobSidecar::list_from_ssz_bytes(envelope.payload())?,
            _ => serde_json::from_slice::<DataResponse<Vec<BlobSidecar>>>(envelope.payload())
                .map_err(|err| deserialization_error!("BlobSidecars", err))?
                .data,
        };

        VersionedBlobSidecars::new(version, sidecars)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::sample_blob_sidecar;
    use bytes::Bytes;
    use ethereum_beacon_core::types::version::DataVersion;

    fn json(version: Option<DataVersion>, body: serde_json::Value) -> Envelope {
        Envelope::success(
            ContentType::Json,
            version,
            Bytes::from(serde_json::to_vec(&body).unwrap()),
        )
    }

    #[test]
    fn test_paths() {
        assert_eq!(GenesisRequest.path(), "/eth/v1/beacon/genesis");
        assert_eq!(
            BeaconBlockHeaderRequest::new("head").path(),
            "/eth/v1/beacon/headers/head"
        );
        assert_eq!(
            BeaconBlockRootRequest::new("finalized").path(),
            "/eth/v1/beacon/blocks/finalized/root"
        );
        assert_eq!(
            BeaconStateRootRequest::new("12").path(),
            "/eth/v1/beacon/states/12/root"
        );
        assert_eq!(
            FinalityCheckpointsRequest::new("head").path(),
            "/eth/v1/beacon/states/head/finality_checkpoints"
        );
        assert_eq!(
            BeaconStateRequest::new("head").path(),
            "/eth/v2/debug/beacon/states/head"
        );
        assert_eq!(
            BlobSidecarsRequest::new("head", vec![]).path(),
            "/eth/v1/beacon/blob_sidecars/head"
        );
        assert_eq!(
            BlobSidecarsRequest::new("head", vec![0, 2]).path(),
            "/eth/v1/beacon/blob_sidecars/head?indices=0&indices=2"
        );
    }

    #[test]
    fn test_versioning() {
        assert_eq!(GenesisRequest.versioning(), Versioning::Ignored);
        assert_eq!(
            BeaconStateRootRequest::new("head").versioning(),
            Versioning::Ignored
        );
        assert_eq!(
            BeaconStateRequest::new("head").versioning(),
            Versioning::Required
        );
        assert_eq!(
            BlobSidecarsRequest::new("head", vec![]).versioning(),
            Versioning::Required
        );
        assert!(GenesisRequest.body().unwrap().is_none());
    }

    #[test]
    fn test_decode_root() {
        let envelope = json(
            None,
            serde_json::json!({
                "execution_optimistic": false,
                "finalized": true,
                "data": {"root": format!("0x{}", "ab".repeat(32))}
            }),
        );

        assert_eq!(
            BeaconStateRootRequest::new("head").decode(&envelope).unwrap(),
            [0xab; 32]
        );
        assert_eq!(
            BeaconBlockRootRequest::new("head").decode(&envelope).unwrap(),
            [0xab; 32]
        );
    }

    #[test]
    fn test_decode_state() {
        let mut bytes = vec![0; 128];
        bytes[40..48].copy_from_slice(&9u64.to_le_bytes());
        let ssz = Envelope::success(ContentType::Ssz, Some(DataVersion::Electra), bytes.into());
        let state = BeaconStateRequest::new("head").decode(&ssz).unwrap();
        assert_eq!(state.version(), DataVersion::Electra);
        assert_eq!(state.slot().unwrap(), 9);

        let body = serde_json::json!({"version": "capella", "data": {"slot": "5"}});
        let state = BeaconStateRequest::new("head")
            .decode(&json(Some(DataVersion::Capella), body.clone()))
            .unwrap();
        assert_eq!(state.slot().unwrap(), 5);

        assert!(matches!(
            BeaconStateRequest::new("head").decode(&json(None, body)),
            Err(TypesError::MissingVersion { .. })
        ));
    }

    #[test]
    fn test_decode_blob_sidecars() {
        let sidecars = vec![sample_blob_sidecar(0), sample_blob_sidecar(1)];
        let request = BlobSidecarsRequest::new("head", vec![]);

        let ssz = Envelope::success(
            ContentType::Ssz,
            Some(DataVersion::Deneb),
            BlobSidecar::list_to_ssz_bytes(&sidecars).into(),
        );
        let decoded = request.decode(&ssz).unwrap();
        assert_eq!(decoded.version(), DataVersion::Deneb);
        assert_eq!(decoded.sidecars(), &sidecars);

        let body = serde_json::json!({ "data": sidecars });
        let decoded = request
            .decode(&json(Some(DataVersion::Electra), body.clone()))
            .unwrap();
        assert_eq!(decoded.into_sidecars(), sidecars);

        assert!(matches!(
            request.decode(&json(Some(DataVersion::Capella), body)),
            Err(TypesError::UnsupportedVersion { .. })
        ));
    }
}
