// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # API module
//!
//! This module contains the catalog of typed requests that can be sent to a Beacon Node. Each
//! request knows the capability it needs, the endpoint serving it, whether its response is
//! versioned and how to decode an [`Envelope`] into its output.
//!
//! ## Sub-modules
//!
//! - `beacon`: Requests to the `/eth/*/beacon` and `/eth/*/debug` endpoints.
//! - `node`: Requests to the `/eth/v1/node` endpoints.
//! - `validator`: Requests to the `/eth/v1/validator` endpoints.

use crate::client::endpoint::Capability;
use crate::client::envelope::{ContentType, Envelope, Versioning};
use crate::types::DataResponse;
use ethereum_beacon_core::deserialization_error;
use ethereum_beacon_core::types::error::TypesError;
use ethereum_beacon_core::types::version::DataVersion;
use serde::de::DeserializeOwned;

pub mod beacon;
pub mod node;
pub mod validator;

/// A typed request to a Beacon Node.
pub trait ApiRequest: Clone + Send + Sync + 'static {
    /// Decoded response.
    type Output: Send + 'static;

    /// Human readable name of the operation, used in logs and errors.
    fn name(&self) -> &'static str {
        self.capability().as_str()
    }

    fn capability(&self) -> Capability;

    /// Path of the endpoint, query included.
    fn path(&self) -> String;

    /// JSON body of the request. Requests with a body are sent as `POST`, others as `GET`.
    fn body(&self) -> Result<Option<Vec<u8>>, TypesError> {
        Ok(None)
    }

    fn versioning(&self) -> Versioning {
        Versioning::Ignored
    }

    /// Decode a successful response.
    fn decode(&self, envelope: &Envelope) -> Result<Self::Output, TypesError>;
}

/// Decode the `data` field of a JSON response.
pub(crate) fn decode_json_data<T: DeserializeOwned>(
    structure: &str,
    envelope: &Envelope,
) -> Result<T, TypesError> {
    match envelope.content_type() {
        Some(ContentType::Ssz) => Err(deserialization_error!(
            structure,
            "SSZ encoding is not supported for this response"
        )),
        _ => serde_json::from_slice::<DataResponse<T>>(envelope.payload())
            .map(|response| response.data)
            .map_err(|err| deserialization_error!(structure, err)),
    }
}

/// Consensus version of a versioned response.
pub(crate) fn required_version(
    structure: &str,
    envelope: &Envelope,
) -> Result<DataVersion, TypesError> {
    envelope
        .consensus_version()
        .ok_or_else(|| TypesError::MissingVersion {
            structure: structure.into(),
        })
}

#[cfg(test)]
mod test {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_decode_json_data() {
        let envelope = Envelope::success(
            ContentType::Json,
            None,
            Bytes::from_static(br#"{"data":{"version":"Lighthouse/v5"}}"#),
        );

        let value: serde_json::Value = decode_json_data("Test", &envelope).unwrap();

        assert_eq!(value["version"], "Lighthouse/v5");
    }

    #[test]
    fn test_decode_json_data_rejects_ssz() {
        let envelope = Envelope::success(ContentType::Ssz, None, Bytes::from_static(&[0; 32]));

        assert!(decode_json_data::<serde_json::Value>("Test", &envelope).is_err());
        assert!(matches!(
            required_version("Test", &envelope),
            Err(TypesError::MissingVersion { .. })
        ));
    }
}
