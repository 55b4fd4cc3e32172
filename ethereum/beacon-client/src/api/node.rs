// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

use crate::api::{decode_json_data, ApiRequest};
use crate::client::endpoint::Capability;
use crate::client::envelope::Envelope;
use crate::types::node::NodeVersion;
use ethereum_beacon_core::types::error::TypesError;

/// Software version of the node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeVersionRequest;

impl ApiRequest for NodeVersionRequest {
    type Output = NodeVersion;

    fn capability(&self) -> Capability {
        Capability::NodeVersion
    }

    fn path(&self) -> String {
        String::from("/eth/v1/node/version")
    }

    fn decode(&self, envelope: &Envelope) -> Result<Self::Output, TypesError> {
        decode_json_data("NodeVersion", envelope)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::client::envelope::ContentType;
    use bytes::Bytes;

    #[test]
    fn test_decode() {
        let envelope = Envelope::success(
            ContentType::Json,
            None,
            Bytes::from_static(br#"{"data":{"version":"Lighthouse/v5.3.0"}}"#),
        );

        let version = NodeVersionRequest.decode(&envelope).unwrap();

        assert_eq!(version.version(), "Lighthouse/v5.3.0");
    }
}
