// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

use crate::api::{decode_json_data, ApiRequest};
use crate::client::endpoint::Capability;
use crate::client::envelope::Envelope;
use crate::types::validator::ValidatorLiveness;
use ethereum_beacon_core::serialization_error;
use ethereum_beacon_core::types::error::TypesError;
use ethereum_beacon_core::types::serde_utils::quoted_u64_list;

/// Liveness of a set of validators during an epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorLivenessRequest {
    epoch: u64,
    indices: Vec<u64>,
}

impl ValidatorLivenessRequest {
    pub fn new(epoch: u64, indices: Vec<u64>) -> Self {
        Self { epoch, indices }
    }
}

impl ApiRequest for ValidatorLivenessRequest {
    type Output = Vec<ValidatorLiveness>;

    fn capability(&self) -> Capability {
        Capability::ValidatorLiveness
    }

    fn path(&self) -> String {
        format!("/eth/v1/validator/liveness/{}", self.epoch)
    }

    fn body(&self) -> Result<Option<Vec<u8>>, TypesError> {
        let mut body = vec![];
        quoted_u64_list::serialize(&self.indices, &mut serde_json::Serializer::new(&mut body))
            .map_err(|err| serialization_error!("ValidatorLivenessRequest", err))?;

        Ok(Some(body))
    }

    fn decode(&self, envelope: &Envelope) -> Result<Self::Output, TypesError> {
        decode_json_data("ValidatorLiveness", envelope)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::client::envelope::ContentType;
    use bytes::Bytes;

    #[test]
    fn test_request() {
        let request = ValidatorLivenessRequest::new(12, vec![1, 20]);

        assert_eq!(request.path(), "/eth/v1/validator/liveness/12");
        assert_eq!(request.body().unwrap().unwrap(), br#"["1","20"]"#.to_vec());
    }

    #[test]
    fn test_decode() {
        let envelope = Envelope::success(
            ContentType::Json,
            None,
            Bytes::from_static(
                br#"{"data":[{"index":"1","is_live":true},{"index":"20","is_live":false}]}"#,
            ),
        );

        let liveness = ValidatorLivenessRequest::new(12, vec![1, 20])
            .decode(&envelope)
            .unwrap();

        assert_eq!(
            liveness,
            vec![
                ValidatorLiveness::new(1, true),
                ValidatorLiveness::new(20, false)
            ]
        );
    }
}
