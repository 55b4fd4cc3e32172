// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Envelope module
//!
//! An [`Envelope`] is the normalized outcome of a single call to a Beacon Node: how the call was
//! classified, the encoding of the payload and the consensus version the payload follows.
//!
//! Successful responses go through two resolution steps. The content type is taken from the
//! `Content-Type` header and falls back to JSON when it is absent or not recognised. The consensus
//! version is taken from the `Eth-Consensus-Version` header and, for JSON payloads only, from the
//! top-level `version` field of the body when the header is absent.

use crate::client::error::ClientError;
use bytes::Bytes;
use ethereum_beacon_core::types::version::{DataVersion, CONSENSUS_VERSION_HEADER};
use getset::{CopyGetters, Getters};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use serde::Deserialize;
use tracing::debug;

/// `Accept` header of GET requests, preferring SSZ over JSON.
pub const ACCEPT_PREFER_SSZ: &str = "application/octet-stream;q=1,application/json;q=0.9";

/// Classification of a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    NotFound,
    NoContent,
}

/// Encoding of a response payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Ssz,
    Json,
}

impl ContentType {
    pub const fn media_type(&self) -> &'static str {
        match self {
            ContentType::Ssz => "application/octet-stream",
            ContentType::Json => "application/json",
        }
    }

    /// Parse a `Content-Type` value, ignoring its parameters.
    pub fn from_media_type(value: &str) -> Option<Self> {
        let essence = value.split(';').next()?.trim().to_ascii_lowercase();

        match essence.as_str() {
            "application/octet-stream" => Some(ContentType::Ssz),
            "application/json" => Some(ContentType::Json),
            _ => None,
        }
    }
}

/// Whether a request expects the consensus version of its response to be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Versioning {
    Required,
    Ignored,
}

/// Normalized outcome of a call to a Beacon Node.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Envelope {
    #[getset(get_copy = "pub")]
    status: StatusClass,
    #[getset(get_copy = "pub")]
    content_type: Option<ContentType>,
    #[getset(get_copy = "pub")]
    consensus_version: Option<DataVersion>,
    #[getset(get = "pub")]
    payload: Bytes,
}

impl Envelope {
    pub fn success(
        content_type: ContentType,
        consensus_version: Option<DataVersion>,
        payload: Bytes,
    ) -> Self {
        Self {
            status: StatusClass::Success,
            content_type: Some(content_type),
            consensus_version,
            payload,
        }
    }

    pub fn not_found() -> Self {
        Self::empty(StatusClass::NotFound)
    }

    pub fn no_content() -> Self {
        Self::empty(StatusClass::NoContent)
    }

    fn empty(status: StatusClass) -> Self {
        Self {
            status,
            content_type: None,
            consensus_version: None,
            payload: Bytes::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == StatusClass::Success
    }
}

#[derive(Deserialize)]
struct VersionField {
    version: Option<DataVersion>,
}

/// Resolve the encoding of a successful response from its headers.
///
/// # Errors
///
/// Returns an error if the response carries more than one `Content-Type` value.
pub fn resolve_content_type(endpoint: &str, headers: &HeaderMap) -> Result<ContentType, ClientError> {
    let mut values = headers.get_all(CONTENT_TYPE).iter();

    let Some(value) = values.next() else {
        debug!(endpoint, "No content type, assuming JSON");
        return Ok(ContentType::Json);
    };

    if values.next().is_some() {
        return Err(ClientError::Decode {
            endpoint: endpoint.to_string(),
            source: "multiple Content-Type values in response".into(),
        });
    }

    match value.to_str().ok().and_then(ContentType::from_media_type) {
        Some(content_type) => Ok(content_type),
        None => {
            debug!(endpoint, content_type = ?value, "Unrecognised content type, assuming JSON");
            Ok(ContentType::Json)
        }
    }
}

/// Resolve the consensus version of a successful response.
///
/// # Errors
///
/// Returns an error if the header is repeated or unknown, or if it is absent and the version can
/// not be read from the payload.
pub fn resolve_consensus_version(
    endpoint: &str,
    headers: &HeaderMap,
    content_type: ContentType,
    payload: &[u8],
) -> Result<DataVersion, ClientError> {
    let decode_error = |message: String| ClientError::Decode {
        endpoint: endpoint.to_string(),
        source: message.into(),
    };

    let mut values = headers.get_all(CONSENSUS_VERSION_HEADER).iter();

    if let Some(value) = values.next() {
        if values.next().is_some() {
            return Err(decode_error(format!(
                "multiple {CONSENSUS_VERSION_HEADER} values in response"
            )));
        }

        let tag = value.to_str().map_err(|err| ClientError::Decode {
            endpoint: endpoint.to_string(),
            source: err.into(),
        })?;

        return tag.parse().map_err(|err| ClientError::Decode {
            endpoint: endpoint.to_string(),
            source: Box::new(err),
        });
    }

    match content_type {
        ContentType::Ssz => Err(decode_error(format!(
            "no {CONSENSUS_VERSION_HEADER} header for SSZ response"
        ))),
        ContentType::Json => {
            let field: VersionField =
                serde_json::from_slice(payload).map_err(|err| ClientError::Decode {
                    endpoint: endpoint.to_string(),
                    source: err.into(),
                })?;

            field.version.ok_or_else(|| {
                decode_error(format!(
                    "no {CONSENSUS_VERSION_HEADER} header nor version field in response"
                ))
            })
        }
    }
}
