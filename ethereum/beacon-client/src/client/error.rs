// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

use crate::client::endpoint::Capability;
use getset::Getters;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// The error type for the `client` module.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid address \"{address}\": {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: Box<dyn std::error::Error + Sync + Send>,
    },
    #[error("Invalid header \"{name}\": {source}")]
    InvalidHeader {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Sync + Send>,
    },
    #[error("Request for endpoint \"{endpoint}\" failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Sync + Send>,
    },
    #[error("Request for endpoint \"{endpoint}\" timed out after {timeout:?}")]
    Timeout { endpoint: String, timeout: Duration },
    #[error("{method} {endpoint} failed with status {status_code}: {}", String::from_utf8_lossy(.data))]
    Http {
        method: String,
        endpoint: String,
        status_code: u16,
        data: Vec<u8>,
    },
    #[error("Error while handling response for endpoint \"{endpoint}\": {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Sync + Send>,
    },
    #[error("Error while encoding request for endpoint \"{endpoint}\": {source}")]
    Encode {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Sync + Send>,
    },
    #[error("No endpoint supports {capability}")]
    Unsupported { capability: Capability },
    #[error("No endpoint configured")]
    NoEndpoints,
    #[error("{operation} on {endpoint} did not complete before the deadline")]
    DeadlineExceeded { operation: String, endpoint: String },
    #[error("{operation} on {endpoint} did not complete: {reason}")]
    Task {
        operation: String,
        endpoint: String,
        reason: String,
    },
    #[error("{operation} failed on all {} endpoints: {}", .failures.len(), describe_failures(.failures))]
    Aggregate {
        operation: String,
        failures: Vec<MemberFailure>,
    },
    #[error("{operation} was inconclusive, {reason}")]
    Inconclusive {
        operation: String,
        reason: String,
        failures: Vec<MemberFailure>,
    },
}

impl ClientError {
    /// Whether the error means the endpoint could not be reached in time, rather than the endpoint
    /// rejecting the request.
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Transport { .. }
                | ClientError::Timeout { .. }
                | ClientError::DeadlineExceeded { .. }
        )
    }

    /// Whether the error was raised while decoding a response.
    pub const fn is_decode(&self) -> bool {
        matches!(self, ClientError::Decode { .. })
    }

    /// HTTP status code returned by the endpoint, if any.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Http { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Individual failures bundled in an aggregated error.
    pub fn failures(&self) -> &[MemberFailure] {
        match self {
            ClientError::Aggregate { failures, .. } | ClientError::Inconclusive { failures, .. } => {
                failures
            }
            _ => &[],
        }
    }
}

/// Failure of a single member of a multi-endpoint call.
#[derive(Debug, Getters)]
#[getset(get = "pub")]
pub struct MemberFailure {
    /// Address of the member.
    endpoint: String,
    /// The error returned by the member.
    error: ClientError,
}

impl MemberFailure {
    pub fn new(endpoint: impl Into<String>, error: ClientError) -> Self {
        Self {
            endpoint: endpoint.into(),
            error,
        }
    }

    pub fn into_error(self) -> ClientError {
        self.error
    }
}

impl fmt::Display for MemberFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.endpoint, self.error)
    }
}

fn describe_failures(failures: &[MemberFailure]) -> String {
    failures
        .iter()
        .map(MemberFailure::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
