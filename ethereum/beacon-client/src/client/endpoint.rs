// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Endpoint module
//!
//! An [`Endpoint`] is the immutable configuration of a single Beacon Node: its base address, the
//! timeout applied to each call, static headers sent along every request and the set of operations
//! it is trusted to serve.

use crate::client::error::ClientError;
use getset::{CopyGetters, Getters};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Default timeout of a single call to an endpoint.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Operations an endpoint can be asked to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    Genesis,
    NodeVersion,
    BeaconBlockHeader,
    BeaconBlockRoot,
    BeaconStateRoot,
    FinalityCheckpoints,
    BeaconState,
    BlobSidecars,
    ValidatorLiveness,
}

impl Capability {
    pub const ALL: [Capability; 9] = [
        Capability::Genesis,
        Capability::NodeVersion,
        Capability::BeaconBlockHeader,
        Capability::BeaconBlockRoot,
        Capability::BeaconStateRoot,
        Capability::FinalityCheckpoints,
        Capability::BeaconState,
        Capability::BlobSidecars,
        Capability::ValidatorLiveness,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Capability::Genesis => "genesis",
            Capability::NodeVersion => "node version",
            Capability::BeaconBlockHeader => "beacon block header",
            Capability::BeaconBlockRoot => "beacon block root",
            Capability::BeaconStateRoot => "beacon state root",
            Capability::FinalityCheckpoints => "finality checkpoints",
            Capability::BeaconState => "beacon state",
            Capability::BlobSidecars => "blob sidecars",
            Capability::ValidatorLiveness => "validator liveness",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of [`Capability`] declared for an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    /// Every known capability.
    pub fn all() -> Self {
        Capability::ALL.into_iter().collect()
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn insert(&mut self, capability: Capability) -> bool {
        self.0.insert(capability)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }

    /// Capabilities present in either set.
    pub fn union(&self, other: &CapabilitySet) -> CapabilitySet {
        self.0.union(&other.0).copied().collect()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Configuration of a single Beacon Node.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct Endpoint {
    /// Base address of the Beacon Node API.
    #[getset(get = "pub")]
    address: Url,
    /// Timeout of a single call, covering connection, request and response body.
    #[getset(get_copy = "pub")]
    timeout: Duration,
    /// Headers sent along every request.
    #[getset(get = "pub")]
    extra_headers: HeaderMap,
    /// Operations the endpoint is trusted to serve.
    #[getset(get = "pub")]
    capabilities: CapabilitySet,
}

impl Endpoint {
    /// Create a new endpoint for the given address, with the default timeout and every capability.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is not an absolute `http` or `https` URL.
    pub fn new(address: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(address).map_err(|err| ClientError::InvalidAddress {
            address: address.to_string(),
            source: err.into(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidAddress {
                address: address.to_string(),
                source: format!("unsupported scheme \"{}\"", parsed.scheme()).into(),
            });
        }

        Ok(Self {
            address: parsed,
            timeout: DEFAULT_TIMEOUT,
            extra_headers: HeaderMap::new(),
            capabilities: CapabilitySet::all(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Add a header sent along every request to the endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or the value is not a valid header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, ClientError> {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|err| ClientError::InvalidHeader {
                name: name.to_string(),
                source: err.into(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|err| ClientError::InvalidHeader {
            name: name.to_string(),
            source: err.into(),
        })?;

        self.extra_headers.insert(header_name, header_value);

        Ok(self)
    }

    /// Full URL of a path served by the endpoint.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.address.as_str().trim_end_matches('/'), path)
    }
}
