// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

use ethereum_beacon_core::types::blob::BlobSidecar;
use ethereum_beacon_core::types::error::TypesError;
use ethereum_beacon_core::types::version::DataVersion;
use getset::{CopyGetters, Getters};

/// Blob sidecars of a block, tagged with their consensus version.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct VersionedBlobSidecars {
    #[getset(get_copy = "pub")]
    version: DataVersion,
    #[getset(get = "pub")]
    sidecars: Vec<BlobSidecar>,
}

impl VersionedBlobSidecars {
    /// Whether blob sidecars of the given version share the layout of [`BlobSidecar`].
    pub const fn is_supported(version: DataVersion) -> bool {
        matches!(version, DataVersion::Deneb | DataVersion::Electra)
    }

    /// # Errors
    ///
    /// Returns an error if `version` predates blobs or uses a different sidecar layout.
    pub fn new(version: DataVersion, sidecars: Vec<BlobSidecar>) -> Result<Self, TypesError> {
        if !Self::is_supported(version) {
            return Err(TypesError::UnsupportedVersion {
                structure: "BlobSidecar".into(),
                version,
            });
        }

        Ok(Self { version, sidecars })
    }

    pub fn into_sidecars(self) -> Vec<BlobSidecar> {
        self.sidecars
    }
}
