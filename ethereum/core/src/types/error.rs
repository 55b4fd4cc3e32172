// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

use crate::types::version::DataVersion;
use thiserror::Error;

/// Errors possible during type manipulation.
#[derive(Debug, Error)]
pub enum TypesError {
    #[error("Failed to deserialize {structure}: {source}")]
    DeserializationError {
        structure: String,
        #[source]
        source: Box<dyn std::error::Error + Sync + Send>,
    },
    #[error("Failed to serialize {structure}: {source}")]
    SerializationError {
        structure: String,
        #[source]
        source: Box<dyn std::error::Error + Sync + Send>,
    },
    #[error("Received data of invalid length for {structure}. Expected {expected}, got {actual}.")]
    InvalidLength {
        structure: String,
        expected: usize,
        actual: usize,
    },
    #[error(
        "Received too little data to deserialize {structure}. Minimum {minimum}, got {actual}."
    )]
    UnderLength {
        structure: String,
        minimum: usize,
        actual: usize,
    },
    #[error("Unsupported consensus version for {structure}: {version}")]
    UnsupportedVersion {
        structure: String,
        version: DataVersion,
    },
    #[error("Missing consensus version for {structure}")]
    MissingVersion { structure: String },
    #[error("Error while converting hexadecimal value to a fixed-size array")]
    InvalidHexadecimal,
}

/// Macro to create a `TypesError::DeserializationError` with the given structure and source.
#[macro_export]
macro_rules! deserialization_error {
    ($structure:expr, $source:expr) => {
        $crate::types::error::TypesError::DeserializationError {
            structure: String::from($structure),
            source: $source.into(),
        }
    };
}

/// Macro to create a `TypesError::SerializationError` with the given structure and source.
#[macro_export]
macro_rules! serialization_error {
    ($structure:expr, $source:expr) => {
        $crate::types::error::TypesError::SerializationError {
            structure: String::from($structure),
            source: $source.into(),
        }
    };
}
