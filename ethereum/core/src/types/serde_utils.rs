// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # JSON encoding helpers
//!
//! The Beacon Node API encodes integers as decimal strings and byte arrays as `0x` prefixed
//! hexadecimal strings. The modules below are meant to be used with `#[serde(with = "...")]`.

use crate::types::error::TypesError;

/// Decodes a `0x` prefixed hexadecimal string.
pub fn decode_hex(value: &str) -> Result<Vec<u8>, TypesError> {
    let value = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(value).map_err(|_| TypesError::InvalidHexadecimal)
}

/// Decodes a `0x` prefixed hexadecimal string into a fixed-size array.
pub fn decode_hex_array<const N: usize>(value: &str) -> Result<[u8; N], TypesError> {
    decode_hex(value)?
        .try_into()
        .map_err(|_| TypesError::InvalidHexadecimal)
}

/// Encodes bytes as a `0x` prefixed hexadecimal string.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// `u64` as a decimal string.
pub mod quoted_u64 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// List of `u64` as decimal strings.
pub mod quoted_u64_list {
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(values: &[u64], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(&value.to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u64>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|value| value.parse().map_err(serde::de::Error::custom))
            .collect()
    }
}

/// Fixed-size byte array as a hexadecimal string.
pub mod hex_array {
    use super::{decode_hex_array, encode_hex};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer, const N: usize>(
        bytes: &[u8; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_hex(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
        deserializer: D,
    ) -> Result<[u8; N], D::Error> {
        let value = String::deserialize(deserializer)?;
        decode_hex_array(&value).map_err(serde::de::Error::custom)
    }
}

/// Fixed-size vector of fixed-size byte arrays as a list of hexadecimal strings.
pub mod hex_array_vector {
    use super::{decode_hex_array, encode_hex};
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer, const N: usize, const M: usize>(
        items: &[[u8; M]; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(N))?;
        for item in items {
            seq.serialize_element(&encode_hex(item))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize, const M: usize>(
        deserializer: D,
    ) -> Result<[[u8; M]; N], D::Error> {
        let items = Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|item| decode_hex_array::<M>(item))
            .collect::<Result<Vec<_>, _>>()
            .map_err(serde::de::Error::custom)?;
        let actual = items.len();

        items.try_into().map_err(|_| {
            serde::de::Error::invalid_length(actual, &format!("{N} elements").as_str())
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "quoted_u64")]
        slot: u64,
        #[serde(with = "hex_array")]
        root: [u8; 4],
        #[serde(with = "hex_array_vector")]
        branch: [[u8; 2]; 2],
        #[serde(with = "quoted_u64_list")]
        indices: Vec<u64>,
    }

    #[test]
    fn test_json_representation() {
        let sample = Sample {
            slot: 42,
            root: [0xde, 0xad, 0xbe, 0xef],
            branch: [[0, 1], [2, 3]],
            indices: vec![3, 17],
        };

        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "slot": "42",
                "root": "0xdeadbeef",
                "branch": ["0x0001", "0x0203"],
                "indices": ["3", "17"]
            })
        );

        let parsed: Sample = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, sample);
    }

    #[test]
    fn test_rejects_malformed_values() {
        let wrong_size = serde_json::json!({
            "slot": "1",
            "root": "0xdead",
            "branch": ["0x0001", "0x0203"],
            "indices": []
        });
        assert!(serde_json::from_value::<Sample>(wrong_size).is_err());

        let unquoted = serde_json::json!({
            "slot": 1,
            "root": "0xdeadbeef",
            "branch": ["0x0001", "0x0203"],
            "indices": []
        });
        assert!(serde_json::from_value::<Sample>(unquoted).is_err());

        let short_branch = serde_json::json!({
            "slot": "1",
            "root": "0xdeadbeef",
            "branch": ["0x0001"],
            "indices": []
        });
        assert!(serde_json::from_value::<Sample>(short_branch).is_err());

        let unparsable_index = serde_json::json!({
            "slot": "1",
            "root": "0xdeadbeef",
            "branch": ["0x0001", "0x0203"],
            "indices": ["one"]
        });
        assert!(serde_json::from_value::<Sample>(unparsable_index).is_err());
    }

    #[test]
    fn test_decode_hex_prefix_is_optional() {
        assert_eq!(decode_hex("0x0a0b").unwrap(), vec![10, 11]);
        assert_eq!(decode_hex("0a0b").unwrap(), vec![10, 11]);
        assert!(decode_hex("0xzz").is_err());
    }
}
