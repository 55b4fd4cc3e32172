// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

use crate::deserialization_error;
use crate::types::error::TypesError;
use crate::types::U64_LEN;

/// Utility method to extract the N bytes at a given cursor from a byte array.
///
/// # Arguments
///
/// * `structure` - The name of the structure being extracted.
/// * `bytes` - The byte array to extract from.
/// * `cursor` - The current cursor position in the byte array.
///
/// # Returns
///
/// A tuple containing the new cursor position and the extracted bytes.
pub fn extract_fixed_bytes<const N: usize>(
    structure: &str,
    bytes: &[u8],
    cursor: usize,
) -> Result<(usize, [u8; N]), TypesError> {
    if cursor + N > bytes.len() {
        return Err(deserialization_error!(
            structure,
            "Not enough bytes to extract fixed bytes"
        ));
    }
    let result = bytes[cursor..cursor + N]
        .try_into()
        .map_err(|_| deserialization_error!(structure, "Invalid fixed bytes"))?;

    Ok((cursor + N, result))
}

/// Utility method to extract a u64 from a little-endian byte array at a given cursor.
///
/// # Arguments
///
/// * `structure` - The name of the structure being extracted.
/// * `bytes` - The byte array to extract from.
/// * `cursor` - The current cursor position in the byte array.
///
/// # Returns
///
/// A tuple containing the new cursor position and the extracted u64.
pub fn extract_u64(
    structure: &str,
    bytes: &[u8],
    cursor: usize,
) -> Result<(usize, u64), TypesError> {
    let (cursor, raw) = extract_fixed_bytes::<U64_LEN>(structure, bytes, cursor)?;

    Ok((cursor, u64::from_le_bytes(raw)))
}

/// Ensures a serialized fixed-size structure has exactly the expected length.
pub fn check_length(structure: &str, bytes: &[u8], expected: usize) -> Result<(), TypesError> {
    if bytes.len() != expected {
        return Err(TypesError::InvalidLength {
            structure: structure.into(),
            expected,
            actual: bytes.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_extract_u64() {
        let bytes = [1, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0];

        let (cursor, first) = extract_u64("Test", &bytes, 0).unwrap();
        let (cursor, second) = extract_u64("Test", &bytes, cursor).unwrap();

        assert_eq!((first, second, cursor), (1, 2, 16));
        assert!(extract_u64("Test", &bytes, cursor).is_err());
    }

    #[test]
    fn test_check_length() {
        assert!(check_length("Test", &[0; 4], 4).is_ok());
        assert!(matches!(
            check_length("Test", &[0; 3], 4),
            Err(TypesError::InvalidLength {
                expected: 4,
                actual: 3,
                ..
            })
        ));
    }
}
