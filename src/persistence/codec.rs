//! Checksummed snapshot encoding.
//!
//! Layout:
//! - Magic (8 bytes LE)
//! - Schema version (4 bytes LE)
//! - Payload length (4 bytes LE)
//! - bincode payload (variable length)
//! - SHA-256 over everything above (32 bytes)

use crate::core::constants::SAVE_MAGIC;
use crate::error::{PersistError, PersistResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};

const HEADER_LEN: usize = 8 + 4 + 4;
const CHECKSUM_LEN: usize = 32;

pub fn encode<T: Serialize>(version: u32, value: &T) -> PersistResult<Vec<u8>> {
    let data = bincode::serialize(value)?;
    let data_len = data.len() as u32;

    let mut bytes = Vec::with_capacity(HEADER_LEN + data.len() + CHECKSUM_LEN);
    bytes.extend_from_slice(&SAVE_MAGIC.to_le_bytes());
    bytes.extend_from_slice(&version.to_le_bytes());
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.extend_from_slice(&data);

    let checksum = Sha256::digest(&bytes);
    bytes.extend_from_slice(&checksum);
    Ok(bytes)
}

/// Decode a snapshot written by [`encode`] with the same schema version.
pub fn decode<T: DeserializeOwned>(version: u32, bytes: &[u8]) -> PersistResult<T> {
    let truncated = || PersistError::Truncated { len: bytes.len() };
    if bytes.len() < HEADER_LEN + CHECKSUM_LEN {
        return Err(truncated());
    }

    let magic = u64::from_le_bytes(read_array(bytes, 0).ok_or_else(truncated)?);
    if magic != SAVE_MAGIC {
        return Err(PersistError::BadMagic { found: magic });
    }
    let found_version = u32::from_le_bytes(read_array(bytes, 8).ok_or_else(truncated)?);
    let data_len = u32::from_le_bytes(read_array(bytes, 12).ok_or_else(truncated)?) as usize;

    let body_len = HEADER_LEN + data_len;
    if bytes.len() != body_len + CHECKSUM_LEN {
        return Err(truncated());
    }

    let (body, stored_checksum) = bytes.split_at(body_len);
    if Sha256::digest(body).as_slice() != stored_checksum {
        return Err(PersistError::ChecksumMismatch);
    }

    if found_version != version {
        return Err(PersistError::VersionMismatch {
            expected: version,
            found: found_version,
        });
    }

    Ok(bincode::deserialize(&body[HEADER_LEN..])?)
}

fn read_array<const N: usize>(bytes: &[u8], offset: usize) -> Option<[u8; N]> {
    bytes.get(offset..offset + N)?.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Sample {
        name: String,
        values: Vec<f64>,
    }

    fn sample() -> Sample {
        Sample {
            name: "rig".to_string(),
            values: vec![0.05, 1000.0],
        }
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let bytes = encode(1, &sample()).unwrap();
        let decoded: Sample = decode(1, &bytes).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_header_layout() {
        let bytes = encode(7, &sample()).unwrap();

        assert_eq!(&bytes[0..8], &SAVE_MAGIC.to_le_bytes());
        assert_eq!(&bytes[8..12], &7u32.to_le_bytes());
        let data_len = u32::from_le_bytes(bytes[12..16].try_into().unwrap()) as usize;
        assert_eq!(bytes.len(), HEADER_LEN + data_len + CHECKSUM_LEN);
    }

    #[test]
    fn test_flipped_payload_byte_fails_checksum() {
        let mut bytes = encode(1, &sample()).unwrap();
        bytes[HEADER_LEN] ^= 0xFF;

        let result = decode::<Sample>(1, &bytes);
        assert!(matches!(result, Err(PersistError::ChecksumMismatch)));
    }

    #[test]
    fn test_wrong_magic_rejected() {
        let mut bytes = encode(1, &sample()).unwrap();
        bytes[0] ^= 0x01;

        let result = decode::<Sample>(1, &bytes);
        assert!(matches!(result, Err(PersistError::BadMagic { .. })));
    }

    #[test]
    fn test_version_mismatch_reported() {
        let bytes = encode(2, &sample()).unwrap();

        let result = decode::<Sample>(1, &bytes);
        assert!(matches!(
            result,
            Err(PersistError::VersionMismatch {
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn test_truncated_input_rejected() {
        let bytes = encode(1, &sample()).unwrap();

        assert!(matches!(
            decode::<Sample>(1, &bytes[..10]),
            Err(PersistError::Truncated { len: 10 })
        ));
        assert!(matches!(
            decode::<Sample>(1, &bytes[..bytes.len() - 1]),
            Err(PersistError::Truncated { .. })
        ));
    }
}
