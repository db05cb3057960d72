//! # Canonical Codec
//!
//! One bincode configuration, shared by every encoder and decoder in the
//! crate, so the two directions cannot drift apart:
//!
//! - fixed-width integers, little-endian (bincode's `DefaultOptions` would
//!   otherwise pick varint),
//! - `u64` length prefixes on strings and sequences,
//! - `u32` enum variant indices,
//! - a hard size limit, and no trailing bytes after a value.
//!
//! This is the exact layout the ledger node deserializes, so the bytes
//! produced here are the bytes that get hashed and signed.

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::config::MAX_TRANSACTION_BYTES;
use crate::crypto::CryptoError;
use crate::transaction::ValidationError;

/// Failure to produce canonical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("encoded payload exceeds {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("action {action} expects {expected} input objects, got {actual}")]
    InputCount {
        action: &'static str,
        expected: &'static str,
        actual: usize,
    },
}

/// Failure to parse canonical bytes back into a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Truncated input, an out-of-range bool or enum index, invalid UTF-8,
    /// or bytes left over after the value.
    #[error("malformed canonical bytes: {0}")]
    Malformed(String),

    #[error("input exceeds {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("unknown action tag {tag:#018x}")]
    UnknownTag { tag: u64 },

    #[error("action {action} expects {expected} input objects, got {actual}")]
    InputCount {
        action: &'static str,
        expected: &'static str,
        actual: usize,
    },

    /// The decoded transaction would not pass the builder's checks.
    #[error("decoded transaction is invalid: {0}")]
    Invalid(#[from] ValidationError),

    /// The decoded signature does not verify, or its public key is unusable.
    #[error("decoded signature rejected: {0}")]
    Signature(#[from] CryptoError),
}

impl From<bincode::Error> for EncodeError {
    fn from(err: bincode::Error) -> Self {
        match *err {
            bincode::ErrorKind::SizeLimit => EncodeError::TooLarge {
                limit: MAX_TRANSACTION_BYTES,
            },
            other => EncodeError::Serialization(other.to_string()),
        }
    }
}

impl From<bincode::Error> for DecodeError {
    fn from(err: bincode::Error) -> Self {
        match *err {
            bincode::ErrorKind::SizeLimit => DecodeError::TooLarge {
                limit: MAX_TRANSACTION_BYTES,
            },
            other => DecodeError::Malformed(other.to_string()),
        }
    }
}

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .with_limit(MAX_TRANSACTION_BYTES)
        .reject_trailing_bytes()
}

/// Serializes `value` into its canonical bytes.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    Ok(options().serialize(value)?)
}

/// Parses exactly one canonical value from `bytes`. Leftover bytes are an error.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    if bytes.len() as u64 > MAX_TRANSACTION_BYTES {
        return Err(DecodeError::TooLarge {
            limit: MAX_TRANSACTION_BYTES,
        });
    }
    Ok(options().deserialize(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        flag: bool,
        small: u16,
        big: u64,
        label: String,
        maybe: Option<u32>,
    }

    fn sample() -> Sample {
        Sample {
            flag: true,
            small: 0x0102,
            big: 7,
            label: "BTC".into(),
            maybe: None,
        }
    }

    #[test]
    fn fixint_little_endian_layout() {
        let bytes = encode(&sample()).unwrap();
        let expected = [
            vec![0x01],
            vec![0x02, 0x01],
            7u64.to_le_bytes().to_vec(),
            3u64.to_le_bytes().to_vec(),
            b"BTC".to_vec(),
            vec![0x00],
        ]
        .concat();
        assert_eq!(bytes, expected);
    }

    #[test]
    fn decode_inverts_encode() {
        let bytes = encode(&sample()).unwrap();
        assert_eq!(decode::<Sample>(&bytes).unwrap(), sample());
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = encode(&sample()).unwrap();
        bytes.push(0);
        assert!(matches!(
            decode::<Sample>(&bytes),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn truncation_is_rejected() {
        let bytes = encode(&sample()).unwrap();
        assert!(matches!(
            decode::<Sample>(&bytes[..bytes.len() - 2]),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn invalid_bool_is_rejected() {
        let mut bytes = encode(&sample()).unwrap();
        bytes[0] = 2;
        assert!(decode::<Sample>(&bytes).is_err());
    }

    #[test]
    fn hostile_length_prefix_hits_the_limit() {
        // A string claiming u64::MAX bytes must not try to allocate them.
        let mut bytes = vec![0x01, 0x02, 0x01];
        bytes.extend_from_slice(&7u64.to_le_bytes());
        bytes.extend_from_slice(&u64::MAX.to_le_bytes());
        assert!(decode::<Sample>(&bytes).is_err());
    }

    #[test]
    fn oversized_input_is_refused_up_front() {
        let bytes = vec![0u8; MAX_TRANSACTION_BYTES as usize + 1];
        assert_eq!(
            decode::<Sample>(&bytes),
            Err(DecodeError::TooLarge {
                limit: MAX_TRANSACTION_BYTES
            })
        );
    }
}
