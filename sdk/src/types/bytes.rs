//! Fixed-width 32-byte identifiers: [`Address`], [`ObjectId`], [`OrderId`],
//! and [`Digest`].
//!
//! All four share one shape: 32 raw bytes on the wire, `0x`-prefixed
//! lowercase hex in text, byte equality. The binary serde form is the raw
//! array (so bincode writes exactly 32 bytes, no length prefix); the
//! human-readable form is the hex string.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::error::{strip_hex_prefix, FormatError};
use crate::config::{
    ADDRESS_LENGTH, DIGEST_LENGTH, OBJECT_ID_LENGTH, ORDER_ID_LENGTH, SPOT_CONTRACT_BYTES,
    TOKEN_CONTRACT_BYTES,
};
use crate::crypto::hash::{sha256_array, sha512_array};

macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Width in bytes.
            pub const LENGTH: usize = $len;

            /// Wraps raw bytes. Infallible: the array type already fixes the width.
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Builds from a byte slice, failing unless it is exactly the right width.
            pub fn from_slice(bytes: &[u8]) -> Result<Self, FormatError> {
                let arr: [u8; $len] =
                    bytes
                        .try_into()
                        .map_err(|_| FormatError::InvalidLength {
                            kind: $kind,
                            expected: $len,
                            actual: bytes.len(),
                        })?;
                Ok(Self(arr))
            }

            /// Parses fixed-length hex, with or without a leading `0x`.
            pub fn from_hex(s: &str) -> Result<Self, FormatError> {
                let digits = strip_hex_prefix(s);
                if digits.len() != $len * 2 {
                    return Err(FormatError::InvalidLength {
                        kind: $kind,
                        expected: $len,
                        actual: digits.len() / 2,
                    });
                }
                let mut arr = [0u8; $len];
                hex::decode_to_slice(digits, &mut arr).map_err(|e| FormatError::InvalidHex {
                    kind: $kind,
                    reason: e.to_string(),
                })?;
                Ok(Self(arr))
            }

            /// Borrow the raw bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Copy out the raw bytes.
            pub fn to_bytes(self) -> [u8; $len] {
                self.0
            }

            /// `0x`-prefixed lowercase hex.
            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = FormatError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = FormatError;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                Self::from_slice(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                if serializer.is_human_readable() {
                    serializer.serialize_str(&self.to_hex())
                } else {
                    self.0.serialize(serializer)
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                if deserializer.is_human_readable() {
                    let s = String::deserialize(deserializer)?;
                    Self::from_hex(&s).map_err(serde::de::Error::custom)
                } else {
                    <[u8; $len]>::deserialize(deserializer).map(Self)
                }
            }
        }
    };
}

fixed_bytes!(
    /// A 32-byte account address.
    ///
    /// Derived from an Ed25519 public key as the first 32 bytes of its
    /// SHA-512 hash. Also used for contract (module) addresses.
    Address,
    ADDRESS_LENGTH,
    "address"
);

fixed_bytes!(
    /// A 32-byte reference to a ledger-side object (token, market, balance).
    ///
    /// Opaque to the SDK: it is carried, never interpreted.
    ObjectId,
    OBJECT_ID_LENGTH,
    "object id"
);

fixed_bytes!(
    /// A 32-byte order identifier assigned by the spot module.
    OrderId,
    ORDER_ID_LENGTH,
    "order id"
);

fixed_bytes!(
    /// SHA-256 of a transaction's canonical payload. Doubles as the
    /// transaction identifier and the Ed25519 signing input.
    Digest,
    DIGEST_LENGTH,
    "digest"
);

impl Address {
    /// The token module contract.
    pub const TOKEN_CONTRACT: Address = Address(TOKEN_CONTRACT_BYTES);

    /// The spot market module contract.
    pub const SPOT_CONTRACT: Address = Address(SPOT_CONTRACT_BYTES);

    /// The all-zero address.
    pub const fn zero() -> Self {
        Self([0u8; ADDRESS_LENGTH])
    }

    /// Derives the account address of an Ed25519 public key:
    /// `SHA-512(public_key)[..32]`.
    pub fn from_public_key_bytes(public_key: &[u8; 32]) -> Self {
        let wide = sha512_array(public_key);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(&wide[..ADDRESS_LENGTH]);
        Self(bytes)
    }
}

impl OrderId {
    /// Builds an order id from the node's four-word representation
    /// (little-endian `u64`s, lowest word first).
    pub fn from_words(words: [u64; 4]) -> Self {
        let mut bytes = [0u8; ORDER_ID_LENGTH];
        for (chunk, word) in bytes.chunks_exact_mut(8).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Self(bytes)
    }

    /// Inverse of [`OrderId::from_words`].
    pub fn to_words(&self) -> [u64; 4] {
        let mut words = [0u64; 4];
        for (word, chunk) in words.iter_mut().zip(self.0.chunks_exact(8)) {
            let mut le = [0u8; 8];
            le.copy_from_slice(chunk);
            *word = u64::from_le_bytes(le);
        }
        words
    }
}

impl Digest {
    /// SHA-256 of `data`.
    pub fn of(data: &[u8]) -> Self {
        Self(sha256_array(data))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
