//! # Key Management
//!
//! Ed25519 keypairs, public keys, and signatures for LightPool accounts.
//!
//! ## Security considerations
//!
//! - The signing key zeroizes on drop (ed25519-dalek's `zeroize` feature).
//!   Every intermediate buffer that holds secret bytes on the way in or out
//!   is wrapped in [`Zeroizing`].
//! - Generation uses `OsRng`.
//! - Key bytes are never logged and never appear in `Debug` output.
//! - The SDK never persists keys. Lifecycle belongs to the caller.

use ed25519_dalek::{Signer as _, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

use super::signatures::CryptoError;
use crate::config::{PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH};
use crate::types::error::strip_hex_prefix;
use crate::types::{Address, Digest};

/// Malformed key or signature material on import.
///
/// Deliberately says nothing about the bytes themselves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyFormatError {
    #[error("invalid {kind} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid {kind} encoding: not hex")]
    InvalidHex { kind: &'static str },
}

// ---------------------------------------------------------------------------
// Signer capability
// ---------------------------------------------------------------------------

/// Anything that can sign a transaction digest.
///
/// The transaction builder only ever talks to this trait, so keys may live
/// in memory ([`Keypair`]), in a hardware wallet, or behind a remote signer.
pub trait Signer: Send + Sync {
    /// The Ed25519 public key the signatures verify against.
    fn public_key(&self) -> PublicKey;

    /// Signs the 32 digest bytes. Never a raw payload.
    fn sign_digest(&self, digest: &Digest) -> Result<Signature, CryptoError>;

    /// The account address of [`Signer::public_key`].
    fn address(&self) -> Address {
        self.public_key().to_address()
    }
}

// ---------------------------------------------------------------------------
// Keypair
// ---------------------------------------------------------------------------

/// An in-memory Ed25519 keypair.
///
/// Does not implement `Serialize`. Exporting a secret is an explicit call to
/// [`Keypair::secret_key_hex`], never a side effect of dumping a struct.
///
/// ```
/// use lightpool_sdk::crypto::Keypair;
/// use lightpool_sdk::types::Digest;
///
/// let kp = Keypair::generate();
/// let digest = Digest::of(b"payload");
/// let sig = kp.sign(&digest);
/// assert!(kp.verify(&digest, &sig));
/// ```
pub struct Keypair {
    signing_key: SigningKey,
    public_key: PublicKey,
    address: Address,
}

impl Keypair {
    /// Fresh keypair from the OS CSPRNG.
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::generate(&mut OsRng))
    }

    /// Keypair from a 32-byte Ed25519 seed.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(seed))
    }

    /// Imports raw secret key bytes. Anything but 32 bytes is rejected.
    pub fn from_private_bytes(bytes: &[u8]) -> Result<Self, KeyFormatError> {
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(KeyFormatError::InvalidLength {
                kind: "private key",
                expected: SECRET_KEY_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut seed = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
        seed.copy_from_slice(bytes);
        Ok(Self::from_seed(&seed))
    }

    /// Imports a hex secret key, `0x` optional.
    pub fn from_hex(s: &str) -> Result<Self, KeyFormatError> {
        let digits = strip_hex_prefix(s.trim());
        let bytes = Zeroizing::new(
            hex::decode(digits).map_err(|_| KeyFormatError::InvalidHex {
                kind: "private key",
            })?,
        );
        Self::from_private_bytes(&bytes)
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let public_key = PublicKey(signing_key.verifying_key().to_bytes());
        let address = public_key.to_address();
        Self {
            signing_key,
            public_key,
            address,
        }
    }

    /// The derived account address. Computed once at construction.
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    pub fn public_key_hex(&self) -> String {
        self.public_key.to_hex()
    }

    /// Exports the secret key as `0x` hex. The returned string is wiped on drop.
    pub fn secret_key_hex(&self) -> Zeroizing<String> {
        let secret = Zeroizing::new(self.signing_key.to_bytes());
        Zeroizing::new(format!("0x{}", hex::encode(secret.as_slice())))
    }

    /// Signs a transaction digest. Ed25519 is deterministic: the same key
    /// and digest always produce the same signature.
    pub fn sign(&self, digest: &Digest) -> Signature {
        Signature::from_bytes(self.signing_key.sign(digest.as_bytes()).to_bytes())
    }

    /// Checks a signature against this keypair's public key.
    pub fn verify(&self, digest: &Digest, signature: &Signature) -> bool {
        super::signatures::verify(digest, signature, &self.public_key).unwrap_or(false)
    }
}

impl Signer for Keypair {
    fn public_key(&self) -> PublicKey {
        self.public_key
    }

    fn sign_digest(&self, digest: &Digest) -> Result<Signature, CryptoError> {
        Ok(self.sign(digest))
    }

    fn address(&self) -> Address {
        self.address
    }
}

impl Clone for Keypair {
    fn clone(&self) -> Self {
        let secret = Zeroizing::new(self.signing_key.to_bytes());
        Self::from_seed(&secret)
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Public half only.
        write!(f, "Keypair(address={})", self.address)
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A 32-byte Ed25519 public key.
///
/// Construction only checks the length. Whether the bytes are a valid curve
/// point is decided at verification time, where a bad point is a
/// [`CryptoError`] rather than a plain `false`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyFormatError> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] =
            slice.try_into().map_err(|_| KeyFormatError::InvalidLength {
                kind: "public key",
                expected: PUBLIC_KEY_LENGTH,
                actual: slice.len(),
            })?;
        Ok(Self(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self, KeyFormatError> {
        let bytes = hex::decode(strip_hex_prefix(s))
            .map_err(|_| KeyFormatError::InvalidHex { kind: "public key" })?;
        Self::try_from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// `SHA-512(public_key)[..32]`.
    pub fn to_address(&self) -> Address {
        Address::from_public_key_bytes(&self.0)
    }

    /// Decompresses into a dalek verifying key.
    ///
    /// Small-order points are refused along with non-points: a signature
    /// under such a key can be valid for every message.
    pub fn to_verifying_key(&self) -> Result<VerifyingKey, CryptoError> {
        let key = VerifyingKey::from_bytes(&self.0).map_err(|_| CryptoError::MalformedPublicKey)?;
        if key.is_weak() {
            return Err(CryptoError::MalformedPublicKey);
        }
        Ok(key)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..18])
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            <[u8; PUBLIC_KEY_LENGTH]>::deserialize(deserializer).map(Self)
        }
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A 64-byte Ed25519 signature.
///
/// Held as two 32-byte halves, which is how the ledger node's signature
/// struct is laid out. On the wire that is still 64 contiguous bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    part1: [u8; 32],
    part2: [u8; 32],
}

impl Signature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        let mut part1 = [0u8; 32];
        let mut part2 = [0u8; 32];
        part1.copy_from_slice(&bytes[..32]);
        part2.copy_from_slice(&bytes[32..]);
        Self { part1, part2 }
    }

    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyFormatError> {
        let bytes: [u8; SIGNATURE_LENGTH] =
            slice.try_into().map_err(|_| KeyFormatError::InvalidLength {
                kind: "signature",
                expected: SIGNATURE_LENGTH,
                actual: slice.len(),
            })?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self, KeyFormatError> {
        let bytes = hex::decode(strip_hex_prefix(s))
            .map_err(|_| KeyFormatError::InvalidHex { kind: "signature" })?;
        Self::try_from_slice(&bytes)
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.part1);
        out[32..].copy_from_slice(&self.part2);
        out
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    pub(crate) fn to_dalek(self) -> ed25519_dalek::Signature {
        ed25519_dalek::Signature::from_bytes(&self.to_bytes())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = hex::encode(self.to_bytes());
        write!(f, "Signature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            (self.part1, self.part2).serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            let (part1, part2) = <([u8; 32], [u8; 32])>::deserialize(deserializer)?;
            Ok(Self { part1, part2 })
        }
    }
}
