//! # Cryptographic Primitives
//!
//! Ed25519 for signatures, SHA-256 for transaction digests, SHA-512 for
//! address derivation. Every function here is a thin, typed wrapper around
//! `ed25519-dalek` and `sha2`. Nothing is hand-rolled.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{sha256, sha256_array, sha512_array};
pub use keys::{KeyFormatError, Keypair, PublicKey, Signature, Signer};
pub use signatures::{sign_checked, verify, CryptoError};
