//! # Hashing Utilities
//!
//! The two hash functions the ledger protocol uses, and nothing else:
//!
//! - **SHA-256** over the canonical transaction payload produces the
//!   [`Digest`](crate::types::Digest), which is both the transaction id and
//!   the Ed25519 signing input.
//! - **SHA-512** over a public key, truncated to 32 bytes, produces the
//!   account [`Address`](crate::types::Address).

use sha2::{Digest as _, Sha256, Sha512};

/// SHA-256 of `data` as a heap vector. Handy where the caller wants `&[u8]`.
pub fn sha256(data: &[u8]) -> Vec<u8> {
    sha256_array(data).to_vec()
}

/// SHA-256 of `data` as a fixed array.
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// SHA-512 of `data` as a fixed array.
pub fn sha512_array(data: &[u8]) -> [u8; 64] {
    let mut hasher = Sha512::new();
    hasher.update(data);
    let mut out = [0u8; 64];
    out.copy_from_slice(&hasher.finalize());
    out
}
