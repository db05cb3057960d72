//! # Digital Signatures
//!
//! Ed25519 signing and verification over transaction digests.
//!
//! Two outcomes are kept apart on purpose. A signature that simply does not
//! match is `Ok(false)`, an ordinary answer. Bytes that are not a usable
//! public key at all are `Err(CryptoError)`, because something upstream is
//! broken.

use thiserror::Error;

use super::keys::{PublicKey, Signature, Signer};
use crate::types::Digest;

/// Signing or verification could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("malformed public key: not a valid Ed25519 point")]
    MalformedPublicKey,

    #[error("signature failed local verification")]
    VerificationFailed,

    /// An external [`Signer`] implementation reported a failure.
    #[error("signer failed: {0}")]
    Signer(String),
}

/// Verifies `signature` over the digest bytes.
///
/// Uses strict RFC 8032 checking: non-canonical `S` and a small-order `R`
/// do not verify. Returns `Ok(false)` for a signature that does not verify
/// and `Err(CryptoError::MalformedPublicKey)` when the key is not a curve
/// point or has small order.
pub fn verify(
    digest: &Digest,
    signature: &Signature,
    public_key: &PublicKey,
) -> Result<bool, CryptoError> {
    let verifying_key = public_key.to_verifying_key()?;
    Ok(verifying_key
        .verify_strict(digest.as_bytes(), &signature.to_dalek())
        .is_ok())
}

/// Signs `digest` with `signer` and checks the result before handing it back.
///
/// A signature that does not verify against the signer's own public key is
/// a hard [`CryptoError::VerificationFailed`]. Nothing unverified escapes.
pub fn sign_checked<S: Signer + ?Sized>(
    signer: &S,
    digest: &Digest,
) -> Result<(PublicKey, Signature), CryptoError> {
    let public_key = signer.public_key();
    let signature = signer.sign_digest(digest)?;
    if !verify(digest, &signature, &public_key)? {
        return Err(CryptoError::VerificationFailed);
    }
    Ok((public_key, signature))
}
