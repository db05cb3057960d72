//! Transaction signing and the signed wire form.
//!
//! Signing is its own step because the key may not be around when the
//! transaction is built (hardware wallet, remote signer). Whatever does the
//! signing, the result is checked against the digest before a
//! [`SignedTransaction`] exists, so an unverifiable one can never be handed
//! to a submission channel.

use serde::Serialize;
use tracing::{debug, warn};

use super::builder::Transaction;
use crate::codec::DecodeError;
use crate::config::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use crate::crypto::{self, sign_checked, CryptoError, PublicKey, Signature, Signer};
use crate::types::error::strip_hex_prefix;
use crate::types::{Address, Digest};

/// Bytes appended after the transaction payload: public key then signature.
const TRAILER_LENGTH: usize = PUBLIC_KEY_LENGTH + SIGNATURE_LENGTH;

/// Signs `tx` with `signer` and verifies the result.
///
/// The signer does not have to own the sender address; the node decides
/// whether that is allowed. A mismatch is logged, not refused.
pub fn sign_transaction<S: Signer + ?Sized>(
    tx: Transaction,
    signer: &S,
) -> Result<SignedTransaction, CryptoError> {
    let signer_address = signer.address();
    if signer_address != tx.sender() {
        warn!(
            sender = %tx.sender(),
            signer = %signer_address,
            "signer address differs from transaction sender"
        );
    }

    let (public_key, signature) = sign_checked(signer, tx.digest())?;
    debug!(digest = %tx.digest(), signer = %signer_address, "signed transaction");

    Ok(SignedTransaction {
        transaction: tx,
        public_key,
        signature,
    })
}

/// A transaction plus the signature over its digest.
///
/// Only produced by signing (which verifies) or decoding (which verifies
/// again), and immutable afterwards.
///
/// # Wire format
///
/// ```text
/// transaction payload   see Transaction
/// public key            32 bytes
/// signature             64 bytes
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedTransaction {
    transaction: Transaction,
    public_key: PublicKey,
    signature: Signature,
}

impl SignedTransaction {
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn digest(&self) -> &Digest {
        self.transaction.digest()
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Address derived from the embedded public key.
    pub fn signer_address(&self) -> Address {
        self.public_key.to_address()
    }

    /// Re-checks the signature against the digest.
    pub fn verify(&self) -> Result<bool, CryptoError> {
        crypto::verify(self.digest(), &self.signature, &self.public_key)
    }

    pub fn encoded_len(&self) -> usize {
        self.transaction.as_bytes().len() + TRAILER_LENGTH
    }

    /// The bytes handed to the submission channel.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(self.transaction.as_bytes());
        out.extend_from_slice(self.public_key.as_bytes());
        out.extend_from_slice(&self.signature.to_bytes());
        out
    }

    /// `0x`-prefixed hex of [`encode`](Self::encode).
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.encode()))
    }

    /// Parses the signed wire form, recomputes the digest, and verifies the
    /// signature. Anything that does not verify is an error.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let split = bytes.len().checked_sub(TRAILER_LENGTH).ok_or_else(|| {
            DecodeError::Malformed(format!(
                "signed transaction is {} bytes, shorter than its {TRAILER_LENGTH}-byte trailer",
                bytes.len()
            ))
        })?;
        let (payload, trailer) = bytes.split_at(split);
        let (pk_bytes, sig_bytes) = trailer.split_at(PUBLIC_KEY_LENGTH);

        let transaction = Transaction::decode(payload)?;
        let public_key = PublicKey::try_from_slice(pk_bytes)
            .map_err(|e| DecodeError::Malformed(e.to_string()))?;
        let signature =
            Signature::try_from_slice(sig_bytes).map_err(|e| DecodeError::Malformed(e.to_string()))?;

        let signed = Self {
            transaction,
            public_key,
            signature,
        };
        if !signed.verify()? {
            return Err(CryptoError::VerificationFailed.into());
        }
        Ok(signed)
    }

    /// [`decode`](Self::decode) from hex, `0x` optional.
    pub fn from_hex(s: &str) -> Result<Self, DecodeError> {
        let bytes = hex::decode(strip_hex_prefix(s.trim()))
            .map_err(|e| DecodeError::Malformed(format!("invalid hex: {e}")))?;
        Self::decode(&bytes)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, SplitParams};
    use crate::crypto::Keypair;
    use crate::transaction::TransactionBuilder;
    use crate::types::{ObjectId, U256};

    fn keypair() -> Keypair {
        Keypair::from_seed(&[0x42; 32])
    }

    fn unsigned(sender: Address) -> Transaction {
        TransactionBuilder::new()
            .sender(sender)
            .never_expires()
            .add_action(Action::split_balance(
                Address::TOKEN_CONTRACT,
                ObjectId::new([0x33; 32]),
                SplitParams {
                    amount: U256::from_u64(1_000),
                },
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn signing_produces_verifiable_transaction() {
        let kp = keypair();
        let signed = sign_transaction(unsigned(kp.address()), &kp).unwrap();
        assert_eq!(signed.verify(), Ok(true));
        assert_eq!(signed.signer_address(), kp.address());
        assert_eq!(signed.public_key(), &kp.public_key());
    }

    #[test]
    fn signing_does_not_change_digest() {
        let kp = keypair();
        let tx = unsigned(kp.address());
        let digest_before = *tx.digest();
        let signed = sign_transaction(tx, &kp).unwrap();
        assert_eq!(signed.digest(), &digest_before);
    }

    #[test]
    fn foreign_sender_still_signs() {
        let kp = keypair();
        let signed = sign_transaction(unsigned(Address::new([0x01; 32])), &kp).unwrap();
        assert_ne!(signed.signer_address(), signed.transaction().sender());
        assert_eq!(signed.verify(), Ok(true));
    }

    #[test]
    fn encoded_layout_appends_key_and_signature() {
        let kp = keypair();
        let signed = sign_transaction(unsigned(kp.address()), &kp).unwrap();
        let bytes = signed.encode();
        let payload_len = signed.transaction().as_bytes().len();
        assert_eq!(bytes.len(), payload_len + 96);
        assert_eq!(&bytes[payload_len..payload_len + 32], kp.public_key().as_bytes());
        assert_eq!(&bytes[payload_len + 32..], &signed.signature().to_bytes());
    }

    #[test]
    fn decode_roundtrip_through_hex() {
        let kp = keypair();
        let signed = sign_transaction(unsigned(kp.address()), &kp).unwrap();
        let decoded = SignedTransaction::from_hex(&signed.to_hex()).unwrap();
        assert_eq!(decoded, signed);
    }

    #[test]
    fn decode_rejects_tampered_payload() {
        let kp = keypair();
        let signed = sign_transaction(unsigned(kp.address()), &kp).unwrap();
        let mut bytes = signed.encode();
        // Last byte of the split amount.
        let idx = signed.transaction().as_bytes().len() - 1;
        bytes[idx] ^= 0x01;
        assert_eq!(
            SignedTransaction::decode(&bytes),
            Err(DecodeError::Signature(CryptoError::VerificationFailed))
        );
    }

    #[test]
    fn decode_rejects_tampered_signature() {
        let kp = keypair();
        let signed = sign_transaction(unsigned(kp.address()), &kp).unwrap();
        let mut bytes = signed.encode();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x80;
        assert!(SignedTransaction::decode(&bytes).is_err());
    }

    #[test]
    fn decode_rejects_short_input() {
        assert!(matches!(
            SignedTransaction::decode(&[0u8; 95]),
            Err(DecodeError::Malformed(_))
        ));
        assert!(matches!(
            SignedTransaction::from_hex("0xnothex"),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn json_view_carries_signature_and_key() {
        let kp = keypair();
        let signed = sign_transaction(unsigned(kp.address()), &kp).unwrap();
        let json = serde_json::to_value(&signed).unwrap();
        assert_eq!(json["public_key"], kp.public_key_hex());
        assert_eq!(json["signature"], signed.signature().to_hex());
        assert_eq!(json["transaction"]["digest"], signed.digest().to_hex());
    }
}
