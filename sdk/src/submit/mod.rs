//! # Submission Boundary
//!
//! The one outward call the SDK makes: hand a [`SignedTransaction`] to some
//! transport and get a [`Receipt`] back.
//!
//! The transport lives outside this crate (the `lightpool` CLI ships an
//! HTTP JSON-RPC one). This module only fixes the contract:
//!
//! - nothing unverified is ever handed over,
//! - the receipt must be for the digest that was sent,
//! - "the node said no" and "the bytes never arrived" are different errors.
//!
//! Retries and backoff belong to the caller. A [`SubmitError::Transport`]
//! may be retried with the same bytes; a [`SubmitError::Rejected`] needs a
//! rebuilt transaction and so a new digest.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::crypto::CryptoError;
use crate::transaction::SignedTransaction;
use crate::types::Digest;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The node received the transaction and refused it.
    #[error("transaction {digest:?} rejected: {reason}")]
    Rejected {
        digest: Option<Digest>,
        reason: String,
    },

    /// The transaction may never have reached the node.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The node answered for a different transaction.
    #[error("receipt digest {actual} does not match submitted digest {expected}")]
    DigestMismatch { expected: Digest, actual: Digest },

    /// Refused locally: the signature did not verify.
    #[error("refusing to submit unverified transaction: {0}")]
    Unverified(#[from] CryptoError),
}

impl SubmitError {
    /// Whether resending the same signed bytes could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmitError::Transport(_))
    }
}

/// An opaque event emitted while the node executed the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

/// What the node reported back for one submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub digest: Digest,
    pub success: bool,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Receipt {
    /// Events of one kind, in emission order.
    pub fn events_of<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Event> + 'a {
        self.events.iter().filter(move |e| e.kind == kind)
    }
}

/// A transport that delivers signed transactions to a ledger node.
///
/// Implementations must not retry on their own, and must report a node-side
/// refusal as [`SubmitError::Rejected`] and anything else as
/// [`SubmitError::Transport`].
#[async_trait]
pub trait SubmissionChannel: Send + Sync {
    async fn submit(&self, tx: &SignedTransaction) -> Result<Receipt, SubmitError>;
}

/// Submits `tx` through `channel`.
///
/// Re-verifies the signature first, checks the receipt is for this digest,
/// and turns an unsuccessful receipt into [`SubmitError::Rejected`].
pub async fn submit<C: SubmissionChannel + ?Sized>(
    channel: &C,
    tx: &SignedTransaction,
) -> Result<Receipt, SubmitError> {
    if !tx.verify()? {
        return Err(CryptoError::VerificationFailed.into());
    }

    debug!(
        digest = %tx.digest(),
        bytes = tx.encoded_len(),
        "submitting transaction"
    );
    let receipt = channel.submit(tx).await?;

    if receipt.digest != *tx.digest() {
        return Err(SubmitError::DigestMismatch {
            expected: *tx.digest(),
            actual: receipt.digest,
        });
    }
    if !receipt.success {
        let reason = receipt
            .error
            .clone()
            .unwrap_or_else(|| "execution failed".to_string());
        warn!(digest = %receipt.digest, %reason, "transaction rejected");
        return Err(SubmitError::Rejected {
            digest: Some(receipt.digest),
            reason,
        });
    }

    debug!(digest = %receipt.digest, events = receipt.events.len(), "transaction accepted");
    Ok(receipt)
}
