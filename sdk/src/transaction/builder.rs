//! Transaction construction via the builder pattern.
//!
//! The [`TransactionBuilder`] collects a sender, an expiration, and an
//! ordered list of actions, then `.build()` turns them into an unsigned
//! [`Transaction`] whose digest is fixed at that moment.
//!
//! The builder does not sign. That happens in [`super::signing`], so
//! construction stays testable without key material.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::signing::{sign_transaction, SignedTransaction};
use super::types::Expiration;
use crate::action::{Action, WireAction};
use crate::codec::{self, DecodeError, EncodeError};
use crate::crypto::Signer;
use crate::error;
use crate::types::{Address, Digest};

/// The builder was asked to build something the node could never accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("transaction has no actions")]
    NoActions,

    #[error("transaction sender is not set")]
    MissingSender,

    #[error("transaction expiration is not set")]
    MissingExpiration,

    /// Zero would mean "expired at the Unix epoch". Use `Expiration::NEVER`
    /// for a transaction that does not expire.
    #[error("expiration 0 is not a usable deadline")]
    ExpiredAtEpoch,

    #[error("cannot encode transaction: {0}")]
    Encode(#[from] EncodeError),
}

// ---------------------------------------------------------------------------
// Wire payload
// ---------------------------------------------------------------------------

/// `sender · expiration · action count · actions`, borrowed for encoding.
#[derive(Serialize)]
struct PayloadRef<'a> {
    sender: &'a Address,
    expiration: Expiration,
    actions: &'a [WireAction],
}

#[derive(Deserialize)]
struct Payload {
    sender: Address,
    expiration: Expiration,
    actions: Vec<WireAction>,
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// An unsigned LightPool transaction.
///
/// Immutable. The canonical bytes and the digest are computed once, when the
/// transaction is built or decoded, and cannot drift from the fields after.
///
/// # Canonical Byte Format
///
/// ```text
/// sender      32 bytes
/// expiration  u64 LE, milliseconds since epoch, u64::MAX = never
/// count       u64 LE
/// actions     each framed as in crate::action
/// ```
///
/// `digest = SHA-256(canonical bytes)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    sender: Address,
    expiration: Expiration,
    actions: Vec<Action>,
    digest: Digest,
    #[serde(skip)]
    payload: Vec<u8>,
}

impl Transaction {
    fn from_parts(
        sender: Address,
        expiration: Expiration,
        actions: Vec<Action>,
    ) -> Result<Self, ValidationError> {
        if actions.is_empty() {
            return Err(ValidationError::NoActions);
        }
        if expiration.as_millis() == 0 {
            return Err(ValidationError::ExpiredAtEpoch);
        }

        let wire = actions
            .iter()
            .map(Action::to_wire)
            .collect::<Result<Vec<_>, _>>()?;
        let payload = codec::encode(&PayloadRef {
            sender: &sender,
            expiration,
            actions: &wire,
        })?;
        let digest = Digest::of(&payload);

        Ok(Self {
            sender,
            expiration,
            actions,
            digest,
            payload,
        })
    }

    pub fn sender(&self) -> Address {
        self.sender
    }

    pub fn expiration(&self) -> Expiration {
        self.expiration
    }

    /// Actions in execution order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// SHA-256 of the canonical bytes. Also the transaction id.
    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// The canonical bytes, borrowed.
    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }

    /// The canonical bytes the digest was computed over.
    pub fn encode(&self) -> Vec<u8> {
        self.payload.clone()
    }

    /// Parses canonical bytes and recomputes the digest.
    ///
    /// The result passes the same checks as a freshly built transaction.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let Payload {
            sender,
            expiration,
            actions,
        } = codec::decode(bytes)?;
        let actions = actions
            .into_iter()
            .map(Action::from_wire)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_parts(sender, expiration, actions)?)
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for unsigned [`Transaction`]s.
///
/// Sender and expiration are required; there is no default expiry, so
/// "never expires" has to be asked for. Actions run on the node in the
/// order they were added.
///
/// ```
/// use lightpool_sdk::action::{Action, SplitParams};
/// use lightpool_sdk::transaction::{Expiration, TransactionBuilder};
/// use lightpool_sdk::types::{Address, ObjectId, U256};
///
/// let tx = TransactionBuilder::new()
///     .sender(Address::new([0xAA; 32]))
///     .expiration(Expiration::NEVER)
///     .add_action(Action::split_balance(
///         Address::TOKEN_CONTRACT,
///         ObjectId::new([0x01; 32]),
///         SplitParams { amount: U256::from_u64(10) },
///     ))
///     .build()
///     .unwrap();
/// assert_eq!(tx.actions().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    sender: Option<Address>,
    expiration: Option<Expiration>,
    actions: Vec<Action>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sender(mut self, sender: Address) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn expiration(mut self, expiration: Expiration) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Shorthand for `.expiration(Expiration::NEVER)`.
    pub fn never_expires(self) -> Self {
        self.expiration(Expiration::NEVER)
    }

    /// Appends one action after any already added.
    pub fn add_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Appends several actions, keeping their order.
    pub fn add_actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions.extend(actions);
        self
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Produces the unsigned transaction. The builder is left untouched,
    /// so the same state can be built again and gives the same digest.
    pub fn build(&self) -> Result<Transaction, ValidationError> {
        let sender = self.sender.ok_or(ValidationError::MissingSender)?;
        let expiration = self.expiration.ok_or(ValidationError::MissingExpiration)?;
        let tx = Transaction::from_parts(sender, expiration, self.actions.clone())?;

        debug!(
            digest = %tx.digest,
            actions = tx.actions.len(),
            bytes = tx.payload.len(),
            "built transaction"
        );
        Ok(tx)
    }

    /// [`build`](Self::build), sign the digest, and verify the signature
    /// locally before returning it.
    pub fn build_and_sign<S: Signer + ?Sized>(
        &self,
        signer: &S,
    ) -> Result<SignedTransaction, error::Error> {
        let tx = self.build()?;
        Ok(sign_transaction(tx, signer)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{CreateTokenParams, OrderSide, PlaceOrderParams, TimeInForce};
    use crate::types::{ObjectId, U256};

    const SCENARIO_DIGEST: &str =
        "0xdcce4d5c66860c70985c41edfd0a529efe2cdf96f9afbbc15a65bbbff15c67d6";

    fn sender() -> Address {
        Address::new([0xAA; 32])
    }

    fn create_token() -> Action {
        Action::create_token(
            Address::TOKEN_CONTRACT,
            CreateTokenParams {
                name: "Bitcoin".into(),
                symbol: "BTC".into(),
                decimals: 6,
                total_supply: U256::from_u64(21_000_000_000_000),
                mintable: true,
                to: sender(),
            },
        )
    }

    fn place_order() -> Action {
        Action::place_order(
            Address::SPOT_CONTRACT,
            ObjectId::new([0x11; 32]),
            ObjectId::new([0x22; 32]),
            PlaceOrderParams::limit(OrderSide::Sell, 5_000_000, 50_000_000_000, TimeInForce::Gtc),
        )
    }

    fn base() -> TransactionBuilder {
        TransactionBuilder::new().sender(sender()).never_expires()
    }

    #[test]
    fn scenario_digest_is_pinned() {
        let tx = base().add_action(create_token()).build().unwrap();
        assert_eq!(tx.digest().to_hex(), SCENARIO_DIGEST);
        assert_eq!(tx.as_bytes().len(), 32 + 8 + 8 + 148);
    }

    #[test]
    fn payload_header_layout() {
        let tx = base().add_action(create_token()).build().unwrap();
        let bytes = tx.encode();
        assert_eq!(&bytes[..32], &[0xAA; 32]);
        assert_eq!(&bytes[32..40], &[0xFF; 8]);
        assert_eq!(&bytes[40..48], &1u64.to_le_bytes());
        assert_eq!(&bytes[48..], create_token().encode().unwrap().as_slice());
    }

    #[test]
    fn building_twice_is_deterministic() {
        let builder = base().add_action(create_token()).add_action(place_order());
        let a = builder.build().unwrap();
        let b = builder.build().unwrap();
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a, b);
    }

    #[test]
    fn action_order_changes_digest() {
        let forward = base()
            .add_action(create_token())
            .add_action(place_order())
            .build()
            .unwrap();
        let reversed = base()
            .add_action(place_order())
            .add_action(create_token())
            .build()
            .unwrap();
        assert_ne!(forward.digest(), reversed.digest());
    }

    #[test]
    fn actions_are_concatenated_in_call_order() {
        let tx = base()
            .add_actions([create_token(), place_order()])
            .build()
            .unwrap();
        let bytes = tx.encode();
        assert_eq!(&bytes[40..48], &2u64.to_le_bytes());
        let first = create_token().encode().unwrap();
        let second = place_order().encode().unwrap();
        assert_eq!(&bytes[48..48 + first.len()], first.as_slice());
        assert_eq!(&bytes[48 + first.len()..], second.as_slice());
    }

    #[test]
    fn rejects_missing_pieces() {
        assert_eq!(base().build(), Err(ValidationError::NoActions));
        assert_eq!(
            TransactionBuilder::new()
                .never_expires()
                .add_action(create_token())
                .build(),
            Err(ValidationError::MissingSender)
        );
        assert_eq!(
            TransactionBuilder::new()
                .sender(sender())
                .add_action(create_token())
                .build(),
            Err(ValidationError::MissingExpiration)
        );
    }

    #[test]
    fn rejects_epoch_expiration() {
        let result = base()
            .expiration(Expiration::at_millis(0))
            .add_action(create_token())
            .build();
        assert_eq!(result, Err(ValidationError::ExpiredAtEpoch));
    }

    #[test]
    fn past_expiration_is_carried_as_given() {
        let tx = base()
            .expiration(Expiration::at_millis(1))
            .add_action(create_token())
            .build()
            .unwrap();
        assert_eq!(tx.expiration().as_millis(), 1);
    }

    #[test]
    fn invalid_action_surfaces_as_encode_error() {
        let lonely = Action::merge_balance(Address::TOKEN_CONTRACT, ObjectId::default(), vec![]);
        assert!(matches!(
            base().add_action(lonely).build(),
            Err(ValidationError::Encode(EncodeError::InputCount { .. }))
        ));
    }

    #[test]
    fn decode_recomputes_digest() {
        let tx = base()
            .add_action(create_token())
            .add_action(place_order())
            .build()
            .unwrap();
        let decoded = Transaction::decode(tx.as_bytes()).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(
            decoded.digest().to_hex(),
            "0x7148f30a05108ba22c43f401259ab9389e42a0884a28e33852bbde6fdd41bbe5"
        );
    }

    #[test]
    fn decode_rejects_empty_action_list() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&[0xAA; 32]);
        bytes.extend_from_slice(&u64::MAX.to_le_bytes());
        bytes.extend_from_slice(&0u64.to_le_bytes());
        assert_eq!(
            Transaction::decode(&bytes),
            Err(DecodeError::Invalid(ValidationError::NoActions))
        );
    }

    #[test]
    fn json_view_uses_hex() {
        let tx = base().add_action(create_token()).build().unwrap();
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["digest"], SCENARIO_DIGEST);
        assert_eq!(json["sender"], sender().to_hex());
        assert_eq!(json["expiration"], u64::MAX);
        assert!(json.get("payload").is_none());
    }
}
