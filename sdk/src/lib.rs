//! # LightPool SDK
//!
//! Builds, encodes, and signs transactions for the LightPool ledger.
//!
//! Every client of the ledger, in any language, has to produce the same
//! bytes for the same logical transaction, or its signatures will not
//! verify on the node. This crate is that byte-exact core: it knows the
//! action catalog, the canonical layout, the digest, and the signature
//! scheme. It does not know about HTTP, retries, or order books.
//!
//! ## Architecture
//!
//! Data flows one way, leaf modules first:
//!
//! - **types**: addresses, object ids, order ids, digests, `U256`.
//! - **crypto**: Ed25519 keypairs and the [`Signer`] capability.
//! - **codec**: the single bincode configuration all bytes go through.
//! - **action**: the closed catalog of ledger operations and their framing.
//! - **transaction**: the builder, the digest, and the signed wire form.
//! - **submit**: the contract for handing a signed transaction to a transport.
//! - **config**: protocol constants shared with the node.
//!
//! ## Example
//!
//! ```
//! use lightpool_sdk::action::{Action, CreateTokenParams};
//! use lightpool_sdk::crypto::Keypair;
//! use lightpool_sdk::transaction::TransactionBuilder;
//! use lightpool_sdk::types::{Address, U256};
//!
//! let signer = Keypair::generate();
//! let signed = TransactionBuilder::new()
//!     .sender(signer.address())
//!     .never_expires()
//!     .add_action(Action::create_token(
//!         Address::TOKEN_CONTRACT,
//!         CreateTokenParams {
//!             name: "Bitcoin".into(),
//!             symbol: "BTC".into(),
//!             decimals: 6,
//!             total_supply: U256::from_u64(21_000_000_000_000),
//!             mintable: true,
//!             to: signer.address(),
//!         },
//!     ))
//!     .build_and_sign(&signer)
//!     .unwrap();
//!
//! assert_eq!(signed.verify(), Ok(true));
//! ```

pub mod action;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod submit;
pub mod transaction;
pub mod types;

pub use action::{Action, ActionKind};
pub use crypto::{Keypair, PublicKey, Signature, Signer};
pub use error::{Error, Result};
pub use submit::{submit, Receipt, SubmissionChannel, SubmitError};
pub use transaction::{
    Expiration, SignedTransaction, Transaction, TransactionBuilder, ValidationError,
};
pub use types::{Address, Digest, ObjectId, OrderId, U256};
