//! # Transaction Module
//!
//! Construction, canonical encoding, and signing of LightPool transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs    : Expiration and other transaction value types
//! builder.rs  : TransactionBuilder and the unsigned Transaction
//! signing.rs  : sign_transaction and the SignedTransaction wire form
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: [`TransactionBuilder`] fixes sender, expiration, and the
//!    ordered actions, and computes the digest.
//! 2. **Sign**: [`sign_transaction`] (or
//!    [`TransactionBuilder::build_and_sign`]) signs the digest and verifies
//!    the signature locally.
//! 3. **Submit**: hand the [`SignedTransaction`] to
//!    [`crate::submit::submit`].
//!
//! There is no nonce and no fee field. Replay protection is the
//! expiration plus the node's digest tracking.

pub mod builder;
pub mod signing;
pub mod types;

pub use builder::{Transaction, TransactionBuilder, ValidationError};
pub use signing::{sign_transaction, SignedTransaction};
pub use types::Expiration;
