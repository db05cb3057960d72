//! # Primitive Types
//!
//! Fixed-width values that every payload is built from. Each one has exactly
//! one binary encoding and one text encoding; both are part of the wire
//! contract with the ledger node.

pub mod bytes;
pub mod error;
pub mod u256;

pub use bytes::{Address, Digest, ObjectId, OrderId};
pub use error::FormatError;
pub use u256::U256;
