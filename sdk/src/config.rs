//! # Protocol Constants
//!
//! Every fixed number the wire contract depends on lives here. These values
//! are shared with the remote node; changing any of them changes every
//! digest the SDK produces, so they move only together with a protocol
//! version bump.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// SDK version string, kept in step with the crate version.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wire layout revision implemented by this crate. Bumped whenever the tag
/// table, field order, or primitive encodings change.
pub const WIRE_VERSION: u16 = 1;

// ---------------------------------------------------------------------------
// Primitive Widths
// ---------------------------------------------------------------------------

/// Account address length in bytes.
pub const ADDRESS_LENGTH: usize = 32;

/// Ledger object identifier length in bytes.
pub const OBJECT_ID_LENGTH: usize = 32;

/// Order identifier length in bytes.
pub const ORDER_ID_LENGTH: usize = 32;

/// Transaction digest length in bytes (SHA-256 output).
pub const DIGEST_LENGTH: usize = 32;

/// Fixed width of a `U256` in its canonical encoding.
pub const U256_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 secret key length in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Transaction Limits
// ---------------------------------------------------------------------------

/// Expiration sentinel meaning "never expires".
pub const NEVER_EXPIRES: u64 = u64::MAX;

/// Upper bound on an encoded transaction accepted by the decoder. Guards
/// against hostile length prefixes allocating unbounded memory.
pub const MAX_TRANSACTION_BYTES: u64 = 1024 * 1024;

// ---------------------------------------------------------------------------
// Action Names
// ---------------------------------------------------------------------------

/// Maximum characters in a packed action name.
pub const NAME_LENGTH: usize = 12;

/// Bits used per name character. 12 * 5 = 60 bits, which fits a `u64`.
pub const NAME_CHAR_BITS: u32 = 5;

// ---------------------------------------------------------------------------
// Well-known Contracts
// ---------------------------------------------------------------------------

/// Raw bytes of the token module contract address (`0x01` then zeros).
pub const TOKEN_CONTRACT_BYTES: [u8; ADDRESS_LENGTH] = {
    let mut bytes = [0u8; ADDRESS_LENGTH];
    bytes[0] = 0x01;
    bytes
};

/// Raw bytes of the spot market module contract address (`0x02` then zeros).
pub const SPOT_CONTRACT_BYTES: [u8; ADDRESS_LENGTH] = {
    let mut bytes = [0u8; ADDRESS_LENGTH];
    bytes[0] = 0x02;
    bytes
};
