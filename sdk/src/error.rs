//! Crate-level error type.
//!
//! Each module returns its own narrow error. [`Error`] wraps all of them for
//! callers that just want `?` to work across the whole SDK.

use crate::action::NameError;
use crate::codec::{DecodeError, EncodeError};
use crate::crypto::{CryptoError, KeyFormatError};
use crate::submit::SubmitError;
use crate::transaction::ValidationError;
use crate::types::FormatError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    KeyFormat(#[from] KeyFormatError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Name(#[from] NameError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Convenience alias used across the SDK's public API.
pub type Result<T, E = Error> = std::result::Result<T, E>;
