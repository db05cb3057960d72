//! Errors raised while constructing primitive values.

use thiserror::Error;

/// Malformed bytes, hex, or numeric text for a primitive type.
///
/// Always a caller bug. Nothing in the SDK retries on a `FormatError`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The input had the wrong number of bytes for a fixed-width type.
    #[error("invalid {kind} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The input was not valid hexadecimal.
    #[error("invalid {kind} hex: {reason}")]
    InvalidHex { kind: &'static str, reason: String },

    /// The input was not a valid unsigned decimal number.
    #[error("invalid {kind} decimal: {input:?}")]
    InvalidDecimal { kind: &'static str, input: String },

    /// The value does not fit in the target width.
    #[error("{kind} overflow")]
    Overflow { kind: &'static str },
}

/// Strips an optional `0x` / `0X` prefix.
pub(crate) fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_both_prefix_cases() {
        assert_eq!(strip_hex_prefix("0xabcd"), "abcd");
        assert_eq!(strip_hex_prefix("0Xabcd"), "abcd");
        assert_eq!(strip_hex_prefix("abcd"), "abcd");
        assert_eq!(strip_hex_prefix(""), "");
    }

    #[test]
    fn length_error_message_names_the_type() {
        let err = FormatError::InvalidLength {
            kind: "address",
            expected: 32,
            actual: 31,
        };
        assert_eq!(
            err.to_string(),
            "invalid address length: expected 32 bytes, got 31"
        );
    }
}
