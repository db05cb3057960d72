//! Packed action names.
//!
//! The ledger identifies an action by a short lowercase name packed into a
//! `u64`: up to 12 characters from a 32-symbol alphabet, 5 bits each, first
//! character most significant, right-padded with `_` (which packs to 0).
//! The 60 used bits sit at the bottom; the top 4 are always zero.

use thiserror::Error;

use crate::config::{NAME_CHAR_BITS, NAME_LENGTH};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("action name {name:?} is longer than {max} characters")]
    TooLong { name: String, max: usize },

    #[error("action name contains {ch:?}; allowed are '_', '1'-'5', 'a'-'z'")]
    InvalidChar { ch: char },

    #[error("packed name {code:#x} sets the unused high bits")]
    ReservedBits { code: u64 },

    #[error("no action is named {name:?}")]
    UnknownAction { name: String },
}

const fn char_value(c: u8) -> Option<u64> {
    match c {
        b'_' => Some(0),
        b'1'..=b'5' => Some((c - b'1' + 1) as u64),
        b'a'..=b'z' => Some((c - b'a' + 6) as u64),
        _ => None,
    }
}

const fn value_char(v: u64) -> u8 {
    match v {
        0 => b'_',
        1..=5 => b'1' + (v as u8 - 1),
        _ => b'a' + (v as u8 - 6),
    }
}

/// Bits actually occupied by 12 packed characters.
const USED_BITS: u32 = NAME_LENGTH as u32 * NAME_CHAR_BITS;

/// Packs ASCII bytes, or returns the index of the first byte outside the
/// alphabet. Callers check the length.
const fn try_pack(bytes: &[u8]) -> Result<u64, usize> {
    let mut code: u64 = 0;
    let mut i = 0;
    while i < NAME_LENGTH {
        let v = if i < bytes.len() {
            match char_value(bytes[i]) {
                Some(v) => v,
                None => return Err(i),
            }
        } else {
            0
        };
        code = (code << NAME_CHAR_BITS) | v;
        i += 1;
    }
    Ok(code)
}

/// [`pack`] for names known at compile time. A bad name fails the build.
pub(crate) const fn pack_const(name: &str) -> u64 {
    let bytes = name.as_bytes();
    assert!(bytes.len() <= NAME_LENGTH, "action name too long");
    match try_pack(bytes) {
        Ok(code) => code,
        Err(_) => panic!("action name outside the packing alphabet"),
    }
}

/// Packs `name` into its `u64` code.
pub fn pack(name: &str) -> Result<u64, NameError> {
    if name.len() > NAME_LENGTH {
        return Err(NameError::TooLong {
            name: name.to_string(),
            max: NAME_LENGTH,
        });
    }
    // Every byte before `i` is ASCII, so `i` is a char boundary.
    try_pack(name.as_bytes()).map_err(|i| NameError::InvalidChar {
        ch: name[i..].chars().next().unwrap_or('?'),
    })
}

/// Unpacks a `u64` code, dropping the `_` padding on the right.
pub fn unpack(code: u64) -> Result<String, NameError> {
    if code >> USED_BITS != 0 {
        return Err(NameError::ReservedBits { code });
    }
    let mask = (1u64 << NAME_CHAR_BITS) - 1;
    let mut out = String::with_capacity(NAME_LENGTH);
    for i in (0..NAME_LENGTH).rev() {
        let v = (code >> (i as u32 * NAME_CHAR_BITS)) & mask;
        out.push(value_char(v) as char);
    }
    Ok(out.trim_end_matches('_').to_string())
}
