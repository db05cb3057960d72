//! # U256
//!
//! A 256-bit unsigned integer for token amounts and supplies.
//!
//! Arithmetic is checked only: nothing wraps. Overflow past `2^256 - 1` or
//! underflow below zero yields `None`, and the caller decides what that means.
//!
//! Canonical encoding is 32 bytes big-endian. Limbs are stored least
//! significant first so carries walk upward through the array.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::error::{strip_hex_prefix, FormatError};
use crate::config::U256_LENGTH;

const KIND: &str = "u256";

/// Largest power of ten that fits in a `u64`. Used to print decimals in chunks.
const TEN_POW_19: u64 = 10_000_000_000_000_000_000;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct U256([u64; 4]);

impl U256 {
    pub const ZERO: U256 = U256([0; 4]);
    pub const ONE: U256 = U256([1, 0, 0, 0]);
    pub const MAX: U256 = U256([u64::MAX; 4]);

    pub const fn from_u64(value: u64) -> Self {
        Self([value, 0, 0, 0])
    }

    pub const fn from_u128(value: u128) -> Self {
        Self([value as u64, (value >> 64) as u64, 0, 0])
    }

    /// Decodes the canonical 32-byte big-endian form.
    pub fn from_be_bytes(bytes: [u8; U256_LENGTH]) -> Self {
        let mut limbs = [0u64; 4];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let start = (3 - i) * 8;
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[start..start + 8]);
            *limb = u64::from_be_bytes(word);
        }
        Self(limbs)
    }

    /// Encodes to the canonical 32-byte big-endian form.
    pub fn to_be_bytes(&self) -> [u8; U256_LENGTH] {
        let mut bytes = [0u8; U256_LENGTH];
        for (i, limb) in self.0.iter().enumerate() {
            let start = (3 - i) * 8;
            bytes[start..start + 8].copy_from_slice(&limb.to_be_bytes());
        }
        bytes
    }

    /// Decodes a 32-byte big-endian slice. Any other length is a `FormatError`.
    pub fn from_be_slice(bytes: &[u8]) -> Result<Self, FormatError> {
        let arr: [u8; U256_LENGTH] = bytes.try_into().map_err(|_| FormatError::InvalidLength {
            kind: KIND,
            expected: U256_LENGTH,
            actual: bytes.len(),
        })?;
        Ok(Self::from_be_bytes(arr))
    }

    /// Parses a hex number, `0x` optional. Leading zeros are allowed and the
    /// digit count may be odd (`0x3e8` is 1000).
    pub fn from_hex(s: &str) -> Result<Self, FormatError> {
        let digits = strip_hex_prefix(s);
        if digits.is_empty() {
            return Err(FormatError::InvalidHex {
                kind: KIND,
                reason: "empty string".into(),
            });
        }
        let significant = digits.trim_start_matches('0');
        if significant.len() > U256_LENGTH * 2 {
            if significant.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(FormatError::Overflow { kind: KIND });
            }
            return Err(FormatError::InvalidHex {
                kind: KIND,
                reason: "non-hex character".into(),
            });
        }

        let padded = format!("{:0>width$}", significant, width = U256_LENGTH * 2);
        let mut bytes = [0u8; U256_LENGTH];
        hex::decode_to_slice(&padded, &mut bytes).map_err(|e| FormatError::InvalidHex {
            kind: KIND,
            reason: e.to_string(),
        })?;
        Ok(Self::from_be_bytes(bytes))
    }

    /// Parses an unsigned decimal number.
    pub fn from_dec_str(s: &str) -> Result<Self, FormatError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FormatError::InvalidDecimal {
                kind: KIND,
                input: s.to_string(),
            });
        }
        let ten = U256::from_u64(10);
        s.bytes().try_fold(U256::ZERO, |acc, b| {
            acc.checked_mul(ten)
                .and_then(|v| v.checked_add(U256::from_u64(u64::from(b - b'0'))))
                .ok_or(FormatError::Overflow { kind: KIND })
        })
    }

    /// `0x`-prefixed lowercase hex with leading zeros trimmed. Zero is `0x0`.
    pub fn to_hex(&self) -> String {
        format!("{:#x}", self)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; 4]
    }

    /// The value as a `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.0[1..] == [0; 3] {
            Some(self.0[0])
        } else {
            None
        }
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        let mut out = [0u64; 4];
        let mut carry = false;
        for (i, slot) in out.iter_mut().enumerate() {
            let (s1, c1) = self.0[i].overflowing_add(rhs.0[i]);
            let (s2, c2) = s1.overflowing_add(u64::from(carry));
            *slot = s2;
            carry = c1 || c2;
        }
        (!carry).then_some(Self(out))
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        let mut out = [0u64; 4];
        let mut borrow = false;
        for (i, slot) in out.iter_mut().enumerate() {
            let (d1, b1) = self.0[i].overflowing_sub(rhs.0[i]);
            let (d2, b2) = d1.overflowing_sub(u64::from(borrow));
            *slot = d2;
            borrow = b1 || b2;
        }
        (!borrow).then_some(Self(out))
    }

    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        // Schoolbook multiply into 512 bits, then require the high half be zero.
        let mut wide = [0u64; 8];
        for i in 0..4 {
            let mut carry: u128 = 0;
            for j in 0..4 {
                let cur = u128::from(wide[i + j])
                    + u128::from(self.0[i]) * u128::from(rhs.0[j])
                    + carry;
                wide[i + j] = cur as u64;
                carry = cur >> 64;
            }
            wide[i + 4] = carry as u64;
        }
        if wide[4..].iter().any(|&limb| limb != 0) {
            return None;
        }
        Some(Self([wide[0], wide[1], wide[2], wide[3]]))
    }

    /// Divides by a non-zero `u64`, returning quotient and remainder.
    fn div_rem_u64(self, divisor: u64) -> (Self, u64) {
        debug_assert!(divisor != 0);
        let divisor = u128::from(divisor);
        let mut out = [0u64; 4];
        let mut rem: u128 = 0;
        for i in (0..4).rev() {
            let cur = (rem << 64) | u128::from(self.0[i]);
            out[i] = (cur / divisor) as u64;
            rem = cur % divisor;
        }
        (Self(out), rem as u64)
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.iter().rev().cmp(other.0.iter().rev())
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<u128> for U256 {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl From<u32> for U256 {
    fn from(value: u32) -> Self {
        Self::from_u64(u64::from(value))
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.pad_integral(true, "", "0");
        }
        let mut chunks = Vec::with_capacity(4);
        let mut rest = *self;
        while !rest.is_zero() {
            let (q, r) = rest.div_rem_u64(TEN_POW_19);
            chunks.push(r);
            rest = q;
        }
        let mut out = String::with_capacity(chunks.len() * 19);
        let mut iter = chunks.iter().rev();
        if let Some(head) = iter.next() {
            out.push_str(&head.to_string());
        }
        for chunk in iter {
            out.push_str(&format!("{chunk:019}"));
        }
        f.pad_integral(true, "", &out)
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U256({self})")
    }
}

impl fmt::LowerHex for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full = hex::encode(self.to_be_bytes());
        let trimmed = full.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };
        f.pad_integral(true, "0x", digits)
    }
}

impl FromStr for U256 {
    type Err = FormatError;

    /// `0x`-prefixed input is hex. Anything else is decimal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("0x") || s.starts_with("0X") {
            Self::from_hex(s)
        } else {
            Self::from_dec_str(s)
        }
    }
}

impl Serialize for U256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            self.to_be_bytes().serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        } else {
            <[u8; U256_LENGTH]>::deserialize(deserializer).map(Self::from_be_bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_endian_layout() {
        let v = U256::from_u64(0x0102);
        let bytes = v.to_be_bytes();
        assert_eq!(bytes[30], 0x01);
        assert_eq!(bytes[31], 0x02);
        assert!(bytes[..30].iter().all(|&b| b == 0));
        assert_eq!(U256::from_be_bytes(bytes), v);
    }

    #[test]
    fn total_supply_encoding() {
        let supply = U256::from_u64(21_000_000_000_000);
        assert_eq!(
            hex::encode(supply.to_be_bytes()),
            format!("{}1319718a5000", "0".repeat(52))
        );
    }

    #[test]
    fn u128_spans_two_limbs() {
        let v = U256::from_u128(u128::MAX);
        let bytes = v.to_be_bytes();
        assert!(bytes[..16].iter().all(|&b| b == 0));
        assert!(bytes[16..].iter().all(|&b| b == 0xFF));
        assert_eq!(v.to_u64(), None);
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(U256::from_hex("0x3e8").unwrap(), U256::from_u64(1000));
        assert_eq!(U256::from_hex("3E8").unwrap(), U256::from_u64(1000));
        assert_eq!(U256::from_hex("0x0").unwrap(), U256::ZERO);
        assert_eq!(U256::from_hex(&"f".repeat(64)).unwrap(), U256::MAX);
        // Leading zeros beyond 64 digits are harmless.
        assert_eq!(
            U256::from_hex(&format!("00{}", "f".repeat(64))).unwrap(),
            U256::MAX
        );
    }

    #[test]
    fn hex_rejects_garbage_and_overflow() {
        assert!(matches!(
            U256::from_hex("0x"),
            Err(FormatError::InvalidHex { .. })
        ));
        assert!(matches!(
            U256::from_hex("0xzz"),
            Err(FormatError::InvalidHex { .. })
        ));
        assert_eq!(
            U256::from_hex(&format!("1{}", "0".repeat(64))),
            Err(FormatError::Overflow { kind: "u256" })
        );
    }

    #[test]
    fn decimal_parsing_and_display() {
        let max_dec =
            "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        assert_eq!(U256::from_dec_str(max_dec).unwrap(), U256::MAX);
        assert_eq!(U256::MAX.to_string(), max_dec);
        assert_eq!(U256::ZERO.to_string(), "0");
        assert_eq!(U256::from_u64(10_000_000_000_000_000_000).to_string(), "10000000000000000000");
        assert_eq!("12345".parse::<U256>().unwrap(), U256::from_u64(12345));
    }

    #[test]
    fn decimal_rejects_overflow_and_non_digits() {
        let too_big =
            "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert_eq!(
            U256::from_dec_str(too_big),
            Err(FormatError::Overflow { kind: "u256" })
        );
        assert!(matches!(
            U256::from_dec_str("-1"),
            Err(FormatError::InvalidDecimal { .. })
        ));
        assert!(matches!(
            U256::from_dec_str(""),
            Err(FormatError::InvalidDecimal { .. })
        ));
    }

    #[test]
    fn checked_arithmetic() {
        assert_eq!(U256::MAX.checked_add(U256::ONE), None);
        assert_eq!(U256::ZERO.checked_sub(U256::ONE), None);
        assert_eq!(
            U256::from_u64(u64::MAX).checked_add(U256::ONE).unwrap(),
            U256::from_u128(1u128 << 64)
        );
        let big = U256::from_u128(1u128 << 127);
        assert_eq!(big.checked_mul(U256::from_u64(4)).unwrap().to_hex(), format!("0x2{}", "0".repeat(32)));
        assert_eq!(U256::MAX.checked_mul(U256::from_u64(2)), None);
        assert_eq!(
            U256::from_u128(1u128 << 64).checked_sub(U256::ONE).unwrap(),
            U256::from_u64(u64::MAX)
        );
    }

    #[test]
    fn ordering_is_numeric() {
        let small = U256::from_u64(u64::MAX);
        let large = U256::from_u128(1u128 << 64);
        assert!(small < large);
        assert!(U256::MAX > large);
        assert_eq!(U256::ONE.cmp(&U256::ONE), Ordering::Equal);
    }

    #[test]
    fn hex_text_form() {
        assert_eq!(U256::ZERO.to_hex(), "0x0");
        assert_eq!(U256::from_u64(255).to_hex(), "0xff");
    }

    #[test]
    fn serde_forms() {
        let v = U256::from_u64(42);
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"42\"");
        let back: U256 = serde_json::from_str("\"0x2a\"").unwrap();
        assert_eq!(back, v);
        let raw = bincode::serialize(&v).unwrap();
        assert_eq!(raw.len(), 32);
        assert_eq!(raw[31], 42);
    }
}
