//! Value types used by transactions.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::config::NEVER_EXPIRES;

// ---------------------------------------------------------------------------
// Expiration
// ---------------------------------------------------------------------------

/// Absolute expiry of a transaction, in milliseconds since the Unix epoch.
///
/// `u64::MAX` is the "never expires" sentinel. The node owns clock policy;
/// the SDK only carries the value and never adjusts it after it is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Expiration(u64);

impl Expiration {
    pub const NEVER: Expiration = Expiration(NEVER_EXPIRES);

    pub const fn at_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub fn at(time: DateTime<Utc>) -> Self {
        Self(u64::try_from(time.timestamp_millis()).unwrap_or(0))
    }

    /// `ttl` from now, saturating at the sentinel.
    pub fn after(ttl: Duration) -> Self {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        Self(now.saturating_add(ttl_ms))
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    pub const fn is_never(self) -> bool {
        self.0 == NEVER_EXPIRES
    }

    /// Wall-clock form, or `None` for the sentinel and out-of-range values.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        if self.is_never() {
            return None;
        }
        let millis = i64::try_from(self.0).ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }
}

impl Default for Expiration {
    fn default() -> Self {
        Self::NEVER
    }
}

impl From<u64> for Expiration {
    fn from(millis: u64) -> Self {
        Self(millis)
    }
}

impl fmt::Display for Expiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_never() {
            return f.write_str("never");
        }
        match self.to_datetime() {
            Some(at) => write!(f, "{}", at.to_rfc3339()),
            None => write!(f, "{}ms", self.0),
        }
    }
}
