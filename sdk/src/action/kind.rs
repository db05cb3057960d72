//! The action tag table.
//!
//! Tags are packed action names (see [`super::name`]), computed at compile
//! time from [`ActionKind::name`]. They are wire constants; a test pins each
//! one to its literal value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::name::{self, NameError};
use crate::types::Address;

/// How many input objects a variant carries on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputArity {
    Exactly(usize),
    AtLeast(usize),
}

impl InputArity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            InputArity::Exactly(n) => count == n,
            InputArity::AtLeast(n) => count >= n,
        }
    }

    pub(crate) fn describe(self) -> &'static str {
        match self {
            InputArity::Exactly(0) => "no",
            InputArity::Exactly(1) => "exactly 1",
            InputArity::Exactly(2) => "exactly 2",
            InputArity::AtLeast(2) => "at least 2",
            InputArity::Exactly(_) | InputArity::AtLeast(_) => "a different number of",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CreateToken,
    Transfer,
    MintToken,
    SplitBalance,
    MergeBalance,
    CreateMarket,
    UpdateMarket,
    PlaceOrder,
    CancelOrder,
}

impl ActionKind {
    pub const ALL: [ActionKind; 9] = [
        ActionKind::CreateToken,
        ActionKind::Transfer,
        ActionKind::MintToken,
        ActionKind::SplitBalance,
        ActionKind::MergeBalance,
        ActionKind::CreateMarket,
        ActionKind::UpdateMarket,
        ActionKind::PlaceOrder,
        ActionKind::CancelOrder,
    ];

    /// Protocol name, as the node's module dispatcher knows it.
    pub const fn name(self) -> &'static str {
        match self {
            ActionKind::CreateToken => "create",
            ActionKind::Transfer => "transfer",
            ActionKind::MintToken => "mint",
            ActionKind::SplitBalance => "split",
            ActionKind::MergeBalance => "merge",
            ActionKind::CreateMarket => "mkt_create",
            ActionKind::UpdateMarket => "mkt_update",
            ActionKind::PlaceOrder => "ord_place",
            ActionKind::CancelOrder => "ord_cancel",
        }
    }

    /// Wire discriminant. Never reused, never renumbered.
    pub const fn tag(self) -> u64 {
        TAGS[self as usize]
    }

    pub fn from_tag(tag: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    pub const fn arity(self) -> InputArity {
        match self {
            ActionKind::CreateToken | ActionKind::CreateMarket => InputArity::Exactly(0),
            ActionKind::Transfer
            | ActionKind::MintToken
            | ActionKind::SplitBalance
            | ActionKind::UpdateMarket
            | ActionKind::CancelOrder => InputArity::Exactly(1),
            ActionKind::PlaceOrder => InputArity::Exactly(2),
            ActionKind::MergeBalance => InputArity::AtLeast(2),
        }
    }

    /// The module that handles this action on a stock deployment.
    pub fn default_contract(self) -> Address {
        match self {
            ActionKind::CreateToken
            | ActionKind::Transfer
            | ActionKind::MintToken
            | ActionKind::SplitBalance
            | ActionKind::MergeBalance => Address::TOKEN_CONTRACT,
            ActionKind::CreateMarket
            | ActionKind::UpdateMarket
            | ActionKind::PlaceOrder
            | ActionKind::CancelOrder => Address::SPOT_CONTRACT,
        }
    }
}

/// Indexed by discriminant, which follows [`ActionKind::ALL`].
const TAGS: [u64; ActionKind::ALL.len()] = {
    let mut tags = [0u64; ActionKind::ALL.len()];
    let mut i = 0;
    while i < tags.len() {
        tags[i] = name::pack_const(ActionKind::ALL[i].name());
        i += 1;
    }
    tags
};

/// Parses a protocol name such as `"ord_place"`.
impl FromStr for ActionKind {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = name::pack(s)?;
        Self::from_tag(code).ok_or_else(|| NameError::UnknownAction {
            name: s.to_string(),
        })
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
