//! # Actions
//!
//! The closed catalog of operations a transaction can carry, and their
//! canonical encoding.
//!
//! ## Wire layout
//!
//! ```text
//! tag       u64 LE            packed action name (see kind.rs)
//! contract  32 bytes          module address
//! inputs    u64 LE count      followed by 32 bytes per object id
//! params    u64 LE length     followed by the bincode parameter record
//! ```
//!
//! Action order inside a transaction is execution order on the node, and
//! every byte above feeds the digest. A layout mismatch with the node does
//! not show up as a decode error there: it shows up as a signature that
//! does not verify.

pub mod kind;
pub mod name;
pub mod params;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use kind::{ActionKind, InputArity};
pub use name::NameError;
pub use params::{
    CancelOrderParams, CreateMarketParams, CreateTokenParams, MarketState, MergeParams,
    MintParams, OrderSide, OrderType, PlaceOrderParams, SplitParams, TimeInForce, TransferParams,
    UpdateMarketParams,
};

use crate::codec::{self, DecodeError, EncodeError};
use crate::types::{Address, ObjectId};

/// The framed form of an action, exactly as it sits inside a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct WireAction {
    pub tag: u64,
    pub contract: Address,
    pub inputs: Vec<ObjectId>,
    pub params: Vec<u8>,
}

/// One operation on a ledger module.
///
/// Input objects are named per variant rather than passed as a loose list,
/// so a `PlaceOrder` cannot be built with its market and balance swapped by
/// accident. [`Action::inputs`] flattens them back into wire order.
///
/// The serde impls produce the JSON display form only. The canonical form
/// is [`Action::encode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    CreateToken {
        contract: Address,
        params: CreateTokenParams,
    },
    Transfer {
        contract: Address,
        balance: ObjectId,
        params: TransferParams,
    },
    MintToken {
        contract: Address,
        token: ObjectId,
        params: MintParams,
    },
    SplitBalance {
        contract: Address,
        balance: ObjectId,
        params: SplitParams,
    },
    /// Folds `others` into `primary`. At least one other balance is required.
    MergeBalance {
        contract: Address,
        primary: ObjectId,
        others: Vec<ObjectId>,
    },
    CreateMarket {
        contract: Address,
        params: CreateMarketParams,
    },
    UpdateMarket {
        contract: Address,
        market: ObjectId,
        params: UpdateMarketParams,
    },
    PlaceOrder {
        contract: Address,
        market: ObjectId,
        balance: ObjectId,
        params: PlaceOrderParams,
    },
    CancelOrder {
        contract: Address,
        market: ObjectId,
        params: CancelOrderParams,
    },
}

impl Action {
    pub fn create_token(contract: Address, params: CreateTokenParams) -> Self {
        Action::CreateToken { contract, params }
    }

    pub fn transfer(contract: Address, balance: ObjectId, params: TransferParams) -> Self {
        Action::Transfer {
            contract,
            balance,
            params,
        }
    }

    pub fn mint_token(contract: Address, token: ObjectId, params: MintParams) -> Self {
        Action::MintToken {
            contract,
            token,
            params,
        }
    }

    pub fn split_balance(contract: Address, balance: ObjectId, params: SplitParams) -> Self {
        Action::SplitBalance {
            contract,
            balance,
            params,
        }
    }

    pub fn merge_balance(contract: Address, primary: ObjectId, others: Vec<ObjectId>) -> Self {
        Action::MergeBalance {
            contract,
            primary,
            others,
        }
    }

    pub fn create_market(contract: Address, params: CreateMarketParams) -> Self {
        Action::CreateMarket { contract, params }
    }

    pub fn update_market(contract: Address, market: ObjectId, params: UpdateMarketParams) -> Self {
        Action::UpdateMarket {
            contract,
            market,
            params,
        }
    }

    pub fn place_order(
        contract: Address,
        market: ObjectId,
        balance: ObjectId,
        params: PlaceOrderParams,
    ) -> Self {
        Action::PlaceOrder {
            contract,
            market,
            balance,
            params,
        }
    }

    pub fn cancel_order(contract: Address, market: ObjectId, params: CancelOrderParams) -> Self {
        Action::CancelOrder {
            contract,
            market,
            params,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::CreateToken { .. } => ActionKind::CreateToken,
            Action::Transfer { .. } => ActionKind::Transfer,
            Action::MintToken { .. } => ActionKind::MintToken,
            Action::SplitBalance { .. } => ActionKind::SplitBalance,
            Action::MergeBalance { .. } => ActionKind::MergeBalance,
            Action::CreateMarket { .. } => ActionKind::CreateMarket,
            Action::UpdateMarket { .. } => ActionKind::UpdateMarket,
            Action::PlaceOrder { .. } => ActionKind::PlaceOrder,
            Action::CancelOrder { .. } => ActionKind::CancelOrder,
        }
    }

    pub fn contract(&self) -> Address {
        match self {
            Action::CreateToken { contract, .. }
            | Action::Transfer { contract, .. }
            | Action::MintToken { contract, .. }
            | Action::SplitBalance { contract, .. }
            | Action::MergeBalance { contract, .. }
            | Action::CreateMarket { contract, .. }
            | Action::UpdateMarket { contract, .. }
            | Action::PlaceOrder { contract, .. }
            | Action::CancelOrder { contract, .. } => *contract,
        }
    }

    /// Input objects in wire order.
    pub fn inputs(&self) -> Vec<ObjectId> {
        match self {
            Action::CreateToken { .. } | Action::CreateMarket { .. } => Vec::new(),
            Action::Transfer { balance, .. } | Action::SplitBalance { balance, .. } => {
                vec![*balance]
            }
            Action::MintToken { token, .. } => vec![*token],
            Action::MergeBalance {
                primary, others, ..
            } => std::iter::once(*primary).chain(others.iter().copied()).collect(),
            Action::UpdateMarket { market, .. } | Action::CancelOrder { market, .. } => {
                vec![*market]
            }
            Action::PlaceOrder {
                market, balance, ..
            } => vec![*market, *balance],
        }
    }

    /// Canonical bytes of the parameter record alone.
    pub fn params_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            Action::CreateToken { params, .. } => codec::encode(params),
            Action::Transfer { params, .. } => codec::encode(params),
            Action::MintToken { params, .. } => codec::encode(params),
            Action::SplitBalance { params, .. } => codec::encode(params),
            Action::MergeBalance { .. } => codec::encode(&MergeParams::default()),
            Action::CreateMarket { params, .. } => codec::encode(params),
            Action::UpdateMarket { params, .. } => codec::encode(params),
            Action::PlaceOrder { params, .. } => codec::encode(params),
            Action::CancelOrder { params, .. } => codec::encode(params),
        }
    }

    pub(crate) fn to_wire(&self) -> Result<WireAction, EncodeError> {
        let kind = self.kind();
        let inputs = self.inputs();
        if !kind.arity().accepts(inputs.len()) {
            return Err(EncodeError::InputCount {
                action: kind.name(),
                expected: kind.arity().describe(),
                actual: inputs.len(),
            });
        }
        Ok(WireAction {
            tag: kind.tag(),
            contract: self.contract(),
            inputs,
            params: self.params_bytes()?,
        })
    }

    pub(crate) fn from_wire(wire: WireAction) -> Result<Self, DecodeError> {
        let Some(kind) = ActionKind::from_tag(wire.tag) else {
            debug!(tag = wire.tag, name = ?name::unpack(wire.tag).ok(), "unknown action tag");
            return Err(DecodeError::UnknownTag { tag: wire.tag });
        };
        if !kind.arity().accepts(wire.inputs.len()) {
            return Err(DecodeError::InputCount {
                action: kind.name(),
                expected: kind.arity().describe(),
                actual: wire.inputs.len(),
            });
        }

        let contract = wire.contract;
        let params = wire.params.as_slice();
        let mut inputs = wire.inputs.into_iter();

        let action = match kind {
            ActionKind::CreateToken => Action::create_token(contract, codec::decode(params)?),
            ActionKind::Transfer => {
                Action::transfer(contract, take(&mut inputs), codec::decode(params)?)
            }
            ActionKind::MintToken => {
                Action::mint_token(contract, take(&mut inputs), codec::decode(params)?)
            }
            ActionKind::SplitBalance => {
                Action::split_balance(contract, take(&mut inputs), codec::decode(params)?)
            }
            ActionKind::MergeBalance => {
                let MergeParams {} = codec::decode(params)?;
                let primary = take(&mut inputs);
                Action::merge_balance(contract, primary, inputs.collect())
            }
            ActionKind::CreateMarket => Action::create_market(contract, codec::decode(params)?),
            ActionKind::UpdateMarket => {
                Action::update_market(contract, take(&mut inputs), codec::decode(params)?)
            }
            ActionKind::PlaceOrder => {
                let market = take(&mut inputs);
                let balance = take(&mut inputs);
                Action::place_order(contract, market, balance, codec::decode(params)?)
            }
            ActionKind::CancelOrder => {
                Action::cancel_order(contract, take(&mut inputs), codec::decode(params)?)
            }
        };
        Ok(action)
    }

    /// Canonical bytes of the whole framed action.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        codec::encode(&self.to_wire()?)
    }

    /// Parses one framed action. Unknown tags, wrong input counts, and
    /// leftover bytes (inside the record or after it) are all rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::from_wire(codec::decode(bytes)?)
    }
}

/// Next input object. Callers check arity first, so this never runs dry.
fn take(inputs: &mut std::vec::IntoIter<ObjectId>) -> ObjectId {
    inputs.next().unwrap_or_default()
}
