//! Parameter records carried by each action.
//!
//! Field order is the wire order. Reordering a field, or a variant in one of
//! the enums, changes every digest that includes it.

use serde::{Deserialize, Serialize};

use crate::types::{Address, OrderId, U256};

// ---------------------------------------------------------------------------
// Token module
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTokenParams {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: U256,
    pub mintable: bool,
    /// Receives the initial supply.
    pub to: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferParams {
    pub to: Address,
    pub amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintParams {
    pub to: Address,
    pub amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitParams {
    pub amount: U256,
}

/// Merging takes no parameters; the balances are the input objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeParams {}

// ---------------------------------------------------------------------------
// Spot module
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketState {
    #[default]
    Active,
    Paused,
    PostOnly,
    CancelOnly,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMarketParams {
    pub name: String,
    pub base_token: Address,
    pub quote_token: Address,
    pub min_order_size: u64,
    pub tick_size: u64,
    pub maker_fee_bps: u16,
    pub taker_fee_bps: u16,
    pub allow_market_orders: bool,
    pub state: MarketState,
    pub limit_order: bool,
}

/// Partial update. `None` leaves the field as it is on the node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMarketParams {
    pub min_order_size: Option<u64>,
    pub maker_fee_bps: Option<u16>,
    pub taker_fee_bps: Option<u16>,
    pub allow_market_orders: Option<bool>,
    pub state: Option<MarketState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good till cancelled.
    #[default]
    Gtc,
    /// Immediate or cancel.
    Ioc,
    /// Fill or kill.
    Fok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    Limit {
        tif: TimeInForce,
    },
    Market {
        /// Maximum slippage in basis points.
        slippage: u64,
    },
    Trigger {
        trigger_price: u64,
        is_market: bool,
        trigger_type: u8,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderParams {
    pub side: OrderSide,
    pub amount: u64,
    pub order_type: OrderType,
    /// Ignored by the node for market orders; conventionally 0 there.
    pub limit_price: u64,
}

impl PlaceOrderParams {
    pub fn limit(side: OrderSide, amount: u64, price: u64, tif: TimeInForce) -> Self {
        Self {
            side,
            amount,
            order_type: OrderType::Limit { tif },
            limit_price: price,
        }
    }

    pub fn market(side: OrderSide, amount: u64, slippage_bps: u64) -> Self {
        Self {
            side,
            amount,
            order_type: OrderType::Market {
                slippage: slippage_bps,
            },
            limit_price: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrderParams {
    pub order_id: OrderId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    #[test]
    fn create_token_record_is_92_bytes() {
        let params = CreateTokenParams {
            name: "Bitcoin".into(),
            symbol: "BTC".into(),
            decimals: 6,
            total_supply: U256::from_u64(21_000_000_000_000),
            mintable: true,
            to: Address::new([0xAA; 32]),
        };
        let bytes = codec::encode(&params).unwrap();
        assert_eq!(bytes.len(), 92);
        assert_eq!(&bytes[..8], &7u64.to_le_bytes());
        assert_eq!(&bytes[8..15], b"Bitcoin");
    }

    #[test]
    fn limit_sell_record_matches_node_layout() {
        let params = PlaceOrderParams::limit(OrderSide::Sell, 5_000_000, 50_000_000_000, TimeInForce::Gtc);
        assert_eq!(
            hex::encode(codec::encode(&params).unwrap()),
            "01000000404b4c0000000000000000000000000000743ba40b000000"
        );
    }

    #[test]
    fn enum_indices_follow_declaration_order() {
        assert_eq!(codec::encode(&MarketState::Closed).unwrap(), 4u32.to_le_bytes());
        assert_eq!(codec::encode(&TimeInForce::Fok).unwrap(), 2u32.to_le_bytes());
        let trigger = OrderType::Trigger {
            trigger_price: 1,
            is_market: false,
            trigger_type: 3,
        };
        let bytes = codec::encode(&trigger).unwrap();
        assert_eq!(&bytes[..4], &2u32.to_le_bytes());
        assert_eq!(bytes.len(), 4 + 8 + 1 + 1);
    }

    #[test]
    fn update_market_options() {
        let empty = codec::encode(&UpdateMarketParams::default()).unwrap();
        assert_eq!(empty, vec![0u8; 5]);

        let some = UpdateMarketParams {
            state: Some(MarketState::Paused),
            ..Default::default()
        };
        let bytes = codec::encode(&some).unwrap();
        assert_eq!(bytes, [0, 0, 0, 0, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn merge_record_is_empty() {
        assert!(codec::encode(&MergeParams::default()).unwrap().is_empty());
    }

    #[test]
    fn market_order_zeroes_price() {
        let p = PlaceOrderParams::market(OrderSide::Buy, 10, 50);
        assert_eq!(p.limit_price, 0);
        assert_eq!(p.order_type, OrderType::Market { slippage: 50 });
    }
}
