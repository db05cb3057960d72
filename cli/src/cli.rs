//! # CLI Interface
//!
//! Defines the command-line argument structure for `lightpool` using
//! `clap` derive. Global options can also come from the environment.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use lightpool_sdk::action::{MarketState, OrderSide, TimeInForce};
use lightpool_sdk::types::{Address, ObjectId, OrderId, U256};

use crate::logging::LogFormat;
use crate::rpc::{DEFAULT_RPC_URL, DEFAULT_TIMEOUT_SECS};

/// LightPool transaction client.
///
/// Builds, signs, and submits transactions against a LightPool node.
/// Results go to stdout, logs to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "lightpool",
    about = "LightPool transaction client",
    version,
    propagate_version = true
)]
pub struct LightpoolCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Base URL of the node's JSON-RPC server.
    #[arg(long, global = true, env = "LIGHTPOOL_RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Hex-encoded Ed25519 secret key (32 bytes, `0x` optional).
    #[arg(long, global = true, env = "LIGHTPOOL_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Per-request timeout for submission.
    #[arg(long, global = true, env = "LIGHTPOOL_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Log output format.
    #[arg(long, global = true, env = "LIGHTPOOL_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Expire the transaction this many seconds from now. Without it the
    /// transaction never expires.
    #[arg(long, global = true)]
    pub ttl_secs: Option<u64>,

    /// Build and sign, print the hex, but do not submit.
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a fresh keypair and print it.
    Keygen,
    /// Print the public key and address of `--private-key`.
    Address,
    /// Decode and verify a signed transaction, then print it as JSON.
    Decode {
        /// Signed transaction hex, `0x` optional.
        hex: String,
    },
    /// Create a new token.
    CreateToken(CreateTokenArgs),
    /// Transfer part of a balance object.
    Transfer(TransferArgs),
    /// Mint more of a mintable token.
    Mint(MintArgs),
    /// Split an amount off a balance object into a new one.
    Split(SplitArgs),
    /// Merge balance objects of one token into the first.
    Merge(MergeArgs),
    /// Create a spot market for a base/quote token pair.
    CreateMarket(CreateMarketArgs),
    /// Change the parameters of an existing market.
    UpdateMarket(UpdateMarketArgs),
    /// Place a limit or market order.
    PlaceOrder(PlaceOrderArgs),
    /// Cancel a resting order.
    CancelOrder(CancelOrderArgs),
}

#[derive(Args, Debug)]
pub struct CreateTokenArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub symbol: String,

    #[arg(long, default_value_t = 6)]
    pub decimals: u8,

    /// Initial supply in base units, decimal or `0x` hex.
    #[arg(long)]
    pub total_supply: U256,

    /// Allow later minting.
    #[arg(long)]
    pub mintable: bool,

    /// Receiver of the initial supply. Defaults to the signer.
    #[arg(long)]
    pub to: Option<Address>,

    /// Token contract address. Defaults to the built-in token contract.
    #[arg(long)]
    pub contract: Option<Address>,
}

#[derive(Args, Debug)]
pub struct TransferArgs {
    /// Balance object to spend from.
    #[arg(long)]
    pub balance: ObjectId,

    #[arg(long)]
    pub to: Address,

    /// Amount in base units, decimal or `0x` hex.
    #[arg(long)]
    pub amount: U256,

    #[arg(long)]
    pub contract: Option<Address>,
}

#[derive(Args, Debug)]
pub struct MintArgs {
    /// Token object to mint.
    #[arg(long)]
    pub token: ObjectId,

    /// Receiver of the new units. Defaults to the signer.
    #[arg(long)]
    pub to: Option<Address>,

    #[arg(long)]
    pub amount: U256,

    #[arg(long)]
    pub contract: Option<Address>,
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    #[arg(long)]
    pub balance: ObjectId,

    /// Amount moved into the new balance object.
    #[arg(long)]
    pub amount: U256,

    #[arg(long)]
    pub contract: Option<Address>,
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Balance object that receives the merged amount.
    #[arg(long)]
    pub into: ObjectId,

    /// Balance objects consumed by the merge. Repeat for several.
    #[arg(long = "from", required = true)]
    pub others: Vec<ObjectId>,

    #[arg(long)]
    pub contract: Option<Address>,
}

#[derive(Args, Debug)]
pub struct CreateMarketArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub base_token: Address,

    #[arg(long)]
    pub quote_token: Address,

    #[arg(long)]
    pub min_order_size: u64,

    #[arg(long)]
    pub tick_size: u64,

    #[arg(long, default_value_t = 10)]
    pub maker_fee_bps: u16,

    #[arg(long, default_value_t = 20)]
    pub taker_fee_bps: u16,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub allow_market_orders: bool,

    #[arg(long, value_enum, default_value_t = MarketStateArg::Active)]
    pub state: MarketStateArg,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub limit_order: bool,

    #[arg(long)]
    pub contract: Option<Address>,
}

/// Only the fields given are changed.
#[derive(Args, Debug)]
pub struct UpdateMarketArgs {
    #[arg(long)]
    pub market: ObjectId,

    #[arg(long)]
    pub min_order_size: Option<u64>,

    #[arg(long)]
    pub maker_fee_bps: Option<u16>,

    #[arg(long)]
    pub taker_fee_bps: Option<u16>,

    #[arg(long)]
    pub allow_market_orders: Option<bool>,

    #[arg(long, value_enum)]
    pub state: Option<MarketStateArg>,

    #[arg(long)]
    pub contract: Option<Address>,
}

#[derive(Args, Debug)]
pub struct PlaceOrderArgs {
    #[arg(long)]
    pub market: ObjectId,

    /// Balance object that funds the order.
    #[arg(long)]
    pub balance: ObjectId,

    #[arg(long, value_enum)]
    pub side: SideArg,

    #[arg(long)]
    pub amount: u64,

    /// Limit price. Required unless `--market-order` is set.
    #[arg(long, required_unless_present = "market_order")]
    pub price: Option<u64>,

    #[arg(long, value_enum, default_value_t = TifArg::Gtc)]
    pub tif: TifArg,

    /// Place a market order instead of a limit order.
    #[arg(long, conflicts_with = "price")]
    pub market_order: bool,

    /// Maximum slippage for market orders, in basis points.
    #[arg(long, default_value_t = 100)]
    pub slippage_bps: u64,

    #[arg(long)]
    pub contract: Option<Address>,
}

#[derive(Args, Debug)]
pub struct CancelOrderArgs {
    #[arg(long)]
    pub market: ObjectId,

    #[arg(long)]
    pub order_id: OrderId,

    #[arg(long)]
    pub contract: Option<Address>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SideArg {
    Buy,
    Sell,
}

impl From<SideArg> for OrderSide {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Buy => OrderSide::Buy,
            SideArg::Sell => OrderSide::Sell,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MarketStateArg {
    Active,
    Paused,
    PostOnly,
    CancelOnly,
    Closed,
}

impl From<MarketStateArg> for MarketState {
    fn from(state: MarketStateArg) -> Self {
        match state {
            MarketStateArg::Active => MarketState::Active,
            MarketStateArg::Paused => MarketState::Paused,
            MarketStateArg::PostOnly => MarketState::PostOnly,
            MarketStateArg::CancelOnly => MarketState::CancelOnly,
            MarketStateArg::Closed => MarketState::Closed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TifArg {
    Gtc,
    Ioc,
    Fok,
}

impl From<TifArg> for TimeInForce {
    fn from(tif: TifArg) -> Self {
        match tif {
            TifArg::Gtc => TimeInForce::Gtc,
            TifArg::Ioc => TimeInForce::Ioc,
            TifArg::Fok => TimeInForce::Fok,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        LightpoolCli::command().debug_assert();
    }

    #[test]
    fn parses_place_order() {
        let market = format!("0x{}", "11".repeat(32));
        let balance = format!("0x{}", "22".repeat(32));
        let cli = LightpoolCli::try_parse_from([
            "lightpool",
            "--dry-run",
            "place-order",
            "--market",
            &market,
            "--balance",
            &balance,
            "--side",
            "sell",
            "--amount",
            "5000000",
            "--price",
            "50000000000",
        ])
        .unwrap();

        assert!(cli.global.dry_run);
        let Commands::PlaceOrder(args) = cli.command else {
            panic!("expected place-order");
        };
        assert_eq!(args.side, SideArg::Sell);
        assert_eq!(args.price, Some(50_000_000_000));
        assert_eq!(args.tif, TifArg::Gtc);
        assert_eq!(args.market, ObjectId::new([0x11; 32]));
    }

    #[test]
    fn parses_create_market_with_defaults() {
        let base = format!("0x{}", "0b".repeat(32));
        let quote = format!("0x{}", "0c".repeat(32));
        let cli = LightpoolCli::try_parse_from([
            "lightpool",
            "create-market",
            "--name",
            "BTC/USDT",
            "--base-token",
            &base,
            "--quote-token",
            &quote,
            "--min-order-size",
            "1000",
            "--tick-size",
            "10",
        ])
        .unwrap();

        let Commands::CreateMarket(args) = cli.command else {
            panic!("expected create-market");
        };
        assert_eq!(args.name, "BTC/USDT");
        assert_eq!(args.base_token, Address::new([0x0b; 32]));
        assert_eq!(args.quote_token, Address::new([0x0c; 32]));
        assert_eq!(args.min_order_size, 1000);
        assert_eq!(args.tick_size, 10);
        assert_eq!((args.maker_fee_bps, args.taker_fee_bps), (10, 20));
        assert!(args.allow_market_orders);
        assert!(args.limit_order);
        assert_eq!(args.state, MarketStateArg::Active);
        assert_eq!(args.contract, None);
    }

    #[test]
    fn create_market_flags_override_defaults() {
        let token = format!("0x{}", "0b".repeat(32));
        let cli = LightpoolCli::try_parse_from([
            "lightpool",
            "create-market",
            "--name",
            "ETH/USDT",
            "--base-token",
            &token,
            "--quote-token",
            &token,
            "--min-order-size",
            "1",
            "--tick-size",
            "1",
            "--allow-market-orders",
            "false",
            "--state",
            "post-only",
        ])
        .unwrap();
        let Commands::CreateMarket(args) = cli.command else {
            panic!("expected create-market");
        };
        assert!(!args.allow_market_orders);
        assert_eq!(MarketState::from(args.state), MarketState::PostOnly);
    }

    #[test]
    fn update_market_leaves_unset_fields_empty() {
        let market = format!("0x{}", "11".repeat(32));
        let cli = LightpoolCli::try_parse_from([
            "lightpool",
            "update-market",
            "--market",
            &market,
            "--state",
            "paused",
        ])
        .unwrap();
        let Commands::UpdateMarket(args) = cli.command else {
            panic!("expected update-market");
        };
        assert_eq!(args.state, Some(MarketStateArg::Paused));
        assert_eq!(args.min_order_size, None);
        assert_eq!(args.allow_market_orders, None);
    }

    #[test]
    fn merge_collects_repeated_sources_and_needs_one() {
        let into = format!("0x{}", "01".repeat(32));
        let a = format!("0x{}", "02".repeat(32));
        let b = format!("0x{}", "03".repeat(32));
        let cli = LightpoolCli::try_parse_from([
            "lightpool", "merge", "--into", &into, "--from", &a, "--from", &b,
        ])
        .unwrap();
        let Commands::Merge(args) = cli.command else {
            panic!("expected merge");
        };
        assert_eq!(args.into, ObjectId::new([0x01; 32]));
        assert_eq!(
            args.others,
            vec![ObjectId::new([0x02; 32]), ObjectId::new([0x03; 32])]
        );

        assert!(LightpoolCli::try_parse_from(["lightpool", "merge", "--into", &into]).is_err());
    }

    #[test]
    fn limit_order_needs_a_price() {
        let id = format!("0x{}", "11".repeat(32));
        let result = LightpoolCli::try_parse_from([
            "lightpool",
            "place-order",
            "--market",
            &id,
            "--balance",
            &id,
            "--side",
            "buy",
            "--amount",
            "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn total_supply_accepts_decimal() {
        let cli = LightpoolCli::try_parse_from([
            "lightpool",
            "create-token",
            "--name",
            "Bitcoin",
            "--symbol",
            "BTC",
            "--total-supply",
            "21000000000000",
        ])
        .unwrap();
        let Commands::CreateToken(args) = cli.command else {
            panic!("expected create-token");
        };
        assert_eq!(args.total_supply, U256::from_u64(21_000_000_000_000));
        assert!(!args.mintable);
        assert_eq!(args.decimals, 6);
    }
}
