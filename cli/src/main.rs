//! # LightPool Client
//!
//! Entry point for the `lightpool` binary. Parses CLI arguments, initializes
//! logging, and dispatches to one subcommand:
//!
//! - `keygen`, `address`: key management
//! - `decode`: inspect a signed transaction
//! - `create-token`, `transfer`, `mint`, `split`, `merge`: token actions
//! - `create-market`, `update-market`, `place-order`, `cancel-order`: spot
//!   actions
//!
//! Each action subcommand builds, signs, prints, and (unless `--dry-run`)
//! submits one transaction carrying that action.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use lightpool_sdk::action::{
    Action, ActionKind, CancelOrderParams, CreateMarketParams, CreateTokenParams, MintParams,
    PlaceOrderParams, SplitParams, TransferParams, UpdateMarketParams,
};
use lightpool_sdk::crypto::Keypair;
use lightpool_sdk::transaction::{Expiration, SignedTransaction, TransactionBuilder};
use lightpool_sdk::Address;

use lightpool_cli::cli::{Commands, GlobalArgs, LightpoolCli};
use lightpool_cli::logging;
use lightpool_cli::rpc::{HttpSubmitter, HttpSubmitterConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = LightpoolCli::parse();
    logging::init_logging("lightpool=info,lightpool_cli=info,lightpool_sdk=info", cli.global.log_format);

    match cli.command {
        Commands::Keygen => keygen(),
        Commands::Address => show_address(&cli.global),
        Commands::Decode { hex } => decode(&hex),
        command => {
            let signer = load_signer(&cli.global)?;
            let action = action_for(command, signer.address())?;
            send(&cli.global, &signer, action).await
        }
    }
}

/// Prints a fresh keypair. The secret goes to stdout and nowhere else.
fn keygen() -> Result<()> {
    let keypair = Keypair::generate();
    let secret = keypair.secret_key_hex();
    let out = json!({
        "secret_key": secret.as_str(),
        "public_key": keypair.public_key_hex(),
        "address": keypair.address().to_hex(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    tracing::info!(address = %keypair.address(), "keypair generated");
    Ok(())
}

fn show_address(global: &GlobalArgs) -> Result<()> {
    let keypair = load_signer(global)?;
    let out = json!({
        "public_key": keypair.public_key_hex(),
        "address": keypair.address().to_hex(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn decode(hex: &str) -> Result<()> {
    let signed =
        SignedTransaction::from_hex(hex).context("failed to decode signed transaction")?;
    println!("{}", serde_json::to_string_pretty(&signed)?);
    Ok(())
}

fn load_signer(global: &GlobalArgs) -> Result<Keypair> {
    let key = global
        .private_key
        .as_deref()
        .context("no signing key: pass --private-key or set LIGHTPOOL_PRIVATE_KEY")?;
    Keypair::from_hex(key).context("invalid private key")
}

/// Maps an action subcommand onto its [`Action`]. `signer` is the default
/// receiver where the action has one.
fn action_for(command: Commands, signer: Address) -> Result<Action> {
    let action = match command {
        Commands::CreateToken(args) => Action::create_token(
            args.contract
                .unwrap_or_else(|| ActionKind::CreateToken.default_contract()),
            CreateTokenParams {
                name: args.name,
                symbol: args.symbol,
                decimals: args.decimals,
                total_supply: args.total_supply,
                mintable: args.mintable,
                to: args.to.unwrap_or(signer),
            },
        ),
        Commands::Transfer(args) => Action::transfer(
            args.contract
                .unwrap_or_else(|| ActionKind::Transfer.default_contract()),
            args.balance,
            TransferParams {
                to: args.to,
                amount: args.amount,
            },
        ),
        Commands::Mint(args) => Action::mint_token(
            args.contract
                .unwrap_or_else(|| ActionKind::MintToken.default_contract()),
            args.token,
            MintParams {
                to: args.to.unwrap_or(signer),
                amount: args.amount,
            },
        ),
        Commands::Split(args) => Action::split_balance(
            args.contract
                .unwrap_or_else(|| ActionKind::SplitBalance.default_contract()),
            args.balance,
            SplitParams {
                amount: args.amount,
            },
        ),
        Commands::Merge(args) => Action::merge_balance(
            args.contract
                .unwrap_or_else(|| ActionKind::MergeBalance.default_contract()),
            args.into,
            args.others,
        ),
        Commands::CreateMarket(args) => Action::create_market(
            args.contract
                .unwrap_or_else(|| ActionKind::CreateMarket.default_contract()),
            CreateMarketParams {
                name: args.name,
                base_token: args.base_token,
                quote_token: args.quote_token,
                min_order_size: args.min_order_size,
                tick_size: args.tick_size,
                maker_fee_bps: args.maker_fee_bps,
                taker_fee_bps: args.taker_fee_bps,
                allow_market_orders: args.allow_market_orders,
                state: args.state.into(),
                limit_order: args.limit_order,
            },
        ),
        Commands::UpdateMarket(args) => Action::update_market(
            args.contract
                .unwrap_or_else(|| ActionKind::UpdateMarket.default_contract()),
            args.market,
            UpdateMarketParams {
                min_order_size: args.min_order_size,
                maker_fee_bps: args.maker_fee_bps,
                taker_fee_bps: args.taker_fee_bps,
                allow_market_orders: args.allow_market_orders,
                state: args.state.map(Into::into),
            },
        ),
        Commands::PlaceOrder(args) => {
            let params = match args.price {
                Some(price) if !args.market_order => {
                    PlaceOrderParams::limit(args.side.into(), args.amount, price, args.tif.into())
                }
                _ => PlaceOrderParams::market(args.side.into(), args.amount, args.slippage_bps),
            };
            Action::place_order(
                args.contract
                    .unwrap_or_else(|| ActionKind::PlaceOrder.default_contract()),
                args.market,
                args.balance,
                params,
            )
        }
        Commands::CancelOrder(args) => Action::cancel_order(
            args.contract
                .unwrap_or_else(|| ActionKind::CancelOrder.default_contract()),
            args.market,
            CancelOrderParams {
                order_id: args.order_id,
            },
        ),
        Commands::Keygen | Commands::Address | Commands::Decode { .. } => {
            anyhow::bail!("not an action subcommand")
        }
    };
    Ok(action)
}

async fn send(global: &GlobalArgs, signer: &Keypair, action: Action) -> Result<()> {
    let kind = action.kind();
    let builder = TransactionBuilder::new()
        .sender(signer.address())
        .add_action(action);
    let builder = match global.ttl_secs {
        Some(ttl) => builder.expiration(Expiration::after(Duration::from_secs(ttl))),
        None => builder.never_expires(),
    };

    let signed = builder
        .build_and_sign(signer)
        .with_context(|| format!("failed to build {kind} transaction"))?;
    tracing::info!(
        action = %kind,
        digest = %signed.digest(),
        bytes = signed.encoded_len(),
        expiration = %signed.transaction().expiration(),
        "transaction signed"
    );
    println!("{}", signed.to_hex());

    if global.dry_run {
        tracing::info!("dry run, not submitting");
        return Ok(());
    }

    let submitter = HttpSubmitter::new(
        HttpSubmitterConfig::new(&global.rpc_url).with_timeout_secs(global.timeout_secs),
    )
    .context("failed to set up RPC client")?;

    let receipt = lightpool_sdk::submit(&submitter, &signed)
        .await
        .with_context(|| format!("failed to submit to {}", submitter.endpoint()))?;

    tracing::info!(digest = %receipt.digest, events = receipt.events.len(), "transaction executed");
    println!("{}", serde_json::to_string_pretty(&receipt)?);
    Ok(())
}
