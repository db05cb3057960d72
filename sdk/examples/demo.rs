//! Offline walkthrough of the LightPool transaction lifecycle.
//!
//! Generates a key, creates a token and places a sell order in one
//! transaction, signs it, then decodes the wire bytes back and verifies them.
//! Nothing is sent anywhere.
//!
//! Run with:
//!   cargo run --example demo

use lightpool_sdk::action::{Action, CreateTokenParams, OrderSide, PlaceOrderParams, TimeInForce};
use lightpool_sdk::crypto::Keypair;
use lightpool_sdk::transaction::{SignedTransaction, TransactionBuilder};
use lightpool_sdk::types::{Address, ObjectId, U256};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let trader = Keypair::generate();
    println!("trader      {}", trader.address());

    let create = Action::create_token(
        Address::TOKEN_CONTRACT,
        CreateTokenParams {
            name: "Bitcoin".into(),
            symbol: "BTC".into(),
            decimals: 6,
            total_supply: U256::from_u64(21_000_000_000_000),
            mintable: true,
            to: trader.address(),
        },
    );
    // Market and balance ids come from the node in practice.
    let order = Action::place_order(
        Address::SPOT_CONTRACT,
        ObjectId::new([0x11; 32]),
        ObjectId::new([0x22; 32]),
        PlaceOrderParams::limit(OrderSide::Sell, 5_000_000, 50_000_000_000, TimeInForce::Gtc),
    );

    let signed = TransactionBuilder::new()
        .sender(trader.address())
        .never_expires()
        .add_action(create)
        .add_action(order)
        .build_and_sign(&trader)?;

    println!("digest      {}", signed.digest());
    println!("wire bytes  {}", signed.encoded_len());
    println!("signature   {}", signed.signature().to_hex());

    let decoded = SignedTransaction::from_hex(&signed.to_hex())?;
    println!("round trip  {}", if decoded == signed { "ok" } else { "MISMATCH" });

    println!("{}", serde_json::to_string_pretty(decoded.transaction())?);
    Ok(())
}
