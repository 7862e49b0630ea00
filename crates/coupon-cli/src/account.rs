//! # Account Subcommands
//!
//! Key generation, faucet funding, and account inspection.

use clap::Args;
use coupon_client::{LedgerClient, LocalAccount};
use serde_json::{json, Value};

use crate::parse_address;

/// Arguments for `keygen`.
#[derive(Args, Debug)]
pub struct KeygenArgs {}

/// Arguments for `fund`.
#[derive(Args, Debug)]
pub struct FundArgs {
    /// Account to credit.
    #[arg(long)]
    pub address: String,
    /// Amount in base units.
    #[arg(long, default_value_t = 100_000_000)]
    pub amount: u64,
}

/// Arguments for `account`.
#[derive(Args, Debug)]
pub struct AccountArgs {
    #[arg(long)]
    pub address: String,
}

/// Generate a key. The seed is printed once so the operator can keep it.
pub fn keygen(_args: &KeygenArgs) -> Value {
    let account = LocalAccount::generate();
    json!({
        "address": account.address(),
        "public_key": account.public_key(),
        "seed": account.seed_hex().as_str(),
    })
}

pub async fn fund(client: &LedgerClient, args: &FundArgs) -> anyhow::Result<Value> {
    let address = parse_address("--address", &args.address)?;
    client.fund_account(&address, args.amount).await?;
    let balance = client.get_balance(&address).await?;
    tracing::info!(address = %address.short(), amount = args.amount, "funded");
    Ok(json!({ "address": address, "balance": balance }))
}

pub async fn show(client: &LedgerClient, args: &AccountArgs) -> anyhow::Result<Value> {
    let address = parse_address("--address", &args.address)?;
    let info = client.get_account(&address).await?;
    let balance = client.get_balance(&address).await?;
    Ok(json!({
        "address": address,
        "sequence_number": info.sequence_number,
        "authentication_key": info.authentication_key,
        "balance": balance,
    }))
}
