//! # Coupon Subcommands
//!
//! `mint`, `transfer`, and `redeem`, each signed with `--key-hex` and
//! awaited to finality. A failed transaction exits non-zero with its
//! `vm_status`.

use clap::Args;
use coupon_client::{LedgerClient, UserTransaction};
use coupon_contract::MintArgs;
use serde_json::{json, Value};

use crate::{parse_address, parse_object, signer_from_hex};

/// Arguments for `mint`.
#[derive(Args, Debug)]
pub struct MintCommand {
    /// Hex seed of the creator's key.
    #[arg(long, env = "COUPON_KEY_HEX", hide_env_values = true)]
    pub key_hex: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    /// Decimal latitude, e.g. `45.4642`.
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: String,
    /// Decimal longitude, e.g. `9.1900`.
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: String,
    #[arg(long)]
    pub sponsor: String,
    #[arg(long)]
    pub uri: String,
    /// Account that receives the coupon.
    #[arg(long)]
    pub recipient: String,
}

/// Arguments for `transfer`.
#[derive(Args, Debug)]
pub struct TransferCommand {
    /// Hex seed of the current owner's key.
    #[arg(long, env = "COUPON_KEY_HEX", hide_env_values = true)]
    pub key_hex: String,
    #[arg(long)]
    pub to: String,
    /// Object address of the coupon.
    #[arg(long)]
    pub object: String,
}

/// Arguments for `redeem`.
#[derive(Args, Debug)]
pub struct RedeemCommand {
    /// Hex seed of the owner's key.
    #[arg(long, env = "COUPON_KEY_HEX", hide_env_values = true)]
    pub key_hex: String,
    /// Object address of the coupon.
    #[arg(long)]
    pub object: String,
}

pub async fn mint(client: &LedgerClient, cmd: &MintCommand) -> anyhow::Result<Value> {
    let creator = signer_from_hex(&cmd.key_hex)?;
    let args = MintArgs {
        name: cmd.name.clone(),
        description: cmd.description.clone(),
        latitude: cmd.latitude.clone(),
        longitude: cmd.longitude.clone(),
        sponsor: cmd.sponsor.clone(),
        uri: cmd.uri.clone(),
        recipient: parse_address("--recipient", &cmd.recipient)?,
    };
    let object = client.coupons().mint(&creator, &args).await?;
    tracing::info!(object = %object.short(), recipient = %args.recipient.short(), "coupon minted");
    Ok(json!({ "object": object, "recipient": args.recipient }))
}

pub async fn transfer(client: &LedgerClient, cmd: &TransferCommand) -> anyhow::Result<Value> {
    let owner = signer_from_hex(&cmd.key_hex)?;
    let to = parse_address("--to", &cmd.to)?;
    let object = parse_object("--object", &cmd.object)?;
    let txn = client.coupons().transfer(&owner, &to, &object).await?;
    Ok(committed(&txn))
}

pub async fn redeem(client: &LedgerClient, cmd: &RedeemCommand) -> anyhow::Result<Value> {
    let owner = signer_from_hex(&cmd.key_hex)?;
    let object = parse_object("--object", &cmd.object)?;
    let txn = client.coupons().redeem(&owner, &object).await?;
    Ok(committed(&txn))
}

fn committed(txn: &UserTransaction) -> Value {
    json!({
        "hash": txn.hash,
        "version": txn.version,
        "vm_status": txn.vm_status,
    })
}
