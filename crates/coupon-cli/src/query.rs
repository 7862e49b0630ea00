//! # Query Subcommands

use clap::Args;
use coupon_client::LedgerClient;
use coupon_core::StructTag;
use serde_json::Value;

use crate::parse_address;

/// Arguments for `resource`.
#[derive(Args, Debug)]
pub struct ResourceArgs {
    #[arg(long)]
    pub address: String,
    /// Struct tag to fetch. Defaults to the coupon module's `CouponToken`.
    #[arg(long = "type")]
    pub resource_type: Option<String>,
}

/// Arguments for `objects`.
#[derive(Args, Debug)]
pub struct ObjectsArgs {
    #[arg(long)]
    pub address: String,
}

pub async fn resource(client: &LedgerClient, args: &ResourceArgs) -> anyhow::Result<Value> {
    let address = parse_address("--address", &args.address)?;
    let tag = match &args.resource_type {
        Some(raw) => raw.parse::<StructTag>()?,
        None => client.coupons().token_type(),
    };
    let resource = client.get_account_resource(&address, &tag).await?;
    Ok(serde_json::to_value(resource)?)
}

pub async fn objects(client: &LedgerClient, args: &ObjectsArgs) -> anyhow::Result<Value> {
    let address = parse_address("--address", &args.address)?;
    let objects = client.get_account_owned_objects(&address).await?;
    Ok(serde_json::to_value(objects)?)
}
