//! # coupon CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use anyhow::Context;
use clap::Parser;
use coupon_cli::{account, coupon, query};
use coupon_client::{LedgerClient, LedgerClientConfig};
use tracing_subscriber::EnvFilter;

/// Coupon ledger CLI.
///
/// Generates keys, funds accounts, and mints, transfers, and redeems
/// coupons against a ledger node.
#[derive(Parser, Debug)]
#[command(name = "coupon", version, about)]
struct Cli {
    /// Node base URL. Overrides `COUPON_NODE_URL`.
    #[arg(long, global = true)]
    node_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate an account key.
    Keygen(account::KeygenArgs),
    /// Credit an account through the faucet.
    Fund(account::FundArgs),
    /// Show sequence number and balance.
    Account(account::AccountArgs),
    /// Mint a coupon to a recipient.
    Mint(coupon::MintCommand),
    /// Transfer a coupon you own.
    Transfer(coupon::TransferCommand),
    /// Redeem (destroy) a coupon you own.
    Redeem(coupon::RedeemCommand),
    /// Fetch an account resource.
    Resource(query::ResourceArgs),
    /// List objects owned by an account.
    Objects(query::ObjectsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json_logs = std::env::var("COUPON_LOG_JSON").is_ok_and(|v| v == "1");
    if json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    }

    let cli = Cli::parse();

    let output = match &cli.command {
        Commands::Keygen(args) => account::keygen(args),
        Commands::Fund(args) => account::fund(&connect(&cli)?, args).await?,
        Commands::Account(args) => account::show(&connect(&cli)?, args).await?,
        Commands::Mint(args) => coupon::mint(&connect(&cli)?, args).await?,
        Commands::Transfer(args) => coupon::transfer(&connect(&cli)?, args).await?,
        Commands::Redeem(args) => coupon::redeem(&connect(&cli)?, args).await?,
        Commands::Resource(args) => query::resource(&connect(&cli)?, args).await?,
        Commands::Objects(args) => query::objects(&connect(&cli)?, args).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn connect(cli: &Cli) -> anyhow::Result<LedgerClient> {
    let mut config = LedgerClientConfig::from_env()?;
    if let Some(raw) = &cli.node_url {
        config.node_url = url::Url::parse(raw).context("invalid --node-url")?;
    }
    Ok(LedgerClient::new(config)?)
}
