//! Node configuration.
//!
//! Every setting has a default suitable for a local devnet. Override via
//! environment variables, or use [`NodeConfig::local`] for in-process tests.

use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::time::Duration;

use coupon_core::{AccountAddress, ModuleId};
use coupon_contract::MODULE_NAME;

/// Address the coupon module is published under on the public devnet.
pub const DEFAULT_MODULE_ADDRESS: &str =
    "0x0167bbd306ac7b642caa33afba08778fb2690327ab7533f84c388b4657e99a73";

/// Configuration for a ledger node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub host: IpAddr,
    /// Listening port. `0` picks an ephemeral port.
    pub port: u16,
    pub chain_id: u8,
    pub module_address: AccountAddress,
    /// How often the block producer drains the mempool.
    pub block_interval: Duration,
    /// Flat fee charged per executed transaction.
    pub tx_fee: u64,
    pub faucet_enabled: bool,
}

impl NodeConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `COUPON_NODE_HOST` (default: `0.0.0.0`)
    /// - `COUPON_NODE_PORT` (default: 8070)
    /// - `COUPON_CHAIN_ID` (default: 4)
    /// - `COUPON_MODULE_ADDRESS` (default: [`DEFAULT_MODULE_ADDRESS`])
    /// - `COUPON_BLOCK_INTERVAL_MS` (default: 100)
    /// - `COUPON_TX_FEE` (default: 100)
    /// - `COUPON_FAUCET_ENABLED` (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        let module_raw = std::env::var("COUPON_MODULE_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_MODULE_ADDRESS.to_string());
        let module_address = AccountAddress::from_hex_literal(&module_raw).map_err(|e| {
            ConfigError::InvalidValue {
                var: "COUPON_MODULE_ADDRESS".into(),
                value: module_raw.clone(),
                reason: e.to_string(),
            }
        })?;

        let interval_ms: u64 = env_parse("COUPON_BLOCK_INTERVAL_MS", 100)?;
        if interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                var: "COUPON_BLOCK_INTERVAL_MS".into(),
                value: "0".into(),
                reason: "block interval must be positive".into(),
            });
        }

        Ok(Self {
            host: env_parse("COUPON_NODE_HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: env_parse("COUPON_NODE_PORT", 8070)?,
            chain_id: env_parse("COUPON_CHAIN_ID", 4)?,
            module_address,
            block_interval: Duration::from_millis(interval_ms),
            tx_fee: env_parse("COUPON_TX_FEE", 100)?,
            faucet_enabled: env_parse("COUPON_FAUCET_ENABLED", true)?,
        })
    }

    /// Loopback node on an ephemeral port with a short block interval.
    pub fn local() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            chain_id: 4,
            module_address: AccountAddress::new(DEFAULT_MODULE_BYTES),
            block_interval: Duration::from_millis(20),
            tx_fee: 100,
            faucet_enabled: true,
        }
    }

    /// The published coupon module.
    pub fn module_id(&self) -> ModuleId {
        ModuleId {
            address: self.module_address,
            name: MODULE_NAME.to_string(),
        }
    }
}

const DEFAULT_MODULE_BYTES: [u8; 32] = [
    0x01, 0x67, 0xbb, 0xd3, 0x06, 0xac, 0x7b, 0x64, 0x2c, 0xaa, 0x33, 0xaf, 0xba, 0x08, 0x77,
    0x8f, 0xb2, 0x69, 0x03, 0x27, 0xab, 0x75, 0x33, 0xf8, 0x4c, 0x38, 0x8b, 0x46, 0x57, 0xe9,
    0x9a, 0x73,
];

fn env_parse<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            var: var.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        var: String,
        value: String,
        reason: String,
    },
}
