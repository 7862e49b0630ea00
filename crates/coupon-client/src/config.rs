//! Ledger client configuration.
//!
//! Defaults point at a node on localhost. Override via environment
//! variables or explicit construction for other deployments and tests.

use std::str::FromStr;
use std::time::Duration;

use coupon_core::{AccountAddress, ModuleId};
use coupon_contract::MODULE_NAME;
use url::Url;

/// Address the coupon module is published under on the public devnet.
pub const DEFAULT_MODULE_ADDRESS: &str =
    "0x0167bbd306ac7b642caa33afba08778fb2690327ab7533f84c388b4657e99a73";

/// Configuration for talking to one ledger node.
#[derive(Debug, Clone)]
pub struct LedgerClientConfig {
    /// Base URL of the node. Default: <http://127.0.0.1:8070>
    pub node_url: Url,
    /// Address the coupon module is published under.
    pub module_address: AccountAddress,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Upper bound on [`crate::LedgerClient::wait_for_transaction`].
    pub wait_timeout: Duration,
    /// Delay between status polls while waiting for finality.
    pub poll_interval: Duration,
    /// Seconds from build time until a transaction expires.
    pub txn_ttl_secs: u64,
    /// Highest fee a built transaction authorizes.
    pub max_fee: u64,
}

impl LedgerClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `COUPON_NODE_URL` (default: `http://127.0.0.1:8070`)
    /// - `COUPON_MODULE_ADDRESS` (default: [`DEFAULT_MODULE_ADDRESS`])
    /// - `COUPON_TIMEOUT_SECS` (default: 10)
    /// - `COUPON_WAIT_TIMEOUT_SECS` (default: 20)
    /// - `COUPON_POLL_INTERVAL_MS` (default: 100)
    /// - `COUPON_TXN_TTL_SECS` (default: 600)
    /// - `COUPON_MAX_FEE` (default: 10000)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url =
            std::env::var("COUPON_NODE_URL").unwrap_or_else(|_| "http://127.0.0.1:8070".into());
        let node_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidUrl("COUPON_NODE_URL".into(), e.to_string()))?;

        let raw_module = std::env::var("COUPON_MODULE_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_MODULE_ADDRESS.to_string());
        let module_address = AccountAddress::from_hex_literal(&raw_module).map_err(|e| {
            ConfigError::InvalidValue("COUPON_MODULE_ADDRESS".into(), e.to_string())
        })?;

        Ok(Self {
            node_url,
            module_address,
            timeout: Duration::from_secs(env_parse("COUPON_TIMEOUT_SECS", 10)?),
            wait_timeout: Duration::from_secs(env_parse("COUPON_WAIT_TIMEOUT_SECS", 20)?),
            poll_interval: Duration::from_millis(env_parse("COUPON_POLL_INTERVAL_MS", 100)?),
            txn_ttl_secs: env_parse("COUPON_TXN_TTL_SECS", 600)?,
            max_fee: env_parse("COUPON_MAX_FEE", 10_000)?,
        })
    }

    /// Point at `node_url` with default timings and module address.
    pub fn for_url(node_url: &str) -> Result<Self, ConfigError> {
        let node_url = Url::parse(node_url)
            .map_err(|e| ConfigError::InvalidUrl(node_url.to_string(), e.to_string()))?;
        let module_address = AccountAddress::from_hex_literal(DEFAULT_MODULE_ADDRESS)
            .map_err(|e| ConfigError::InvalidValue("module address".into(), e.to_string()))?;
        Ok(Self {
            node_url,
            module_address,
            timeout: Duration::from_secs(10),
            wait_timeout: Duration::from_secs(20),
            poll_interval: Duration::from_millis(100),
            txn_ttl_secs: 600,
            max_fee: 10_000,
        })
    }

    /// A node on `127.0.0.1:port` with short timings for tests.
    pub fn local(port: u16) -> Result<Self, ConfigError> {
        let mut config = Self::for_url(&format!("http://127.0.0.1:{port}"))?;
        config.timeout = Duration::from_secs(5);
        config.wait_timeout = Duration::from_secs(10);
        config.poll_interval = Duration::from_millis(20);
        Ok(config)
    }

    /// The published coupon module.
    pub fn module_id(&self) -> ModuleId {
        ModuleId {
            address: self.module_address,
            name: MODULE_NAME.to_string(),
        }
    }
}

fn env_parse<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue(var.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}
