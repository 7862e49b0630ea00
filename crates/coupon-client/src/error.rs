//! Ledger client error types.

use coupon_core::{CoreError, CryptoError};

/// Errors from ledger client calls.
#[derive(Debug, thiserror::Error)]
pub enum LedgerClientError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The node returned a non-2xx status not covered by a specific variant.
    #[error("node {endpoint} returned {status} ({error_code}): {message}")]
    Api {
        endpoint: String,
        status: u16,
        error_code: String,
        message: String,
    },
    /// The account holds no resource of the requested type.
    #[error("{message}")]
    ResourceNotFound { message: String },
    /// The account does not exist on the ledger.
    #[error("{message}")]
    AccountNotFound { message: String },
    /// The faucet refused or could not be reached.
    #[error("funding service unavailable: {message}")]
    FundingUnavailable { message: String },
    /// The transaction finalized without success, or was discarded.
    #[error("transaction {hash} failed: {vm_status}")]
    TransactionFailed { hash: String, vm_status: String },
    /// The transaction did not finalize within the wait bound.
    #[error("transaction {hash} not finalized within {timeout_ms} ms")]
    WaitTimeout { hash: String, timeout_ms: u64 },
    /// A committed transaction lacks an event the caller relies on.
    #[error("transaction {hash} emitted no {event_type} event")]
    MissingEvent { hash: String, event_type: String },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {reason}")]
    Deserialization { endpoint: String, reason: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// Signing failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
    /// A function id or address could not be built.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] CoreError),
}

impl LedgerClientError {
    /// True for "not found" outcomes of state queries.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ResourceNotFound { .. } | Self::AccountNotFound { .. }
        )
    }

    /// The `vm_status` of a failed transaction, if this is one.
    pub fn vm_status(&self) -> Option<&str> {
        match self {
            Self::TransactionFailed { vm_status, .. } => Some(vm_status),
            _ => None,
        }
    }
}
