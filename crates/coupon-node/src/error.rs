//! # API Error Types
//!
//! Every handler failure maps to a status code and a JSON body:
//!
//! ```json
//! {"message": "...", "error_code": "resource_not_found"}
//! ```
//!
//! `error_code` is stable and machine-readable; the client keys its typed
//! errors off it. Internal error details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use coupon_core::{AccountAddress, StructTag};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub error_code: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Account not found by Address({0}) and Ledger version({1})")]
    AccountNotFound(AccountAddress, u64),

    #[error("Resource not found by Address({address}), Struct tag({resource_type}) and Ledger version({version})")]
    ResourceNotFound {
        address: AccountAddress,
        resource_type: String,
        version: u64,
    },

    #[error("Transaction not found by Transaction hash({0})")]
    TransactionNotFound(String),

    /// Malformed path parameter or request body.
    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid transaction signature: {0}")]
    InvalidSignature(String),

    #[error("Invalid transaction payload: {0}")]
    InvalidPayload(String),

    #[error("Chain id mismatch: node is on chain {expected}, transaction targets {got}")]
    ChainIdMismatch { expected: u8, got: u8 },

    #[error("Transaction expired at {0}")]
    Expired(u64),

    #[error("Sequence number too old: account {account} is at {committed}, transaction uses {got}")]
    SequenceNumberTooOld {
        account: AccountAddress,
        committed: u64,
        got: u64,
    },

    #[error("Transaction already in mempool: {0}")]
    Duplicate(String),

    #[error("Max fee {max_fee} is below the node fee {fee}")]
    MaxFeeTooLow { max_fee: u64, fee: u64 },

    #[error("Insufficient balance {balance} for transaction fee {fee}")]
    InsufficientBalance { balance: u64, fee: u64 },

    #[error("Faucet is disabled on this node")]
    FaucetDisabled,

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The HTTP status and stable error code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::AccountNotFound(..) => (StatusCode::NOT_FOUND, "account_not_found"),
            Self::ResourceNotFound { .. } => (StatusCode::NOT_FOUND, "resource_not_found"),
            Self::TransactionNotFound(_) => (StatusCode::NOT_FOUND, "transaction_not_found"),
            Self::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            Self::InvalidSignature(_) => (StatusCode::BAD_REQUEST, "invalid_signature"),
            Self::InvalidPayload(_) => (StatusCode::BAD_REQUEST, "invalid_transaction_payload"),
            Self::ChainIdMismatch { .. } => (StatusCode::BAD_REQUEST, "invalid_chain_id"),
            Self::Expired(_) => (StatusCode::BAD_REQUEST, "transaction_expired"),
            Self::SequenceNumberTooOld { .. } => (StatusCode::BAD_REQUEST, "sequence_number_too_old"),
            Self::Duplicate(_) => (StatusCode::CONFLICT, "duplicate_transaction"),
            Self::MaxFeeTooLow { .. } => (StatusCode::BAD_REQUEST, "max_fee_too_low"),
            Self::InsufficientBalance { .. } => {
                (StatusCode::BAD_REQUEST, "insufficient_balance_for_fee")
            }
            Self::FaucetDisabled => (StatusCode::SERVICE_UNAVAILABLE, "faucet_disabled"),
            Self::NotImplemented(_) => (StatusCode::NOT_IMPLEMENTED, "not_implemented"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    pub fn resource_not_found(address: AccountAddress, resource_type: &StructTag, version: u64) -> Self {
        Self::ResourceNotFound {
            address,
            resource_type: resource_type.to_string(),
            version,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::FaucetDisabled | Self::NotImplemented(_) => {
                tracing::info!(error = %self, "request refused")
            }
            _ => tracing::debug!(error = %self, code, "request rejected"),
        }

        let body = ErrorBody {
            message,
            error_code: code.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
