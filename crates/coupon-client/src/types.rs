//! Response and request shapes of the node's JSON API, as the client sees
//! them.
//!
//! Fields the client does not need are ignored, so newer nodes can add
//! fields without breaking older clients.

use coupon_core::{AccountAddress, ObjectAddress, TransactionHash};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error body returned by the node on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeError {
    pub message: String,
    pub error_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerInfo {
    pub chain_id: u8,
    pub ledger_version: u64,
    pub block_height: u64,
    pub ledger_timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub sequence_number: u64,
    pub authentication_key: AccountAddress,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Balance {
    pub balance: u64,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct FundRequest {
    pub address: AccountAddress,
    pub amount: u64,
}

/// A typed, address-scoped piece of ledger state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub data: Value,
}

/// An object owned by an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub object_address: ObjectAddress,
    pub owner_address: AccountAddress,
    pub resource_type: String,
}

/// Handle returned by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub hash: TransactionHash,
    pub sender: AccountAddress,
    pub sequence_number: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: Value,
}

/// A transaction that was executed and assigned a ledger version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTransaction {
    pub hash: TransactionHash,
    pub sender: AccountAddress,
    pub sequence_number: u64,
    pub version: u64,
    pub success: bool,
    pub vm_status: String,
    #[serde(default)]
    pub events: Vec<Event>,
    pub timestamp: u64,
}

/// A transaction rejected at execution time without touching state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardedTransaction {
    pub hash: TransactionHash,
    pub sender: AccountAddress,
    pub sequence_number: u64,
    pub vm_status: String,
}

/// Any transaction the node knows about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transaction {
    PendingTransaction(PendingTransaction),
    UserTransaction(UserTransaction),
    DiscardedTransaction(DiscardedTransaction),
}

impl Transaction {
    pub fn hash(&self) -> TransactionHash {
        match self {
            Self::PendingTransaction(t) => t.hash,
            Self::UserTransaction(t) => t.hash,
            Self::DiscardedTransaction(t) => t.hash,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::PendingTransaction(_))
    }
}
