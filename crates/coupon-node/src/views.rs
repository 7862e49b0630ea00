//! JSON shapes returned by the node's HTTP API.

use coupon_contract::CouponEvent;
use coupon_core::{AccountAddress, ModuleId, ObjectAddress, TransactionHash};
use coupon_crypto::SignedTransaction;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerInfoView {
    pub chain_id: u8,
    pub ledger_version: u64,
    pub block_height: u64,
    pub ledger_timestamp: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountView {
    pub sequence_number: u64,
    pub authentication_key: AccountAddress,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceView {
    pub balance: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceView {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub data: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRefView {
    pub object_address: ObjectAddress,
    pub owner_address: AccountAddress,
    pub resource_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundRequest {
    pub address: AccountAddress,
    pub amount: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundView {
    pub address: AccountAddress,
    pub balance: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventView {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: Value,
}

impl EventView {
    pub fn from_event(module: &ModuleId, event: &CouponEvent) -> Self {
        Self {
            event_type: format!("{module}::{}", event.type_name()),
            data: event.data().unwrap_or_default(),
        }
    }
}

/// A transaction as reported by `GET /v1/transactions/by_hash/{hash}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionView {
    PendingTransaction {
        hash: TransactionHash,
        sender: AccountAddress,
        sequence_number: u64,
    },
    UserTransaction {
        hash: TransactionHash,
        sender: AccountAddress,
        sequence_number: u64,
        version: u64,
        success: bool,
        vm_status: String,
        events: Vec<EventView>,
        timestamp: u64,
    },
    DiscardedTransaction {
        hash: TransactionHash,
        sender: AccountAddress,
        sequence_number: u64,
        vm_status: String,
    },
}

/// Where a submitted transaction stands.
#[derive(Debug, Clone)]
pub enum TransactionStatus {
    Pending,
    Committed {
        version: u64,
        success: bool,
        vm_status: String,
        events: Vec<EventView>,
        timestamp_usecs: u64,
    },
    Discarded {
        vm_status: String,
    },
}

/// A submitted transaction and its status.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub txn: SignedTransaction,
    pub status: TransactionStatus,
}

impl TransactionRecord {
    pub fn view(&self, hash: TransactionHash) -> TransactionView {
        let sender = self.txn.raw.sender;
        let sequence_number = self.txn.raw.sequence_number;
        match &self.status {
            TransactionStatus::Pending => TransactionView::PendingTransaction {
                hash,
                sender,
                sequence_number,
            },
            TransactionStatus::Committed {
                version,
                success,
                vm_status,
                events,
                timestamp_usecs,
            } => TransactionView::UserTransaction {
                hash,
                sender,
                sequence_number,
                version: *version,
                success: *success,
                vm_status: vm_status.clone(),
                events: events.clone(),
                timestamp: *timestamp_usecs,
            },
            TransactionStatus::Discarded { vm_status } => TransactionView::DiscardedTransaction {
                hash,
                sender,
                sequence_number,
                vm_status: vm_status.clone(),
            },
        }
    }
}
