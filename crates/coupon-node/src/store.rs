//! # Shared Node State
//!
//! `AppState` is cheaply cloneable via `Arc`; all clones share:
//!
//! - the ledger behind a single `RwLock` (written only by the block
//!   producer and the faucet),
//! - transaction records in a `DashMap`, so status queries never touch the
//!   ledger lock,
//! - the `(sender, sequence_number)` slots currently pending, to reject
//!   duplicates at submission,
//! - the sending half of the mempool queue.

use std::sync::Arc;

use coupon_contract::CouponCall;
use coupon_core::{AccountAddress, ModuleId, TransactionHash};
use coupon_crypto::SignedTransaction;
use dashmap::DashMap;
use parking_lot::RwLock;
use tokio::sync::mpsc;

use crate::config::NodeConfig;
use crate::ledger::LedgerState;
use crate::views::TransactionRecord;

/// A transaction admitted to the mempool, with its decoded call.
#[derive(Debug)]
pub struct QueuedTransaction {
    pub hash: TransactionHash,
    pub txn: SignedTransaction,
    pub call: CouponCall,
}

struct Inner {
    config: NodeConfig,
    module: ModuleId,
    ledger: RwLock<LedgerState>,
    transactions: DashMap<TransactionHash, TransactionRecord>,
    pending: DashMap<(AccountAddress, u64), TransactionHash>,
    mempool: mpsc::UnboundedSender<QueuedTransaction>,
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl AppState {
    /// Build fresh state. The returned receiver feeds the block producer.
    pub fn new(config: NodeConfig) -> (Self, mpsc::UnboundedReceiver<QueuedTransaction>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = Self {
            inner: Arc::new(Inner {
                module: config.module_id(),
                config,
                ledger: RwLock::new(LedgerState::new()),
                transactions: DashMap::new(),
                pending: DashMap::new(),
                mempool: tx,
            }),
        };
        (state, rx)
    }

    pub fn config(&self) -> &NodeConfig {
        &self.inner.config
    }

    pub fn module(&self) -> &ModuleId {
        &self.inner.module
    }

    pub fn ledger(&self) -> &RwLock<LedgerState> {
        &self.inner.ledger
    }

    pub fn transactions(&self) -> &DashMap<TransactionHash, TransactionRecord> {
        &self.inner.transactions
    }

    pub fn pending(&self) -> &DashMap<(AccountAddress, u64), TransactionHash> {
        &self.inner.pending
    }

    pub fn mempool(&self) -> &mpsc::UnboundedSender<QueuedTransaction> {
        &self.inner.mempool
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("module", &self.inner.module)
            .field("transactions", &self.inner.transactions.len())
            .field("pending", &self.inner.pending.len())
            .finish()
    }
}
