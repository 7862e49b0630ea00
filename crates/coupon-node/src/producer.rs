//! # Block Producer
//!
//! A single task owns the receiving end of the mempool. Every block
//! interval it drains whatever is queued and executes it, in arrival order,
//! under one ledger write lock. Transactions from one sender therefore
//! finalize in submission order.

use chrono::Utc;
use tokio::sync::{mpsc, watch};

use crate::ledger::ExecutionOutcome;
use crate::store::{AppState, QueuedTransaction};
use crate::views::{EventView, TransactionStatus};

/// Run until `shutdown` fires or its sender is dropped.
pub async fn run(
    state: AppState,
    mut mempool: mpsc::UnboundedReceiver<QueuedTransaction>,
    mut shutdown: watch::Receiver<bool>,
) {
    let interval = state.config().block_interval;
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    tracing::info!(
        interval_ms = interval.as_millis() as u64,
        "block producer started"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                produce_block(&state, &mut mempool);
            }
            _ = shutdown.changed() => break,
        }
    }
    tracing::info!("block producer stopped");
}

/// Drain the queue and commit one block. Returns the number of
/// transactions in the block, or `None` when the queue was empty.
pub fn produce_block(
    state: &AppState,
    mempool: &mut mpsc::UnboundedReceiver<QueuedTransaction>,
) -> Option<usize> {
    let mut batch = Vec::new();
    while let Ok(queued) = mempool.try_recv() {
        batch.push(queued);
    }
    if batch.is_empty() {
        return None;
    }

    let now = Utc::now();
    let now_secs = now.timestamp().max(0) as u64;
    let now_usecs = now.timestamp_micros().max(0) as u64;
    let fee = state.config().tx_fee;
    let module = state.module();

    let mut ledger = state.ledger().write();
    let mut committed = 0usize;
    for QueuedTransaction { hash, txn, call } in &batch {
        let outcome = ledger.execute(txn, call, module, fee, now_secs);
        let status = match outcome {
            ExecutionOutcome::Discarded { vm_status } => {
                tracing::warn!(%hash, %vm_status, "transaction discarded");
                TransactionStatus::Discarded { vm_status }
            }
            ExecutionOutcome::Committed {
                version,
                success,
                vm_status,
                events,
            } => {
                committed += 1;
                if success {
                    tracing::debug!(%hash, version, "transaction executed");
                } else {
                    tracing::warn!(%hash, version, %vm_status, "transaction aborted");
                }
                TransactionStatus::Committed {
                    version,
                    success,
                    vm_status,
                    events: events
                        .iter()
                        .map(|e| EventView::from_event(module, e))
                        .collect(),
                    timestamp_usecs: now_usecs,
                }
            }
        };
        if let Some(mut record) = state.transactions().get_mut(hash) {
            record.status = status;
        }
        state
            .pending()
            .remove(&(txn.raw.sender, txn.raw.sequence_number));
    }
    ledger.close_block(now_usecs);
    tracing::info!(
        block_height = ledger.block_height(),
        ledger_version = ledger.version(),
        transactions = batch.len(),
        committed,
        "block committed"
    );
    Some(batch.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NodeConfig;
    use coupon_contract::{CouponCall, MintArgs};
    use coupon_core::{AccountAddress, RawTransaction, TransactionHash};
    use coupon_crypto::{derive_address, sign_transaction, Ed25519KeyPair, SignedTransaction};

    fn mint_txn(state: &AppState, kp: &Ed25519KeyPair, seq: u64) -> SignedTransaction {
        let call = CouponCall::MintTokenTransfer(MintArgs {
            name: "Test Token".into(),
            description: "Test Description".into(),
            latitude: "45.4642".into(),
            longitude: "9.1900".into(),
            sponsor: "Test Sponsor".into(),
            uri: "ipfs://test".into(),
            recipient: AccountAddress::from_hex_literal("0x11").unwrap(),
        });
        let raw = RawTransaction {
            sender: derive_address(&kp.public_key()),
            sequence_number: seq,
            payload: call.to_payload(state.module()).unwrap(),
            max_fee: 10_000,
            expiration_timestamp_secs: Utc::now().timestamp() as u64 + 600,
            chain_id: state.config().chain_id,
        };
        let auth = sign_transaction(kp, &raw).unwrap();
        SignedTransaction::new(raw, auth)
    }

    #[test]
    fn empty_queue_produces_no_block() {
        let (state, mut rx) = AppState::new(NodeConfig::local());
        assert_eq!(produce_block(&state, &mut rx), None);
        assert_eq!(state.ledger().read().block_height(), 0);
    }

    #[test]
    fn block_commits_admitted_transactions_in_order() {
        let (state, mut rx) = AppState::new(NodeConfig::local());
        let kp = Ed25519KeyPair::generate();
        let admin = derive_address(&kp.public_key());
        state.ledger().write().fund(admin, 10_000).unwrap();

        let first = mint_txn(&state, &kp, 0);
        let second = mint_txn(&state, &kp, 1);
        let h1 = first.hash().unwrap();
        let h2 = second.hash().unwrap();
        state.admit(first).unwrap();
        state.admit(second).unwrap();
        assert_eq!(state.pending().len(), 2);

        assert_eq!(produce_block(&state, &mut rx), Some(2));
        assert!(state.pending().is_empty());

        let status = |h: TransactionHash| state.transactions().get(&h).map(|r| r.status.clone());
        match status(h1) {
            Some(TransactionStatus::Committed { version, success, .. }) => {
                assert_eq!(version, 1);
                assert!(success);
            }
            other => panic!("unexpected {other:?}"),
        }
        match status(h2) {
            Some(TransactionStatus::Committed { version, success, vm_status, .. }) => {
                assert_eq!(version, 2);
                assert!(!success);
                assert!(vm_status.contains("ECOUPON_ALREADY_HELD"));
            }
            other => panic!("unexpected {other:?}"),
        }
        let ledger = state.ledger().read();
        assert_eq!(ledger.block_height(), 1);
        assert_eq!(ledger.account(&admin).unwrap().sequence_number, 2);
    }
}
