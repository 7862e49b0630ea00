//! # Transaction Admission
//!
//! Checks run in this order; the first failure rejects the submission and
//! nothing is queued:
//!
//! 1. chain id
//! 2. expiration
//! 3. signature, and that the public key derives the sender address
//! 4. the payload names a function of the published module and its
//!    arguments decode
//! 5. the sender account exists
//! 6. the sequence number is not below the committed one and its slot is
//!    not already pending
//! 7. the node fee fits under `max_fee` and the balance covers it

use chrono::Utc;
use coupon_contract::CouponCall;
use coupon_crypto::SignedTransaction;
use dashmap::mapref::entry::Entry;

use crate::error::AppError;
use crate::store::{AppState, QueuedTransaction};
use crate::views::{TransactionRecord, TransactionStatus, TransactionView};

impl AppState {
    /// Validate `txn` and queue it for the next block.
    pub fn admit(&self, txn: SignedTransaction) -> Result<TransactionView, AppError> {
        let config = self.config();
        let raw = &txn.raw;

        if raw.chain_id != config.chain_id {
            return Err(AppError::ChainIdMismatch {
                expected: config.chain_id,
                got: raw.chain_id,
            });
        }
        let now = Utc::now().timestamp().max(0) as u64;
        if raw.expiration_timestamp_secs <= now {
            return Err(AppError::Expired(raw.expiration_timestamp_secs));
        }
        txn.verify()
            .map_err(|e| AppError::InvalidSignature(e.to_string()))?;
        let call = CouponCall::decode(self.module(), &raw.payload)
            .map_err(|e| AppError::InvalidPayload(e.to_string()))?;

        {
            let ledger = self.ledger().read();
            let account = ledger
                .account(&raw.sender)
                .ok_or(AppError::AccountNotFound(raw.sender, ledger.version()))?;
            if raw.sequence_number < account.sequence_number {
                return Err(AppError::SequenceNumberTooOld {
                    account: raw.sender,
                    committed: account.sequence_number,
                    got: raw.sequence_number,
                });
            }
            if config.tx_fee > raw.max_fee {
                return Err(AppError::MaxFeeTooLow {
                    max_fee: raw.max_fee,
                    fee: config.tx_fee,
                });
            }
            if account.balance < config.tx_fee {
                return Err(AppError::InsufficientBalance {
                    balance: account.balance,
                    fee: config.tx_fee,
                });
            }
        }

        let hash = txn
            .hash()
            .map_err(|e| AppError::Internal(format!("hashing transaction: {e}")))?;
        if self.transactions().contains_key(&hash) {
            return Err(AppError::Duplicate(hash.to_hex()));
        }
        match self.pending().entry((raw.sender, raw.sequence_number)) {
            Entry::Occupied(existing) => {
                return Err(AppError::Duplicate(existing.get().to_hex()));
            }
            Entry::Vacant(slot) => {
                slot.insert(hash);
            }
        }

        let record = TransactionRecord {
            txn: txn.clone(),
            status: TransactionStatus::Pending,
        };
        let view = record.view(hash);
        self.transactions().insert(hash, record);

        tracing::debug!(
            %hash,
            sender = %raw.sender.short(),
            sequence_number = raw.sequence_number,
            function = call.function_name(),
            "transaction admitted"
        );

        let sender = raw.sender;
        let sequence_number = raw.sequence_number;
        if self
            .mempool()
            .send(QueuedTransaction { hash, txn, call })
            .is_err()
        {
            self.pending().remove(&(sender, sequence_number));
            self.transactions().remove(&hash);
            return Err(AppError::Internal("block producer has stopped".into()));
        }
        Ok(view)
    }
}
