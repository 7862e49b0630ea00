//! # Ledger State
//!
//! Accounts, balances, and the coupon module's state, plus the execution
//! rules for a signed transaction:
//!
//! 1. The sender must exist, the sequence number must equal the account's
//!    next sequence number, the transaction must not have expired, and the
//!    balance must cover the fee. Otherwise the transaction is discarded and
//!    nothing changes.
//! 2. The fee is charged and the sequence number bumped.
//! 3. The contract runs. Its change set is applied only on success; an
//!    abort still keeps the fee and sequence number consumed in step 2.

use std::collections::BTreeMap;

use coupon_contract::{execute, CouponCall, CouponEvent, CouponState, ExecutionContext};
use coupon_core::{AccountAddress, ModuleId};
use coupon_crypto::SignedTransaction;

/// `vm_status` recorded for a successful transaction.
pub const EXECUTED_SUCCESSFULLY: &str = "Executed successfully";

/// On-ledger state of one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountState {
    pub sequence_number: u64,
    pub authentication_key: AccountAddress,
    pub balance: u64,
}

/// Result of executing one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Rejected before execution. No state changed.
    Discarded { vm_status: String },
    /// Executed and assigned a ledger version.
    Committed {
        version: u64,
        success: bool,
        vm_status: String,
        events: Vec<CouponEvent>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("crediting {amount} to {address} overflows its balance")]
    BalanceOverflow { address: AccountAddress, amount: u64 },
}

/// The whole ledger.
#[derive(Debug, Default)]
pub struct LedgerState {
    accounts: BTreeMap<AccountAddress, AccountState>,
    coupons: CouponState,
    version: u64,
    block_height: u64,
    timestamp_usecs: u64,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self, address: &AccountAddress) -> Option<&AccountState> {
        self.accounts.get(address)
    }

    pub fn coupons(&self) -> &CouponState {
        &self.coupons
    }

    /// Number of committed transactions.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn block_height(&self) -> u64 {
        self.block_height
    }

    pub fn timestamp_usecs(&self) -> u64 {
        self.timestamp_usecs
    }

    /// Credit `amount` to `address`, creating the account if needed.
    /// Returns the new balance.
    pub fn fund(&mut self, address: AccountAddress, amount: u64) -> Result<u64, LedgerError> {
        let account = self.accounts.entry(address).or_insert_with(|| AccountState {
            sequence_number: 0,
            authentication_key: address,
            balance: 0,
        });
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { address, amount })?;
        Ok(account.balance)
    }

    /// Close the current block at `timestamp_usecs`.
    pub fn close_block(&mut self, timestamp_usecs: u64) {
        self.block_height += 1;
        self.timestamp_usecs = timestamp_usecs.max(self.timestamp_usecs);
    }

    /// Execute `txn`, whose payload decoded to `call`.
    pub fn execute(
        &mut self,
        txn: &SignedTransaction,
        call: &CouponCall,
        module: &ModuleId,
        fee: u64,
        now_secs: u64,
    ) -> ExecutionOutcome {
        let raw = &txn.raw;
        let Some(account) = self.accounts.get_mut(&raw.sender) else {
            return discarded("ACCOUNT_DOES_NOT_EXIST");
        };
        if raw.sequence_number < account.sequence_number {
            return discarded("SEQUENCE_NUMBER_TOO_OLD");
        }
        if raw.sequence_number > account.sequence_number {
            return discarded("SEQUENCE_NUMBER_TOO_NEW");
        }
        if raw.expiration_timestamp_secs <= now_secs {
            return discarded("TRANSACTION_EXPIRED");
        }
        if fee > raw.max_fee {
            return discarded("MAX_FEE_BELOW_NODE_FEE");
        }
        if account.balance < fee {
            return discarded("INSUFFICIENT_BALANCE_FOR_TRANSACTION_FEE");
        }

        account.balance -= fee;
        account.sequence_number += 1;
        self.version += 1;

        let ctx = ExecutionContext {
            sender: raw.sender,
            sequence_number: raw.sequence_number,
        };
        match execute(&self.coupons, &ctx, call) {
            Ok(changes) => {
                self.coupons.apply(&changes);
                ExecutionOutcome::Committed {
                    version: self.version,
                    success: true,
                    vm_status: EXECUTED_SUCCESSFULLY.to_string(),
                    events: changes.events,
                }
            }
            Err(abort) => ExecutionOutcome::Committed {
                version: self.version,
                success: false,
                vm_status: abort.vm_status(module),
                events: Vec::new(),
            },
        }
    }
}

fn discarded(status: &str) -> ExecutionOutcome {
    ExecutionOutcome::Discarded {
        vm_status: status.to_string(),
    }
}
