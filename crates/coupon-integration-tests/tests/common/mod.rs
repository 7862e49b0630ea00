//! Shared harness: one in-process node per test, plus three funded
//! accounts (admin, user1, user2).

#![allow(dead_code)]

use std::time::Duration;

use coupon_client::{LedgerClient, LedgerClientConfig, LedgerClientError, LocalAccount, UserTransaction};
use coupon_contract::MintArgs;
use coupon_core::{AccountAddress, EntryFunctionPayload, ObjectAddress};
use coupon_node::{NodeConfig, NodeHandle};

/// Balance each harness account starts with.
pub const FUNDING: u64 = 100_000_000;

pub struct TestLedger {
    pub node: NodeHandle,
    pub node_config: NodeConfig,
    pub client: LedgerClient,
    pub admin: LocalAccount,
    pub user1: LocalAccount,
    pub user2: LocalAccount,
}

/// Start a node with [`NodeConfig::local`] and fund the harness accounts.
pub async fn start() -> TestLedger {
    start_with(NodeConfig::local(), Duration::from_secs(10)).await
}

/// Start a node with `node_config`; the client waits at most `wait_timeout`
/// for finality.
pub async fn start_with(node_config: NodeConfig, wait_timeout: Duration) -> TestLedger {
    let node = coupon_node::spawn(node_config.clone())
        .await
        .expect("failed to start node");

    let mut config = LedgerClientConfig::local(node.addr().port()).unwrap();
    config.module_address = node_config.module_address;
    config.wait_timeout = wait_timeout;
    let client = LedgerClient::new(config).unwrap();

    // Wait for the server to be ready.
    for _ in 0..50 {
        if client.health().await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let admin = client.generate_account();
    let user1 = client.generate_account();
    let user2 = client.generate_account();
    if node_config.faucet_enabled {
        for account in [&admin, &user1, &user2] {
            client
                .fund_account(&account.address(), FUNDING)
                .await
                .expect("funding failed");
        }
    }

    TestLedger {
        node,
        node_config,
        client,
        admin,
        user1,
        user2,
    }
}

/// The canonical mint arguments with `recipient` filled in.
pub fn test_coupon(recipient: AccountAddress) -> MintArgs {
    MintArgs {
        name: "Test Token".into(),
        description: "Test Description".into(),
        latitude: "45.4642".into(),
        longitude: "9.1900".into(),
        sponsor: "Test Sponsor".into(),
        uri: "ipfs://test".into(),
        recipient,
    }
}

impl TestLedger {
    /// Mint the canonical coupon from admin to `recipient`.
    pub async fn mint_to(&self, recipient: &LocalAccount) -> ObjectAddress {
        self.client
            .coupons()
            .mint(&self.admin, &test_coupon(recipient.address()))
            .await
            .expect("mint failed")
    }

    /// Build, sign, submit, and wait for `payload` as `signer`.
    pub async fn submit_as(
        &self,
        signer: &LocalAccount,
        payload: EntryFunctionPayload,
    ) -> Result<UserTransaction, LedgerClientError> {
        self.client.submit_and_wait(signer, payload).await
    }

    /// True if `owner` currently holds a CouponToken.
    pub async fn holds_coupon(&self, owner: &AccountAddress) -> bool {
        match self.client.coupons().get_token(owner).await {
            Ok(_) => true,
            Err(e) if e.is_not_found() => false,
            Err(e) => panic!("unexpected error querying {owner}: {e}"),
        }
    }
}

/// Assert that `result` failed on-chain with a vm_status naming `abort`.
pub fn assert_aborted<T: std::fmt::Debug>(result: Result<T, LedgerClientError>, abort: &str) {
    match result {
        Err(LedgerClientError::TransactionFailed { vm_status, .. }) => {
            assert!(vm_status.contains(abort), "expected {abort}, got {vm_status}");
        }
        other => panic!("expected {abort} abort, got {other:?}"),
    }
}
