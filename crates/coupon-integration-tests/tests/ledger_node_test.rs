//! Node-level behavior seen through the ledger client: submission
//! validation, finality timeouts, and faucet availability.

mod common;

use std::time::Duration;

use common::{start, start_with, test_coupon, FUNDING};
use coupon_client::{LedgerClientError, Transaction};
use coupon_core::{FunctionId, ObjectAddress};
use coupon_node::NodeConfig;

fn assert_rejected(err: LedgerClientError, expected_status: u16, expected_code: &str) {
    match err {
        LedgerClientError::Api {
            status, error_code, ..
        } => {
            assert_eq!(status, expected_status);
            assert_eq!(error_code, expected_code);
        }
        other => panic!("expected {expected_code}, got {other}"),
    }
}

/// A node whose block producer never fires during a test.
fn stalled_node() -> NodeConfig {
    let mut config = NodeConfig::local();
    config.block_interval = Duration::from_secs(3600);
    config
}

#[tokio::test]
async fn funded_accounts_exist_with_balance() {
    let ledger = start().await;
    for account in [&ledger.admin, &ledger.user1, &ledger.user2] {
        let info = ledger.client.get_account(&account.address()).await.unwrap();
        assert_eq!(info.sequence_number, 0);
        assert_eq!(info.authentication_key, account.address());
        assert_eq!(ledger.client.get_balance(&account.address()).await.unwrap(), FUNDING);
    }
}

#[tokio::test]
async fn ledger_version_advances_with_commits() {
    let ledger = start().await;
    let before = ledger.client.ledger_info().await.unwrap();
    assert_eq!(before.chain_id, ledger.node_config.chain_id);

    let txn = ledger
        .submit_as(
            &ledger.admin,
            ledger
                .client
                .coupons()
                .mint_payload(&test_coupon(ledger.user1.address()))
                .unwrap(),
        )
        .await
        .unwrap();

    let after = ledger.client.ledger_info().await.unwrap();
    assert!(after.ledger_version > before.ledger_version);
    assert!(after.ledger_version >= txn.version);
}

#[tokio::test]
async fn unfunded_account_cannot_build_transactions() {
    let ledger = start().await;
    let stranger = ledger.client.generate_account();
    let payload = ledger
        .client
        .coupons()
        .mint_payload(&test_coupon(ledger.user1.address()))
        .unwrap();

    let err = ledger
        .client
        .build_payload_transaction(&stranger.address(), payload)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerClientError::AccountNotFound { .. }), "{err}");
}

#[tokio::test]
async fn tampered_signature_is_rejected_at_submission() {
    let ledger = start().await;
    let payload = ledger
        .client
        .coupons()
        .mint_payload(&test_coupon(ledger.user1.address()))
        .unwrap();
    let mut raw = ledger
        .client
        .build_payload_transaction(&ledger.admin.address(), payload)
        .await
        .unwrap();
    let auth = ledger.client.sign(&ledger.admin, &raw).unwrap();

    // Redirect the coupon after signing.
    raw.payload.arguments[6] = ledger.user2.address().to_hex_literal();

    let err = ledger.client.submit(&raw, &auth).await.unwrap_err();
    assert_rejected(err, 400, "invalid_signature");
}

#[tokio::test]
async fn signature_by_another_key_is_rejected() {
    let ledger = start().await;
    let payload = ledger
        .client
        .coupons()
        .mint_payload(&test_coupon(ledger.user1.address()))
        .unwrap();
    let raw = ledger
        .client
        .build_payload_transaction(&ledger.admin.address(), payload)
        .await
        .unwrap();
    let auth = ledger.client.sign(&ledger.user1, &raw).unwrap();

    let err = ledger.client.submit(&raw, &auth).await.unwrap_err();
    assert_rejected(err, 400, "invalid_signature");
}

#[tokio::test]
async fn wrong_chain_id_is_rejected_at_submission() {
    let ledger = start().await;
    let payload = ledger
        .client
        .coupons()
        .mint_payload(&test_coupon(ledger.user1.address()))
        .unwrap();
    let mut raw = ledger
        .client
        .build_payload_transaction(&ledger.admin.address(), payload)
        .await
        .unwrap();
    raw.chain_id = ledger.node_config.chain_id.wrapping_add(1);
    let auth = ledger.client.sign(&ledger.admin, &raw).unwrap();

    let err = ledger.client.submit(&raw, &auth).await.unwrap_err();
    assert_rejected(err, 400, "invalid_chain_id");
}

#[tokio::test]
async fn malformed_arguments_are_rejected_at_submission() {
    let ledger = start().await;
    let module = ledger.client.coupons().module().clone();
    let function: FunctionId = format!("{module}::transfer_token").parse().unwrap();

    let raw = ledger
        .client
        .build_transaction(
            &ledger.user1.address(),
            function,
            vec![],
            vec![ledger.user1.address().to_hex_literal(), "not-an-address".into()],
        )
        .await
        .unwrap();
    let auth = ledger.client.sign(&ledger.user1, &raw).unwrap();

    let err = ledger.client.submit(&raw, &auth).await.unwrap_err();
    assert_rejected(err, 400, "invalid_transaction_payload");
}

#[tokio::test]
async fn unknown_function_is_rejected_at_submission() {
    let ledger = start().await;
    let module = ledger.client.coupons().module().clone();
    let function: FunctionId = format!("{module}::burn_everything").parse().unwrap();

    let raw = ledger
        .client
        .build_transaction(&ledger.user1.address(), function, vec![], vec![])
        .await
        .unwrap();
    let auth = ledger.client.sign(&ledger.user1, &raw).unwrap();

    let err = ledger.client.submit(&raw, &auth).await.unwrap_err();
    assert_rejected(err, 400, "invalid_transaction_payload");
}

#[tokio::test]
async fn wait_times_out_when_block_producer_stalls() {
    let ledger = start_with(stalled_node(), Duration::from_millis(250)).await;
    let payload = ledger
        .client
        .coupons()
        .mint_payload(&test_coupon(ledger.user1.address()))
        .unwrap();
    let raw = ledger
        .client
        .build_payload_transaction(&ledger.admin.address(), payload)
        .await
        .unwrap();
    let auth = ledger.client.sign(&ledger.admin, &raw).unwrap();
    let pending = ledger.client.submit(&raw, &auth).await.unwrap();

    match ledger.client.wait_for_transaction(&pending.hash).await {
        Err(LedgerClientError::WaitTimeout { hash, timeout_ms }) => {
            assert_eq!(hash, pending.hash.to_hex());
            assert_eq!(timeout_ms, 250);
        }
        other => panic!("expected WaitTimeout, got {other:?}"),
    }

    let status = ledger
        .client
        .get_transaction_by_hash(&pending.hash)
        .await
        .unwrap()
        .unwrap();
    assert!(status.is_pending());
    assert_eq!(status.hash(), pending.hash);
}

#[tokio::test]
async fn resubmitting_a_pending_transaction_is_a_duplicate() {
    let ledger = start_with(stalled_node(), Duration::from_millis(250)).await;
    let object = ObjectAddress::from_hex_literal("0x2").unwrap();
    let payload = ledger
        .client
        .coupons()
        .redeem_payload(&ledger.user1.address(), &object)
        .unwrap();
    let raw = ledger
        .client
        .build_payload_transaction(&ledger.user1.address(), payload)
        .await
        .unwrap();
    let auth = ledger.client.sign(&ledger.user1, &raw).unwrap();

    ledger.client.submit(&raw, &auth).await.unwrap();
    let err = ledger.client.submit(&raw, &auth).await.unwrap_err();
    assert_rejected(err, 409, "duplicate_transaction");
}

#[tokio::test]
async fn unknown_transaction_hash_is_none() {
    let ledger = start().await;
    let hash = coupon_core::TransactionHash::new([7u8; 32]);
    assert!(ledger
        .client
        .get_transaction_by_hash(&hash)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn committed_transaction_is_queryable_by_hash() {
    let ledger = start().await;
    let txn = ledger
        .submit_as(
            &ledger.admin,
            ledger
                .client
                .coupons()
                .mint_payload(&test_coupon(ledger.user1.address()))
                .unwrap(),
        )
        .await
        .unwrap();

    match ledger.client.get_transaction_by_hash(&txn.hash).await.unwrap() {
        Some(Transaction::UserTransaction(found)) => assert_eq!(found, txn),
        other => panic!("expected committed transaction, got {other:?}"),
    }
}

#[tokio::test]
async fn disabled_faucet_reports_funding_unavailable() {
    let mut config = NodeConfig::local();
    config.faucet_enabled = false;
    let ledger = start_with(config, Duration::from_secs(5)).await;

    let err = ledger
        .client
        .fund_account(&ledger.user1.address(), FUNDING)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerClientError::FundingUnavailable { .. }), "{err}");
}

#[tokio::test]
async fn node_shuts_down_cleanly() {
    let ledger = start().await;
    let client = ledger.client.clone();
    ledger.node.shutdown().await;
    assert!(client.health().await.is_err());
}
