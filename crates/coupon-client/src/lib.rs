//! # coupon-client: Typed Rust client for the coupon ledger
//!
//! Everything the test harness and the CLI need to talk to a ledger node:
//!
//! - account generation ([`LocalAccount`]) and faucet funding,
//! - building, signing, and submitting transactions,
//! - waiting for finality, bounded by [`LedgerClientConfig::wait_timeout`],
//! - resource and owned-object queries,
//! - the [`coupons`](LedgerClient::coupons) sub-client for the
//!   `cryptomilan` module.
//!
//! ## Error Mapping
//!
//! Node error bodies carry a stable `error_code`. `resource_not_found` and
//! `account_not_found` become dedicated variants whose `Display` is the
//! node's message, so callers can match on "Resource not found". Every
//! operation is attempted once; there is no retry.

pub mod account;
pub mod config;
pub mod coupon;
pub mod error;
pub mod types;

pub use account::LocalAccount;
pub use config::LedgerClientConfig;
pub use coupon::CouponClient;
pub use error::LedgerClientError;
pub use types::{
    AccountInfo, DiscardedTransaction, Event, LedgerInfo, ObjectRef, PendingTransaction, Resource,
    Transaction, UserTransaction,
};

use chrono::Utc;
use coupon_core::{
    AccountAddress, EntryFunctionPayload, FunctionId, RawTransaction, StructTag, TransactionHash,
};
use coupon_crypto::{sign_transaction, SignedTransaction, TransactionAuthenticator};
use serde::de::DeserializeOwned;

use crate::types::{Balance, FundRequest, NodeError};

/// Client for one ledger node.
#[derive(Debug, Clone)]
pub struct LedgerClient {
    http: reqwest::Client,
    config: LedgerClientConfig,
}

impl LedgerClient {
    /// Create a client from configuration.
    pub fn new(config: LedgerClientConfig) -> Result<Self, LedgerClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LedgerClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &LedgerClientConfig {
        &self.config
    }

    /// Access the coupon module client.
    pub fn coupons(&self) -> CouponClient<'_> {
        CouponClient::new(self)
    }

    /// Generate a fresh account. It does not exist on the ledger until
    /// funded.
    pub fn generate_account(&self) -> LocalAccount {
        LocalAccount::generate()
    }

    // -- Ledger and accounts --------------------------------------------------

    /// Calls `GET /health`.
    pub async fn health(&self) -> Result<(), LedgerClientError> {
        let endpoint = "GET /health";
        let resp = self.send(endpoint, self.http.get(self.url("health"))).await?;
        check_status(endpoint, resp).await.map(|_| ())
    }

    /// Calls `GET /v1`.
    pub async fn ledger_info(&self) -> Result<LedgerInfo, LedgerClientError> {
        self.get_json("GET /v1", "v1").await
    }

    /// Credit `amount` to `address` through the node's faucet, creating the
    /// account if needed.
    ///
    /// Calls `POST /v1/faucet/fund`.
    pub async fn fund_account(
        &self,
        address: &AccountAddress,
        amount: u64,
    ) -> Result<(), LedgerClientError> {
        let endpoint = "POST /v1/faucet/fund";
        let body = FundRequest {
            address: *address,
            amount,
        };
        let resp = self
            .http
            .post(self.url("v1/faucet/fund"))
            .json(&body)
            .send()
            .await
            .map_err(|e| LedgerClientError::FundingUnavailable {
                message: e.to_string(),
            })?;
        match check_status(endpoint, resp).await {
            Ok(_) => {
                tracing::debug!(address = %address.short(), amount, "account funded");
                Ok(())
            }
            Err(LedgerClientError::Api {
                status, message, ..
            }) if status >= 500 => {
                Err(LedgerClientError::FundingUnavailable { message })
            }
            Err(e) => Err(e),
        }
    }

    /// Calls `GET /v1/accounts/{address}`.
    pub async fn get_account(
        &self,
        address: &AccountAddress,
    ) -> Result<AccountInfo, LedgerClientError> {
        self.get_json(
            &format!("GET /v1/accounts/{address}"),
            &format!("v1/accounts/{address}"),
        )
        .await
    }

    /// Calls `GET /v1/accounts/{address}/balance`.
    pub async fn get_balance(&self, address: &AccountAddress) -> Result<u64, LedgerClientError> {
        let balance: Balance = self
            .get_json(
                &format!("GET /v1/accounts/{address}/balance"),
                &format!("v1/accounts/{address}/balance"),
            )
            .await?;
        Ok(balance.balance)
    }

    /// Fetch the resource of type `resource_type` held by `address`.
    ///
    /// Fails with [`LedgerClientError::ResourceNotFound`] when absent.
    pub async fn get_account_resource(
        &self,
        address: &AccountAddress,
        resource_type: &StructTag,
    ) -> Result<Resource, LedgerClientError> {
        self.get_json(
            &format!("GET /v1/accounts/{address}/resource/{resource_type}"),
            &format!("v1/accounts/{address}/resource/{resource_type}"),
        )
        .await
    }

    /// Objects currently owned by `address`. Empty for unknown accounts.
    pub async fn get_account_owned_objects(
        &self,
        address: &AccountAddress,
    ) -> Result<Vec<ObjectRef>, LedgerClientError> {
        self.get_json(
            &format!("GET /v1/accounts/{address}/objects"),
            &format!("v1/accounts/{address}/objects"),
        )
        .await
    }

    // -- Transactions ---------------------------------------------------------

    /// Build an unsigned transaction calling `function` with positional
    /// `arguments`.
    pub async fn build_transaction(
        &self,
        sender: &AccountAddress,
        function: FunctionId,
        type_arguments: Vec<String>,
        arguments: Vec<String>,
    ) -> Result<RawTransaction, LedgerClientError> {
        let payload = EntryFunctionPayload::new(function, type_arguments, arguments);
        self.build_payload_transaction(sender, payload).await
    }

    /// Build an unsigned transaction for `payload`, using the sender's next
    /// sequence number and the node's chain id.
    pub async fn build_payload_transaction(
        &self,
        sender: &AccountAddress,
        payload: EntryFunctionPayload,
    ) -> Result<RawTransaction, LedgerClientError> {
        let account = self.get_account(sender).await?;
        let info = self.ledger_info().await?;
        let now = Utc::now().timestamp().max(0) as u64;
        Ok(RawTransaction {
            sender: *sender,
            sequence_number: account.sequence_number,
            payload,
            max_fee: self.config.max_fee,
            expiration_timestamp_secs: now + self.config.txn_ttl_secs,
            chain_id: info.chain_id,
        })
    }

    /// Sign `txn` as `signer`.
    pub fn sign(
        &self,
        signer: &LocalAccount,
        txn: &RawTransaction,
    ) -> Result<TransactionAuthenticator, LedgerClientError> {
        Ok(sign_transaction(signer.key(), txn)?)
    }

    /// Calls `POST /v1/transactions`.
    pub async fn submit(
        &self,
        txn: &RawTransaction,
        authenticator: &TransactionAuthenticator,
    ) -> Result<PendingTransaction, LedgerClientError> {
        let endpoint = "POST /v1/transactions";
        let signed = SignedTransaction::new(txn.clone(), authenticator.clone());
        let resp = self
            .send(endpoint, self.http.post(self.url("v1/transactions")).json(&signed))
            .await?;
        let pending: PendingTransaction = decode(endpoint, check_status(endpoint, resp).await?).await?;
        tracing::debug!(
            hash = %pending.hash,
            sender = %pending.sender.short(),
            sequence_number = pending.sequence_number,
            "transaction submitted"
        );
        Ok(pending)
    }

    /// Calls `GET /v1/transactions/by_hash/{hash}`. `None` if the node has
    /// never seen the hash.
    pub async fn get_transaction_by_hash(
        &self,
        hash: &TransactionHash,
    ) -> Result<Option<Transaction>, LedgerClientError> {
        let endpoint = format!("GET /v1/transactions/by_hash/{hash}");
        let resp = self
            .send(
                &endpoint,
                self.http.get(self.url(&format!("v1/transactions/by_hash/{hash}"))),
            )
            .await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(&endpoint, check_status(&endpoint, resp).await?)
            .await
            .map(Some)
    }

    /// Wait until `hash` is finalized.
    ///
    /// Fails with [`LedgerClientError::WaitTimeout`] after
    /// [`LedgerClientConfig::wait_timeout`], and with
    /// [`LedgerClientError::TransactionFailed`] if it finalized without
    /// success or was discarded.
    pub async fn wait_for_transaction(
        &self,
        hash: &TransactionHash,
    ) -> Result<UserTransaction, LedgerClientError> {
        let bound = self.config.wait_timeout;
        match tokio::time::timeout(bound, self.poll_until_final(hash)).await {
            Ok(result) => result,
            Err(_) => Err(LedgerClientError::WaitTimeout {
                hash: hash.to_hex(),
                timeout_ms: bound.as_millis() as u64,
            }),
        }
    }

    async fn poll_until_final(
        &self,
        hash: &TransactionHash,
    ) -> Result<UserTransaction, LedgerClientError> {
        loop {
            match self.get_transaction_by_hash(hash).await? {
                Some(Transaction::UserTransaction(txn)) if txn.success => return Ok(txn),
                Some(Transaction::UserTransaction(txn)) => {
                    return Err(LedgerClientError::TransactionFailed {
                        hash: hash.to_hex(),
                        vm_status: txn.vm_status,
                    })
                }
                Some(Transaction::DiscardedTransaction(txn)) => {
                    return Err(LedgerClientError::TransactionFailed {
                        hash: hash.to_hex(),
                        vm_status: txn.vm_status,
                    })
                }
                Some(Transaction::PendingTransaction(_)) | None => {
                    tokio::time::sleep(self.config.poll_interval).await;
                }
            }
        }
    }

    /// Build, sign, submit, and wait for `payload` sent by `signer`.
    pub async fn submit_and_wait(
        &self,
        signer: &LocalAccount,
        payload: EntryFunctionPayload,
    ) -> Result<UserTransaction, LedgerClientError> {
        let raw = self
            .build_payload_transaction(&signer.address(), payload)
            .await?;
        let auth = self.sign(signer, &raw)?;
        let pending = self.submit(&raw, &auth).await?;
        self.wait_for_transaction(&pending.hash).await
    }

    // -- Plumbing -------------------------------------------------------------

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.node_url.as_str().trim_end_matches('/'),
            path
        )
    }

    async fn send(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, LedgerClientError> {
        request.send().await.map_err(|e| LedgerClientError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        path: &str,
    ) -> Result<T, LedgerClientError> {
        let resp = self.send(endpoint, self.http.get(self.url(path))).await?;
        decode(endpoint, check_status(endpoint, resp).await?).await
    }
}

/// Pass 2xx responses through; map everything else to a typed error.
async fn check_status(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, LedgerClientError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let (error_code, message) = match serde_json::from_str::<NodeError>(&body) {
        Ok(err) => (err.error_code, err.message),
        Err(_) => ("unknown".to_string(), body),
    };
    Err(match error_code.as_str() {
        "resource_not_found" => LedgerClientError::ResourceNotFound { message },
        "account_not_found" => LedgerClientError::AccountNotFound { message },
        _ => LedgerClientError::Api {
            endpoint: endpoint.to_string(),
            status,
            error_code,
            message,
        },
    })
}

async fn decode<T: DeserializeOwned>(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<T, LedgerClientError> {
    resp.json().await.map_err(|e| LedgerClientError::Deserialization {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}
