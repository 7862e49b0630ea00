//! # Route Definitions
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/health` | [`health`] |
//! | GET | `/v1` | [`ledger_info`] |
//! | POST | `/v1/faucet/fund` | [`faucet_fund`] |
//! | GET | `/v1/accounts/{address}` | [`get_account`] |
//! | GET | `/v1/accounts/{address}/balance` | [`get_balance`] |
//! | GET | `/v1/accounts/{address}/resource/{resource_type}` | [`get_resource`] |
//! | GET | `/v1/accounts/{address}/objects` | [`get_owned_objects`] |
//! | POST | `/v1/transactions` | [`submit_transaction`] |
//! | GET | `/v1/transactions/by_hash/{hash}` | [`get_transaction`] |
//!
//! Anything else answers 501.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use coupon_contract::{CouponStore, COUPON_TOKEN};
use coupon_core::{AccountAddress, StructTag, TransactionHash};
use coupon_crypto::SignedTransaction;

use crate::error::AppError;
use crate::store::AppState;
use crate::views::{
    AccountView, BalanceView, FundRequest, FundView, LedgerInfoView, ObjectRefView, ResourceView,
    TransactionView,
};

/// Build the router with all node routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1", get(ledger_info))
        .route("/v1/faucet/fund", post(faucet_fund))
        .route("/v1/accounts/{address}", get(get_account))
        .route("/v1/accounts/{address}/balance", get(get_balance))
        .route(
            "/v1/accounts/{address}/resource/{resource_type}",
            get(get_resource),
        )
        .route("/v1/accounts/{address}/objects", get(get_owned_objects))
        .route("/v1/transactions", post(submit_transaction))
        .route("/v1/transactions/by_hash/{hash}", get(get_transaction))
        .fallback(not_implemented)
        .with_state(state)
}

// ── Health and ledger info ──────────────────────────────────────────

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn ledger_info(State(state): State<AppState>) -> Json<LedgerInfoView> {
    let ledger = state.ledger().read();
    Json(LedgerInfoView {
        chain_id: state.config().chain_id,
        ledger_version: ledger.version(),
        block_height: ledger.block_height(),
        ledger_timestamp: ledger.timestamp_usecs(),
    })
}

// ── Faucet ──────────────────────────────────────────────────────────

async fn faucet_fund(
    State(state): State<AppState>,
    body: Result<Json<FundRequest>, JsonRejection>,
) -> Result<Json<FundView>, AppError> {
    if !state.config().faucet_enabled {
        return Err(AppError::FaucetDisabled);
    }
    let Json(req) = body.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    if req.amount == 0 {
        return Err(AppError::InvalidInput("amount must be positive".into()));
    }
    let balance = state
        .ledger()
        .write()
        .fund(req.address, req.amount)
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;
    tracing::info!(address = %req.address.short(), amount = req.amount, balance, "faucet credit");
    Ok(Json(FundView {
        address: req.address,
        balance,
    }))
}

// ── Accounts ────────────────────────────────────────────────────────

async fn get_account(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<AccountView>, AppError> {
    let address = parse_address(&address)?;
    let ledger = state.ledger().read();
    let account = ledger
        .account(&address)
        .ok_or(AppError::AccountNotFound(address, ledger.version()))?;
    Ok(Json(AccountView {
        sequence_number: account.sequence_number,
        authentication_key: account.authentication_key,
    }))
}

async fn get_balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<BalanceView>, AppError> {
    let address = parse_address(&address)?;
    let ledger = state.ledger().read();
    let account = ledger
        .account(&address)
        .ok_or(AppError::AccountNotFound(address, ledger.version()))?;
    Ok(Json(BalanceView {
        balance: account.balance,
    }))
}

async fn get_resource(
    State(state): State<AppState>,
    Path((address, resource_type)): Path<(String, String)>,
) -> Result<Json<ResourceView>, AppError> {
    let address = parse_address(&address)?;
    let tag: StructTag = resource_type
        .parse()
        .map_err(|e: coupon_core::CoreError| AppError::InvalidInput(e.to_string()))?;

    let ledger = state.ledger().read();
    let not_found = || AppError::resource_not_found(address, &tag, ledger.version());
    if tag.module != *state.module() || tag.name != COUPON_TOKEN {
        return Err(not_found());
    }
    let token = ledger.coupons().coupon_of(&address).ok_or_else(not_found)?;
    let data = serde_json::to_value(token).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(ResourceView {
        resource_type: tag.to_string(),
        data,
    }))
}

async fn get_owned_objects(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Vec<ObjectRefView>>, AppError> {
    let address = parse_address(&address)?;
    let resource_type = format!("{}::{COUPON_TOKEN}", state.module());
    let ledger = state.ledger().read();
    let objects = ledger
        .coupons()
        .objects_owned_by(&address)
        .into_iter()
        .map(|(object_address, object)| ObjectRefView {
            object_address,
            owner_address: object.owner,
            resource_type: resource_type.clone(),
        })
        .collect();
    Ok(Json(objects))
}

// ── Transactions ────────────────────────────────────────────────────

async fn submit_transaction(
    State(state): State<AppState>,
    body: Result<Json<SignedTransaction>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionView>), AppError> {
    let Json(txn) = body.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let view = state.admit(txn).map_err(|e| {
        tracing::warn!(error = %e, "transaction rejected at submission");
        e
    })?;
    Ok((StatusCode::ACCEPTED, Json(view)))
}

async fn get_transaction(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<TransactionView>, AppError> {
    let hash = TransactionHash::from_hex(&hash).map_err(|e| AppError::InvalidInput(e.to_string()))?;
    let record = state
        .transactions()
        .get(&hash)
        .ok_or_else(|| AppError::TransactionNotFound(hash.to_hex()))?;
    Ok(Json(record.view(hash)))
}

// ── Fallback ────────────────────────────────────────────────────────

async fn not_implemented(uri: axum::http::Uri) -> AppError {
    AppError::NotImplemented(uri.path().to_string())
}

fn parse_address(raw: &str) -> Result<AccountAddress, AppError> {
    AccountAddress::from_hex_literal(raw).map_err(|e| AppError::InvalidInput(e.to_string()))
}
