//! # coupon-node: Ledger Node for the Coupon Module
//!
//! A single-sequencer ledger that hosts the `cryptomilan` coupon module and
//! serves the JSON API the ledger client speaks.
//!
//! ## Architecture
//!
//! ```text
//! POST /v1/transactions ──admit──▶ mempool (unbounded FIFO)
//!                                        │ every block interval
//!                                        ▼
//!                                  block producer ──▶ LedgerState (RwLock)
//!                                        │
//!                                        ▼
//!                           transaction records (DashMap)
//! ```
//!
//! Storage is in-memory with no persistence; state is lost on restart.
//!
//! ## Crate Policy
//!
//! - Route handlers validate and delegate; execution rules live in
//!   [`ledger`] and the contract crate.
//! - All errors map to structured HTTP responses via [`AppError`].

pub mod config;
pub mod error;
pub mod ledger;
pub mod mempool;
pub mod producer;
pub mod routes;
pub mod store;
pub mod views;

pub use config::{ConfigError, NodeConfig};
pub use error::AppError;
pub use store::AppState;

use std::net::SocketAddr;

use axum::Router;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

/// Assemble the application: routes plus request tracing.
pub fn app(state: AppState) -> Router {
    routes::router(state).layer(TraceLayer::new_for_http())
}

/// A running node. Dropping the handle stops the server and the block
/// producer.
#[derive(Debug)]
pub struct NodeHandle {
    addr: SocketAddr,
    shutdown: watch::Sender<bool>,
    server: JoinHandle<()>,
    producer: JoinHandle<()>,
}

impl NodeHandle {
    /// The bound socket address (resolves port `0`).
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL for HTTP clients, e.g. `http://127.0.0.1:8070`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Signal shutdown and wait for both tasks to finish.
    pub async fn shutdown(self) {
        let NodeHandle {
            shutdown,
            server,
            producer,
            ..
        } = self;
        let _ = shutdown.send(true);
        let _ = producer.await;
        let _ = server.await;
    }
}

/// Bind, start the block producer and the HTTP server, and return once the
/// listener is accepting connections.
pub async fn spawn(config: NodeConfig) -> std::io::Result<NodeHandle> {
    let listener = tokio::net::TcpListener::bind(SocketAddr::new(config.host, config.port)).await?;
    let addr = listener.local_addr()?;

    tracing::info!(
        %addr,
        chain_id = config.chain_id,
        module = %config.module_id(),
        tx_fee = config.tx_fee,
        faucet = config.faucet_enabled,
        "coupon-node listening"
    );

    let (state, mempool) = AppState::new(config);
    let (shutdown, signal) = watch::channel(false);

    let producer = tokio::spawn(producer::run(state.clone(), mempool, signal.clone()));

    let router = app(state);
    let mut server_signal = signal;
    let server = tokio::spawn(async move {
        let result = axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = server_signal.changed().await;
            })
            .await;
        if let Err(e) = result {
            tracing::error!(error = %e, "server error");
        }
    });

    Ok(NodeHandle {
        addr,
        shutdown,
        server,
        producer,
    })
}
