//! Ledger node server.
//!
//! Reads [`NodeConfig`] from the environment, starts the node, and runs
//! until Ctrl-C. Set `COUPON_LOG_JSON=1` for JSON log lines.

use coupon_node::NodeConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("COUPON_LOG_JSON").is_ok_and(|v| v == "1") {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = NodeConfig::from_env().expect("invalid node configuration");
    let node = coupon_node::spawn(config)
        .await
        .expect("failed to bind listener");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
    node.shutdown().await;
}
