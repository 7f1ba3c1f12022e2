//! hexweb crate entrypoint.
//!
//! Starts the Tokio runtime, wires up tracing and launches the web server
//! defined in the `server` module. Keep this file minimal: most application
//! logic lives in `server`, `proto`, `config`, and `templates`.
//!
/// HTTP server implementation and request handling
mod server;
/// Configuration management and settings
mod config;
/// Wire types for the board API and WebSocket protocol
mod proto;
/// Askama page templates
mod templates;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Entry point for the async Tokio runtime
#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hexweb=debug,tower_http=debug".parse().expect("valid filter")),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting hexlife server");

    server::run().await;
}
