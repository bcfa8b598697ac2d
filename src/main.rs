//! chat-relay server entry point.
//!
//! Starts the Axum HTTP server with the chat page, REST and WebSocket
//! endpoints.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use chat_relay::app_state::AppState;
use chat_relay::config::RelayConfig;
use chat_relay::server::build_app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = RelayConfig::from_env().context("loading configuration")?;
    tracing::info!(
        addr = %config.listen_addr,
        chat_scope = %config.chat_scope,
        strict_join = config.strict_join,
        "starting chat-relay"
    );

    let app = build_app(AppState::new(&config), &config);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await.context("serving http")?;

    Ok(())
}
