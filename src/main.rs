//! # Order Webhook
//!
//! Serves the dialogue platform's fulfillment webhook on `POST /`.
//!
//! 1. Reads [`AppConfig`] from the environment and installs logging.
//! 2. Starts the [`OrderBot`] with an in-memory order repository priced from the menu.
//! 3. Serves until Ctrl-C, then drains requests and stops the session actor.

use order_webhook::lifecycle::{setup_tracing, AppConfig, OrderBot};
use order_webhook::persistence::InMemoryOrderRepository;
use order_webhook::webhook;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = AppConfig::from_env()?;
    let menu = config.load_menu()?;
    info!(addr = %config.addr, menu_items = menu.len(), "Starting order webhook");

    let bot = OrderBot::start(
        config.session_config(),
        Arc::new(InMemoryOrderRepository::new(menu)),
    );

    let app = webhook::router(bot.dispatcher().clone());
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    bot.shutdown().await?;
    info!("Order webhook stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for Ctrl-C, shutting down");
    }
    info!("Shutdown requested");
}
