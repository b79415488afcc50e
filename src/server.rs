//! HTTP server initialization and runtime setup.
//!
//! Handles webhook worker spawning and the Axum server lifecycle.

use crate::application::services::TrackingService;
use crate::config::Config;
use crate::domain::webhook_worker::run_webhook_worker;
use crate::infrastructure::webhook::{HttpWebhookNotifier, NullNotifier, WebhookNotifier};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Tracking configuration (base URLs, key, defaults)
/// - Background webhook worker (HTTP notifier, or a no-op one when
///   `WEBHOOKS_ENABLED` is off)
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The tracking configuration is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let tracking_config = Arc::new(config.tracking_configuration()?);

    let notifier: Arc<dyn WebhookNotifier> = if config.webhooks_enabled {
        tracing::info!("Webhook delivery enabled");
        Arc::new(HttpWebhookNotifier::new(config.webhook_timeout()))
    } else {
        tracing::info!("Webhook delivery disabled (NullNotifier)");
        Arc::new(NullNotifier::new())
    };

    let (event_tx, event_rx) = mpsc::channel(config.event_queue_capacity);
    let worker = tokio::spawn(run_webhook_worker(
        event_rx,
        notifier,
        config.webhook_max_retries,
    ));
    tracing::info!("Webhook worker started");

    let tracking_service = Arc::new(TrackingService::new(tracking_config, event_tx));
    let state = AppState::new(tracking_service, config.behind_proxy);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router and its event sender are gone; let queued deliveries finish.
    worker.await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
