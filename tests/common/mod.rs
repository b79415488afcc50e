#![allow(dead_code)]

use axum::{Router, extract::ConnectInfo, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::Layer;
use url_tracker::api::handlers::{click_handler, health_handler, open_handler};
use url_tracker::application::services::TrackingService;
use url_tracker::domain::Configuration;
use url_tracker::domain::tracking_event::TrackingEvent;
use url_tracker::state::AppState;

pub const OPEN_BASE: &str = "https://t.example.com/open/";
pub const CLICK_BASE: &str = "https://t.example.com/click/";
pub const WEBHOOK: &str = "https://hooks.example.com/tracking/";
pub const TEST_KEY: &str = "jKAqmCn2x-RzRHTSaxpm7OhtS6KbyTbZWT_v5sJFBUk=";

pub fn test_config() -> Configuration {
    Configuration::new()
        .with_base_open_tracking_url(OPEN_BASE)
        .with_base_click_tracking_url(CLICK_BASE)
        .with_webhook_url(WEBHOOK)
}

pub fn create_test_state(
    config: Configuration,
    behind_proxy: bool,
) -> (AppState, mpsc::Receiver<TrackingEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let tracking_service = Arc::new(TrackingService::new(Arc::new(config), tx));

    (AppState::new(tracking_service, behind_proxy), rx)
}

pub fn test_router(state: AppState) -> Router {
    Router::new()
        .route("/open/{token}", get(open_handler))
        .route("/click/{token}", get(click_handler))
        .route("/health", get(health_handler))
        .layer(MockConnectInfoLayer)
        .with_state(state)
}

/// Strips `base` from a generated tracking URL, leaving the route path.
pub fn route_path(url: &str, base: &str, route: &str) -> String {
    format!("{}{}", route, url.strip_prefix(base).unwrap())
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
