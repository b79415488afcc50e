mod common;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode, header};
use std::net::SocketAddr;
use tower::ServiceExt;
use url_tracker::application::tracking;
use url_tracker::domain::Metadata;
use url_tracker::routes::app_router;

use common::CLICK_BASE;

fn request(uri: &str) -> Request<Body> {
    let mut req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
    req.extensions_mut().insert(ConnectInfo(addr));
    req
}

#[tokio::test]
async fn test_trailing_slash_urls_resolve() {
    let config = common::test_config().with_append_slash(true);
    let url =
        tracking::click_tracking_url("https://example.com/", &Metadata::new(), &config).unwrap();
    assert!(url.ends_with('/'));

    let (state, mut rx) = common::create_test_state(config, false);
    let app = app_router(state);

    let response = app
        .oneshot(request(&common::route_path(&url, CLICK_BASE, "/click/")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://example.com/"
    );
    assert!(rx.try_recv().is_ok());
}

#[tokio::test]
async fn test_unknown_route_not_found() {
    let (state, _rx) = common::create_test_state(common::test_config(), false);
    let app = app_router(state);

    let response = app.oneshot(request("/stats")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
