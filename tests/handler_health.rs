mod common;

use axum_test::TestServer;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _rx) = common::create_test_state(common::test_config(), false);
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["event_queue"]["status"], "ok");
    assert_eq!(json["checks"]["event_queue"]["message"], "Capacity: 100");
    assert_eq!(json["checks"]["encryption"]["message"], "disabled");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let (state, _rx) = common::create_test_state(common::test_config(), false);
    let server = TestServer::new(common::test_router(state)).unwrap();

    let json = server.get("/health").await.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("event_queue").is_some());
    assert!(json["checks"].get("encryption").is_some());
}

#[tokio::test]
async fn test_health_degraded_when_worker_stopped() {
    let (state, rx) = common::create_test_state(common::test_config(), false);
    drop(rx);
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["event_queue"]["status"], "error");
}
