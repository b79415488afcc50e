//! HTTP webhook notifier.

use super::service::{WebhookBody, WebhookError, WebhookNotifier, WebhookResult};
use crate::domain::result::TrackingResult;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Posts tracking results as JSON to webhook URLs.
///
/// `ureq` is blocking, so each request runs on the tokio blocking pool.
/// Responses with a 4xx/5xx status are reported as [`WebhookError::Status`].
#[derive(Clone)]
pub struct HttpWebhookNotifier {
    agent: ureq::Agent,
}

impl HttpWebhookNotifier {
    /// Creates a notifier whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::config::Config::builder()
                .timeout_global(Some(timeout))
                .build(),
        );

        Self { agent }
    }
}

#[async_trait]
impl WebhookNotifier for HttpWebhookNotifier {
    async fn notify(&self, webhook_url: &str, result: &TrackingResult) -> WebhookResult<()> {
        let body = serde_json::to_vec(&WebhookBody::from(result))?;
        let agent = self.agent.clone();
        let url = webhook_url.to_string();

        let response = tokio::task::spawn_blocking(move || {
            agent
                .post(&url)
                .header("Content-Type", "application/json")
                .send(&body[..])
        })
        .await
        .map_err(|e| WebhookError::Request(format!("webhook task failed: {}", e)))?;

        match response {
            Ok(resp) => {
                debug!(
                    "Webhook {} answered {}",
                    webhook_url,
                    resp.status().as_u16()
                );
                Ok(())
            }
            Err(ureq::Error::StatusCode(status)) => Err(WebhookError::Status(status)),
            Err(e) => Err(WebhookError::Request(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    /// Answers 200 to the first request and 500 afterwards, keeping every body.
    #[derive(Clone, Default)]
    struct Hook {
        bodies: Arc<Mutex<Vec<Value>>>,
    }

    async fn receive(State(hook): State<Hook>, Json(body): Json<Value>) -> StatusCode {
        let mut bodies = hook.bodies.lock().unwrap();
        bodies.push(body);

        if bodies.len() == 1 {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    async fn slow() -> StatusCode {
        tokio::time::sleep(Duration::from_secs(5)).await;
        StatusCode::OK
    }

    async fn spawn_hook() -> (String, Hook) {
        let hook = Hook::default();
        let app = Router::new()
            .route("/hook", post(receive))
            .route("/slow", post(slow))
            .with_state(hook.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        (format!("http://{}", addr), hook)
    }

    fn click_result() -> TrackingResult {
        TrackingResult {
            tracked_url: Some("https://example.com/offer".to_string()),
            webhook_url: Some("https://hooks.example.com/".to_string()),
            metadata: json!({"customer_id": 7}).as_object().unwrap().clone(),
            request_data: None,
        }
    }

    #[tokio::test]
    async fn test_notify_posts_json_and_maps_status() {
        let (base, hook) = spawn_hook().await;
        let notifier = HttpWebhookNotifier::new(Duration::from_secs(5));
        let url = format!("{}/hook", base);

        let first = notifier.notify(&url, &click_result()).await;
        let second = notifier.notify(&url, &click_result()).await;

        assert!(first.is_ok());
        assert!(matches!(second, Err(WebhookError::Status(500))));

        let bodies = hook.bodies.lock().unwrap();
        assert_eq!(bodies.len(), 2);
        assert_eq!(
            bodies[0],
            json!({
                "tracked_url": "https://example.com/offer",
                "webhook_url": "https://hooks.example.com/",
                "metadata": {"customer_id": 7},
                "request_data": null,
                "is_open_tracking": false,
                "is_click_tracking": true,
            })
        );
    }

    #[tokio::test]
    async fn test_notify_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let notifier = HttpWebhookNotifier::new(Duration::from_secs(5));
        let result = notifier
            .notify(&format!("http://{}/hook", addr), &click_result())
            .await;

        assert!(matches!(result, Err(WebhookError::Request(_))));
    }

    #[tokio::test]
    async fn test_notify_times_out() {
        let (base, _hook) = spawn_hook().await;
        let notifier = HttpWebhookNotifier::new(Duration::from_millis(200));

        let result = notifier
            .notify(&format!("{}/slow", base), &click_result())
            .await;

        assert!(matches!(result, Err(WebhookError::Request(_))));
    }
}
