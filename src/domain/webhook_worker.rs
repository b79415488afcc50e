//! Background worker forwarding tracking events to webhooks.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

use crate::domain::tracking_event::TrackingEvent;
use crate::infrastructure::webhook::WebhookNotifier;

/// First retry delay; later delays grow tenfold up to [`MAX_RETRY_DELAY`].
const BASE_RETRY_DELAY_MS: u64 = 10;
const MAX_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Drains `rx`, delivering each event through `notifier`.
///
/// Deliveries run concurrently. Failures are retried up to `max_retries` times
/// with jittered exponential backoff and then logged and dropped. Returns once
/// the channel is closed and every in-flight delivery has finished.
pub async fn run_webhook_worker(
    mut rx: mpsc::Receiver<TrackingEvent>,
    notifier: Arc<dyn WebhookNotifier>,
    max_retries: usize,
) {
    let mut in_flight = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let notifier = notifier.clone();
        in_flight.spawn(async move { deliver(notifier.as_ref(), &event, max_retries).await });

        while in_flight.try_join_next().is_some() {}
    }

    while in_flight.join_next().await.is_some() {}

    info!("Webhook worker stopped");
}

async fn deliver(notifier: &dyn WebhookNotifier, event: &TrackingEvent, max_retries: usize) {
    let strategy = ExponentialBackoff::from_millis(BASE_RETRY_DELAY_MS)
        .max_delay(MAX_RETRY_DELAY)
        .map(jitter)
        .take(max_retries);

    let outcome = Retry::start(strategy, move || async move {
        notifier
            .notify(&event.webhook_url, &event.result)
            .await
            .inspect_err(|e| warn!("Webhook delivery to {} failed: {}", event.webhook_url, e))
    })
    .await;

    match outcome {
        Ok(()) => debug!("Delivered tracking event to {}", event.webhook_url),
        Err(e) => error!(
            "Giving up on webhook {} after {} retries: {}",
            event.webhook_url, max_retries, e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::TrackingResult;
    use crate::infrastructure::webhook::{MockWebhookNotifier, WebhookError};

    fn event() -> TrackingEvent {
        TrackingEvent {
            webhook_url: "https://webhook.com/tracking/".to_string(),
            result: TrackingResult {
                tracked_url: Some("https://example.com".to_string()),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_worker_delivers_each_event() {
        let mut mock = MockWebhookNotifier::new();
        mock.expect_notify()
            .withf(|url, result| url.contains("webhook.com") && result.is_click_tracking())
            .times(2)
            .returning(|_, _| Ok(()));

        let (tx, rx) = mpsc::channel(10);
        tx.send(event()).await.unwrap();
        tx.send(event()).await.unwrap();
        drop(tx);

        run_webhook_worker(rx, Arc::new(mock), 3).await;
    }

    #[tokio::test]
    async fn test_worker_retries_then_gives_up() {
        let mut mock = MockWebhookNotifier::new();
        mock.expect_notify()
            .times(3)
            .returning(|_, _| Err(WebhookError::Status(500)));

        let (tx, rx) = mpsc::channel(10);
        tx.send(event()).await.unwrap();
        drop(tx);

        run_webhook_worker(rx, Arc::new(mock), 2).await;
    }

    #[tokio::test]
    async fn test_worker_stops_retrying_after_success() {
        let mut mock = MockWebhookNotifier::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_notify()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(WebhookError::Request("connection reset".to_string())));
        mock.expect_notify()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let (tx, rx) = mpsc::channel(10);
        tx.send(event()).await.unwrap();
        drop(tx);

        run_webhook_worker(rx, Arc::new(mock), 5).await;
    }

    #[tokio::test]
    async fn test_worker_exits_on_closed_channel() {
        let mock = MockWebhookNotifier::new();
        let (tx, rx) = mpsc::channel::<TrackingEvent>(1);
        drop(tx);

        run_webhook_worker(rx, Arc::new(mock), 3).await;
    }
}
