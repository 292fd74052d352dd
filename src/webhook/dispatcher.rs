use super::events::{SliceEvent, WebhookPayload};
use crate::cms_node::config::WebhookConfig;
use crate::constants::WEBHOOK_SECRET_HEADER;
use crate::error::{CmsError, CmsResult};
use crate::{log_webhook_debug, log_webhook_error, log_webhook_info};
use chrono::Utc;
use futures::future::join_all;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::mpsc::Receiver;
use tracing::Instrument;

/// Result of delivering one event to one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub url: String,
    /// HTTP status on success, error text otherwise
    pub result: Result<u16, String>,
}

impl DeliveryOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Performs the HTTP fan-out of slice events.
///
/// Each event goes to every configured URL concurrently. There is no retry:
/// a failed delivery is logged and dropped.
pub struct WebhookDispatcher {
    client: Client,
    urls: Vec<String>,
    secret: String,
}

impl WebhookDispatcher {
    pub fn new(config: &WebhookConfig) -> CmsResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| CmsError::Config(format!("Failed to build webhook client: {}", e)))?;

        Ok(Self {
            client,
            urls: config.urls.clone(),
            secret: config.secret.clone(),
        })
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Deliver one event to every URL and wait for all of them to settle
    pub async fn deliver(&self, event: &SliceEvent) -> Vec<DeliveryOutcome> {
        let payload = event.payload(Utc::now());
        let sends = self.urls.iter().map(|url| self.send(url, &payload));
        join_all(sends).await
    }

    async fn send(&self, url: &str, payload: &WebhookPayload) -> DeliveryOutcome {
        let response = self
            .client
            .post(url)
            .header(WEBHOOK_SECRET_HEADER, &self.secret)
            .json(payload)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        let result = match response {
            Ok(response) => {
                log_webhook_info!("Webhook sent to {}: {}", url, payload.event);
                Ok(response.status().as_u16())
            }
            Err(e) => {
                log_webhook_error!("Webhook failed for {}: {}", url, e);
                Err(e.to_string())
            }
        };

        DeliveryOutcome {
            url: url.to_string(),
            result,
        }
    }

    /// Deliver queued events in order until every sender is gone
    pub async fn run(self, mut events: Receiver<SliceEvent>) {
        while let Some(event) = events.recv().await {
            log_webhook_debug!(
                "Dispatching {} for slice '{}'",
                event.name(),
                event.slice_type()
            );
            let span = tracing::info_span!(
                "webhook_delivery",
                event = event.name(),
                slice_type = %event.slice_type()
            );
            self.deliver(&event).instrument(span).await;
        }
        log_webhook_info!("Webhook dispatcher stopped");
    }
}
