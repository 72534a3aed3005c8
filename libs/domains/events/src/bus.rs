//! Event bus: Dapr pub/sub implementation plus an in-memory bus for tests

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::error::{EventError, Result};
use crate::models::CloudEvent;

#[async_trait]
pub trait EventBus: Send + Sync {
    /// Publishes the event payload under its type name.
    async fn publish(&self, event_type: &str, payload: &serde_json::Value) -> Result<()>;
}

/// Publishes events through the Dapr sidecar's HTTP pub/sub API
#[derive(Clone)]
pub struct DaprEventBus {
    client: reqwest::Client,
    dapr_http_port: u16,
    pubsub_name: String,
    topic: String,
    source: String,
}

impl DaprEventBus {
    pub fn new(
        dapr_http_port: u16,
        pubsub_name: impl Into<String>,
        topic: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            dapr_http_port,
            pubsub_name: pubsub_name.into(),
            topic: topic.into(),
            source: source.into(),
        }
    }

    pub fn from_env(source: impl Into<String>) -> Self {
        let port = std::env::var("DAPR_HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3500);

        let pubsub_name =
            std::env::var("DAPR_PUBSUB_NAME").unwrap_or_else(|_| "catalog-pubsub".to_string());

        let topic =
            std::env::var("CATALOG_EVENTS_TOPIC").unwrap_or_else(|_| "catalog-events".to_string());

        Self::new(port, pubsub_name, topic, source)
    }

    fn publish_url(&self) -> String {
        format!(
            "http://localhost:{}/v1.0/publish/{}/{}",
            self.dapr_http_port, self.pubsub_name, self.topic
        )
    }
}

#[async_trait]
impl EventBus for DaprEventBus {
    #[instrument(skip(self, payload), fields(topic = %self.topic, event_type = %event_type))]
    async fn publish(&self, event_type: &str, payload: &serde_json::Value) -> Result<()> {
        let cloud_event = CloudEvent::new(event_type, self.source.clone(), payload);

        let response = self
            .client
            .post(self.publish_url())
            .header("Content-Type", "application/json")
            .json(&cloud_event)
            .send()
            .await
            .map_err(|e| EventError::Publish(format!("Failed to reach Dapr sidecar: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Dapr publish failed");
            return Err(EventError::Publish(format!(
                "Publish failed with status {}: {}",
                status, body
            )));
        }

        info!(topic = %self.topic, "Event published to Dapr");
        Ok(())
    }
}

/// Records published events instead of sending them anywhere
#[derive(Default)]
pub struct InMemoryEventBus {
    published: RwLock<Vec<(String, serde_json::Value)>>,
    fail_next: AtomicBool,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<(String, serde_json::Value)> {
        self.published.read().unwrap().clone()
    }

    /// Makes the next publish call fail.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event_type: &str, payload: &serde_json::Value) -> Result<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(EventError::Publish("Simulated bus failure".to_string()));
        }
        self.published
            .write()
            .unwrap()
            .push((event_type.to_string(), payload.clone()));
        Ok(())
    }
}
