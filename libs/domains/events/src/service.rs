//! Integration event publishing service

use std::sync::Arc;

use tracing::{error, instrument};
use uuid::Uuid;

use crate::bus::EventBus;
use crate::error::{EventError, Result};
use crate::repository::EventLogRepository;

/// Drives outbox entries through the bus.
///
/// The entry must already be committed to the log before this service is
/// asked to publish it.
#[derive(Clone)]
pub struct IntegrationEventService {
    log: Arc<dyn EventLogRepository>,
    bus: Arc<dyn EventBus>,
}

impl IntegrationEventService {
    pub fn new(log: Arc<dyn EventLogRepository>, bus: Arc<dyn EventBus>) -> Self {
        Self { log, bus }
    }

    /// Publishes a committed log entry through the bus and records the outcome.
    #[instrument(skip(self), fields(event_id = %event_id))]
    pub async fn publish_through_bus(&self, event_id: Uuid) -> Result<()> {
        let entry = self
            .log
            .find(event_id)
            .await?
            .ok_or(EventError::NotFound(event_id))?;

        self.log.mark_in_progress(event_id).await?;

        match self.bus.publish(&entry.event_type_name, &entry.content).await {
            Ok(()) => self.log.mark_published(event_id).await,
            Err(err) => {
                error!(error = %err, event_type = %entry.event_type_name, "Failed to publish integration event");
                self.log.mark_failed(event_id).await?;
                Err(err)
            }
        }
    }
}
