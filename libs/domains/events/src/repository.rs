//! Event log repository trait and in-memory implementation

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{EventError, Result};
use crate::models::{EventLogEntry, EventState};

/// Storage for the transactional outbox.
///
/// `append` is only used by stores without their own transaction support;
/// the Postgres path appends inside the owning transaction via
/// [`crate::append_in_txn`].
#[async_trait]
pub trait EventLogRepository: Send + Sync {
    async fn append(&self, entry: EventLogEntry) -> Result<()>;

    async fn find(&self, event_id: Uuid) -> Result<Option<EventLogEntry>>;

    /// Entries still waiting for a successful publish.
    async fn not_published(&self) -> Result<Vec<EventLogEntry>>;

    /// Marks the entry in progress and bumps its send counter.
    async fn mark_in_progress(&self, event_id: Uuid) -> Result<()>;

    async fn mark_published(&self, event_id: Uuid) -> Result<()>;

    async fn mark_failed(&self, event_id: Uuid) -> Result<()>;
}

/// In-memory event log for tests and local development
#[derive(Default)]
pub struct InMemoryEventLog {
    entries: RwLock<HashMap<Uuid, EventLogEntry>>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn update_state(&self, event_id: Uuid, state: EventState, bump_sent: bool) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        let entry = entries
            .get_mut(&event_id)
            .ok_or(EventError::NotFound(event_id))?;
        entry.state = state;
        if bump_sent {
            entry.times_sent += 1;
        }
        Ok(())
    }
}

#[async_trait]
impl EventLogRepository for InMemoryEventLog {
    async fn append(&self, entry: EventLogEntry) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries.insert(entry.event_id, entry);
        Ok(())
    }

    async fn find(&self, event_id: Uuid) -> Result<Option<EventLogEntry>> {
        let entries = self.entries.read().unwrap();
        Ok(entries.get(&event_id).cloned())
    }

    async fn not_published(&self) -> Result<Vec<EventLogEntry>> {
        let entries = self.entries.read().unwrap();
        let mut pending: Vec<_> = entries
            .values()
            .filter(|e| e.state != EventState::Published)
            .cloned()
            .collect();
        pending.sort_by_key(|e| e.creation_time);
        Ok(pending)
    }

    async fn mark_in_progress(&self, event_id: Uuid) -> Result<()> {
        self.update_state(event_id, EventState::InProgress, true)
    }

    async fn mark_published(&self, event_id: Uuid) -> Result<()> {
        self.update_state(event_id, EventState::Published, false)
    }

    async fn mark_failed(&self, event_id: Uuid) -> Result<()> {
        self.update_state(event_id, EventState::PublishFailed, false)
    }
}
