//! Integration event models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Lifecycle of an outbox entry.
///
/// Entries start as `NotPublished`, move to `InProgress` while the bus
/// call is in flight, and end up `Published` or `PublishFailed`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventState {
    #[default]
    NotPublished,
    InProgress,
    Published,
    PublishFailed,
}

/// Payload contract for events that go through the integration log.
pub trait IntegrationEvent: Serialize + Send + Sync {
    fn event_id(&self) -> Uuid;
    fn event_type(&self) -> &'static str;
}

/// One row of the transactional outbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub event_id: Uuid,
    pub event_type_name: String,
    pub state: EventState,
    pub times_sent: i32,
    pub creation_time: DateTime<Utc>,
    pub content: serde_json::Value,
}

impl EventLogEntry {
    pub fn from_event<E: IntegrationEvent>(event: &E) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event_id: event.event_id(),
            event_type_name: event.event_type().to_string(),
            state: EventState::NotPublished,
            times_sent: 0,
            creation_time: Utc::now(),
            content: serde_json::to_value(event)?,
        })
    }
}

/// CloudEvent envelope used by the Dapr pub/sub bus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudEvent<T> {
    pub specversion: String,

    #[serde(rename = "type")]
    pub event_type: String,

    pub source: String,

    pub id: String,

    pub time: DateTime<Utc>,

    pub datacontenttype: String,

    pub data: T,
}

impl<T: Serialize> CloudEvent<T> {
    pub fn new(event_type: impl Into<String>, source: impl Into<String>, data: T) -> Self {
        Self {
            specversion: "1.0".to_string(),
            event_type: event_type.into(),
            source: source.into(),
            id: Uuid::now_v7().to_string(),
            time: Utc::now(),
            datacontenttype: "application/json".to_string(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct StubEvent {
        id: Uuid,
        answer: i32,
    }

    impl IntegrationEvent for StubEvent {
        fn event_id(&self) -> Uuid {
            self.id
        }

        fn event_type(&self) -> &'static str {
            "StubEvent"
        }
    }

    #[test]
    fn test_entry_from_event_starts_not_published() {
        let event = StubEvent {
            id: Uuid::now_v7(),
            answer: 42,
        };

        let entry = EventLogEntry::from_event(&event).unwrap();
        assert_eq!(entry.event_id, event.id);
        assert_eq!(entry.event_type_name, "StubEvent");
        assert_eq!(entry.state, EventState::NotPublished);
        assert_eq!(entry.times_sent, 0);
        assert_eq!(entry.content["answer"], 42);
    }

    #[test]
    fn test_event_state_round_trips_as_string() {
        assert_eq!(EventState::NotPublished.to_string(), "not_published");
        assert_eq!(
            "publish_failed".parse::<EventState>().unwrap(),
            EventState::PublishFailed
        );
    }
}
