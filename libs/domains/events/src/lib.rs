//! Integration Events Domain
//!
//! Transactional outbox for integration events:
//! - Postgres `integration_event_log` table written in the same
//!   transaction as the domain change
//! - Dapr pub/sub for distributing committed events
//!
//! The flow is append (inside the caller's transaction), commit, then
//! [`IntegrationEventService::publish_through_bus`] to push the entry
//! through the bus and record the outcome.

mod bus;
pub mod entity;
mod error;
mod models;
mod postgres;
mod repository;
mod service;

pub use bus::{DaprEventBus, EventBus, InMemoryEventBus};
pub use error::{EventError, Result};
pub use models::{CloudEvent, EventLogEntry, EventState, IntegrationEvent};
pub use postgres::{PgEventLogRepository, append_in_txn};
pub use repository::{EventLogRepository, InMemoryEventLog};
pub use service::IntegrationEventService;
