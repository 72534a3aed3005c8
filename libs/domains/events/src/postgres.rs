//! PostgreSQL event log repository

use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::entity;
use crate::error::{EventError, Result};
use crate::models::{EventLogEntry, EventState, IntegrationEvent};
use crate::repository::EventLogRepository;

fn active_model(entry: &EventLogEntry) -> entity::ActiveModel {
    entity::ActiveModel {
        event_id: Set(entry.event_id),
        event_type_name: Set(entry.event_type_name.clone()),
        state: Set(entry.state.to_string()),
        times_sent: Set(entry.times_sent),
        creation_time: Set(entry.creation_time),
        content: Set(entry.content.clone()),
    }
}

/// Appends an outbox entry on the caller's connection.
///
/// Callers that save domain state and the event atomically pass their open
/// transaction here, so the entry commits or rolls back with the state.
pub async fn append_in_txn<C, E>(conn: &C, event: &E) -> Result<EventLogEntry>
where
    C: ConnectionTrait,
    E: IntegrationEvent,
{
    let entry = EventLogEntry::from_event(event)?;
    entity::Entity::insert(active_model(&entry)).exec(conn).await?;
    Ok(entry)
}

#[derive(Clone)]
pub struct PgEventLogRepository {
    db: DatabaseConnection,
}

impl PgEventLogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn set_state(&self, event_id: Uuid, state: EventState, bump_sent: bool) -> Result<()> {
        let model = entity::Entity::find_by_id(event_id)
            .one(&self.db)
            .await?
            .ok_or(EventError::NotFound(event_id))?;

        let times_sent = model.times_sent;
        let mut active: entity::ActiveModel = model.into();
        active.state = Set(state.to_string());
        if bump_sent {
            active.times_sent = Set(times_sent + 1);
        }
        entity::Entity::update(active).exec(&self.db).await?;
        Ok(())
    }
}

#[async_trait]
impl EventLogRepository for PgEventLogRepository {
    async fn append(&self, entry: EventLogEntry) -> Result<()> {
        entity::Entity::insert(active_model(&entry))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn find(&self, event_id: Uuid) -> Result<Option<EventLogEntry>> {
        let model = entity::Entity::find_by_id(event_id).one(&self.db).await?;
        Ok(model.map(EventLogEntry::from))
    }

    async fn not_published(&self) -> Result<Vec<EventLogEntry>> {
        let models = entity::Entity::find()
            .filter(entity::Column::State.ne(EventState::Published.to_string()))
            .order_by_asc(entity::Column::CreationTime)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(EventLogEntry::from).collect())
    }

    async fn mark_in_progress(&self, event_id: Uuid) -> Result<()> {
        self.set_state(event_id, EventState::InProgress, true).await
    }

    async fn mark_published(&self, event_id: Uuid) -> Result<()> {
        self.set_state(event_id, EventState::Published, false).await
    }

    async fn mark_failed(&self, event_id: Uuid) -> Result<()> {
        self.set_state(event_id, EventState::PublishFailed, false)
            .await
    }
}
