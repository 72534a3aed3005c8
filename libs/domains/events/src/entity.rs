//! SeaORM entity for the `integration_event_log` table

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::models::{EventLogEntry, EventState};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "integration_event_log")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_id: Uuid,
    pub event_type_name: String,
    pub state: String,
    pub times_sent: i32,
    pub creation_time: DateTime<Utc>,
    #[sea_orm(column_type = "JsonBinary")]
    pub content: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for EventLogEntry {
    fn from(model: Model) -> Self {
        Self {
            event_id: model.event_id,
            event_type_name: model.event_type_name,
            state: model.state.parse().unwrap_or(EventState::NotPublished),
            times_sent: model.times_sent,
            creation_time: model.creation_time,
            content: model.content,
        }
    }
}

impl From<EventLogEntry> for Model {
    fn from(entry: EventLogEntry) -> Self {
        Self {
            event_id: entry.event_id,
            event_type_name: entry.event_type_name,
            state: entry.state.to_string(),
            times_sent: entry.times_sent,
            creation_time: entry.creation_time,
            content: entry.content,
        }
    }
}
