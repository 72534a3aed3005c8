//! Integration event error types

use uuid::Uuid;

/// Result type for event log and bus operations
pub type Result<T> = std::result::Result<T, EventError>;

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Event log entry not found: {0}")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Publish failed: {0}")]
    Publish(String),
}

impl From<reqwest::Error> for EventError {
    fn from(err: reqwest::Error) -> Self {
        Self::Publish(err.to_string())
    }
}
