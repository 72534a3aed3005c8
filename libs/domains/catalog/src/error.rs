use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Item with id {0} not found")]
    NotFound(i64),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Embedding error: {0}")]
    Embedding(#[from] domain_ai::AiError),

    #[error("Event error: {0}")]
    Event(#[from] domain_events::EventError),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => {
                AppError::NotFound(format!("Item with id {} not found", id))
            }
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::Embedding(err) => AppError::InternalServerError(err.to_string()),
            CatalogError::Event(err) => AppError::InternalServerError(err.to_string()),
            CatalogError::Database(err) => AppError::InternalServerError(err.to_string()),
            CatalogError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
