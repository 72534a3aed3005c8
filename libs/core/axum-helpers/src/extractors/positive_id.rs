//! Integer path parameter extractor with positivity validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// Extractor for positive integer path parameters.
///
/// Parses the path segment as `i64` and rejects zero or negative values
/// with a structured bad-request response, before any handler logic runs.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::PositiveIdPath;
///
/// async fn get_item(PositiveIdPath(id): PositiveIdPath) -> String {
///     format!("Item ID: {}", id)
/// }
///
/// let app = Router::new().route("/items/{id}", get(get_item));
/// ```
pub struct PositiveIdPath(pub i64);

impl<S> FromRequestParts<S> for PositiveIdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(PositiveIdPath(id)),
            Ok(id) => Err(AppError::BadRequest(format!("Id is not valid: {}", id)).into_response()),
            Err(_) => {
                Err(AppError::BadRequest(format!("Id is not valid: {}", raw)).into_response())
            }
        }
    }
}
