//! Custom Axum extractors.

mod positive_id;
mod validated_json;

pub use positive_id::PositiveIdPath;
pub use validated_json::ValidatedJson;
