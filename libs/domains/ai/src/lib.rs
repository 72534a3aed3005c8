//! AI Domain
//!
//! Embedding generation for the catalog: a provider trait with an OpenAI
//! implementation, and the [`CatalogAi`] facade that the catalog service
//! branches on. When no provider is configured the facade reports itself
//! disabled and callers fall back to plain text search.

pub mod distance;
pub mod embedding;
pub mod error;
pub mod models;
pub mod service;

pub use distance::cosine_distance;
pub use embedding::{EmbeddingProvider, OpenAIConfig, OpenAIProvider, StaticEmbeddingProvider};
pub use error::{AiError, AiResult};
pub use models::{EmbeddingModel, EmbeddingResult};
pub use service::CatalogAi;
