//! Catalog Domain
//!
//! Complete domain implementation for the product catalog: paginated and
//! filtered listings, semantic search over item embeddings, and item
//! mutations that emit price-change integration events through the
//! transactional outbox.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation, embeddings, events
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pics;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use models::{
    CatalogBrand, CatalogFilter, CatalogItem, CatalogType, CreateCatalogItem, PageRequest,
    PaginatedItems, ProductPriceChangedIntegrationEvent, UpdateCatalogItem,
};
pub use pics::PictureStore;
pub use postgres::PgCatalogRepository;
pub use repository::{CatalogRepository, InMemoryCatalogRepository};
pub use service::CatalogService;
