//! API routes module

pub mod health;

use axum::Router;
use domain_ai::CatalogAi;
use domain_catalog::{CatalogService, PgCatalogRepository, PictureStore, handlers};
use domain_events::{DaprEventBus, IntegrationEventService, PgEventLogRepository};
use std::sync::Arc;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> eyre::Result<Router> {
    let repository = PgCatalogRepository::new(state.db.clone());

    let event_log = Arc::new(PgEventLogRepository::new(state.db.clone()));
    let event_bus = Arc::new(DaprEventBus::from_env(state.config.app.name));
    let events = IntegrationEventService::new(event_log, event_bus);

    let ai = CatalogAi::from_env()?;
    let pics = PictureStore::from_env();

    let service = CatalogService::new(repository, ai, events, pics);

    Ok(Router::new().nest("/catalog", handlers::router(service)))
}
