use std::sync::Arc;
use validator::Validate;

use domain_ai::CatalogAi;
use domain_events::IntegrationEventService;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    CatalogBrand, CatalogFilter, CatalogItem, CatalogType, CreateCatalogItem, PageRequest,
    PaginatedItems, ProductPriceChangedIntegrationEvent, UpdateCatalogItem,
};
use crate::pics::PictureStore;
use crate::repository::CatalogRepository;

/// Service layer for catalog business logic
pub struct CatalogService<R: CatalogRepository> {
    repository: Arc<R>,
    ai: CatalogAi,
    events: IntegrationEventService,
    pics: Arc<PictureStore>,
}

impl<R: CatalogRepository> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            ai: self.ai.clone(),
            events: self.events.clone(),
            pics: self.pics.clone(),
        }
    }
}

fn check_id(id: i64) -> CatalogResult<()> {
    if id <= 0 {
        return Err(CatalogError::Validation(format!("Id is not valid: {}", id)));
    }
    Ok(())
}

fn check_page(page: PageRequest) -> CatalogResult<()> {
    if page.page_size == 0 {
        return Err(CatalogError::Validation(
            "Page size must be greater than zero".to_string(),
        ));
    }
    if page.offset().is_none() {
        return Err(CatalogError::Validation(
            "Page index out of range".to_string(),
        ));
    }
    Ok(())
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(
        repository: R,
        ai: CatalogAi,
        events: IntegrationEventService,
        pics: PictureStore,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            ai,
            events,
            pics: Arc::new(pics),
        }
    }

    /// One page of items under conjunctive filters.
    pub async fn get_items(
        &self,
        filter: CatalogFilter,
        page: PageRequest,
    ) -> CatalogResult<PaginatedItems> {
        check_page(page)?;
        self.repository.page_items(&filter, page).await
    }

    /// Items matching the given ids; unknown ids are skipped.
    pub async fn get_items_by_ids(&self, ids: &[i64]) -> CatalogResult<Vec<CatalogItem>> {
        self.repository.items_by_ids(ids).await
    }

    pub async fn get_item(&self, id: i64) -> CatalogResult<CatalogItem> {
        check_id(id)?;
        self.repository
            .find_item(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Items whose name starts with the given prefix.
    pub async fn get_items_by_name(
        &self,
        name: &str,
        page: PageRequest,
    ) -> CatalogResult<PaginatedItems> {
        check_page(page)?;
        let filter = CatalogFilter {
            name: Some(name.to_string()),
            ..Default::default()
        };
        self.repository.page_items(&filter, page).await
    }

    /// Semantic search over item embeddings. Falls back to name prefix
    /// search when no embedding provider is configured.
    pub async fn get_items_with_semantic_relevance(
        &self,
        text: &str,
        page: PageRequest,
    ) -> CatalogResult<PaginatedItems> {
        check_page(page)?;

        if !self.ai.is_enabled() {
            return self.get_items_by_name(text, page).await;
        }

        let embedding = self.ai.embed_query(text).await?;
        self.repository
            .page_by_semantic_distance(&embedding, page)
            .await
    }

    pub async fn get_items_by_type_and_brand(
        &self,
        type_id: Option<i32>,
        brand_id: Option<i32>,
        page: PageRequest,
    ) -> CatalogResult<PaginatedItems> {
        check_page(page)?;
        let filter = CatalogFilter {
            name: None,
            type_id,
            brand_id,
        };
        self.repository.page_items(&filter, page).await
    }

    pub async fn get_brands(&self) -> CatalogResult<Vec<CatalogBrand>> {
        self.repository.brands().await
    }

    pub async fn get_types(&self) -> CatalogResult<Vec<CatalogType>> {
        self.repository.types().await
    }

    /// The item's picture bytes and MIME type.
    pub async fn get_item_picture(&self, id: i64) -> CatalogResult<(Vec<u8>, &'static str)> {
        let item = self.get_item(id).await?;
        let file_name = item
            .picture_file_name
            .ok_or(CatalogError::NotFound(id))?;

        let bytes = self.pics.read(&file_name).await.map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                CatalogError::NotFound(id)
            } else {
                CatalogError::Internal(format!("Failed to read picture: {}", err))
            }
        })?;

        Ok((bytes, PictureStore::mime_for(&file_name)))
    }

    pub async fn create_item(&self, input: CreateCatalogItem) -> CatalogResult<CatalogItem> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let embedding = if self.ai.is_enabled() {
            Some(
                self.ai
                    .embedding_for_item(&input.name, &input.description)
                    .await?,
            )
        } else {
            None
        };

        self.repository.create_item(input, embedding).await
    }

    /// Full replacement update. A price change additionally records a
    /// `ProductPriceChangedIntegrationEvent` in the same transaction and
    /// publishes it after commit; a publish failure does not fail the
    /// request since the outbox entry survives for later redelivery.
    pub async fn update_item(
        &self,
        id: i64,
        input: UpdateCatalogItem,
    ) -> CatalogResult<CatalogItem> {
        check_id(id)?;
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let mut item = self
            .repository
            .find_item(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        let old_price = item.price;
        let text_changed = item.name != input.name || item.description != input.description;
        item.apply_update(input);

        let price_event = (item.price != old_price)
            .then(|| ProductPriceChangedIntegrationEvent::new(id, item.price, old_price));
        let event_id = price_event.as_ref().map(|e| e.event_id);

        let embedding = if self.ai.is_enabled() && text_changed {
            Some(
                self.ai
                    .embedding_for_item(&item.name, &item.description)
                    .await?,
            )
        } else {
            None
        };

        let updated = self
            .repository
            .update_item(item, embedding, price_event)
            .await?;

        if let Some(event_id) = event_id {
            if let Err(err) = self.events.publish_through_bus(event_id).await {
                tracing::error!(
                    error = %err,
                    event_id = %event_id,
                    item_id = id,
                    "Price change event left unpublished"
                );
            }
        }

        Ok(updated)
    }

    pub async fn delete_item(&self, id: i64) -> CatalogResult<()> {
        check_id(id)?;
        let deleted = self.repository.delete_item(id).await?;

        if !deleted {
            return Err(CatalogError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryCatalogRepository, MockCatalogRepository};
    use domain_ai::{CatalogAi, EmbeddingModel, StaticEmbeddingProvider};
    use domain_events::{EventLogRepository, EventState, InMemoryEventBus, InMemoryEventLog};
    use rust_decimal::Decimal;

    fn events_with_log(log: Arc<InMemoryEventLog>) -> (IntegrationEventService, Arc<InMemoryEventBus>) {
        let bus = Arc::new(InMemoryEventBus::new());
        (IntegrationEventService::new(log, bus.clone()), bus)
    }

    fn in_memory_service() -> (
        CatalogService<InMemoryCatalogRepository>,
        InMemoryCatalogRepository,
        Arc<InMemoryEventBus>,
    ) {
        let repo = InMemoryCatalogRepository::new();
        let (events, bus) = events_with_log(repo.event_log());
        let service = CatalogService::new(
            repo.clone(),
            CatalogAi::disabled(),
            events,
            PictureStore::new("pics"),
        );
        (service, repo, bus)
    }

    fn create_input(name: &str, cents: i64) -> CreateCatalogItem {
        CreateCatalogItem {
            name: name.to_string(),
            description: format!("{} description", name),
            price: Decimal::new(cents, 2),
            picture_file_name: None,
            catalog_type_id: 1,
            catalog_brand_id: 1,
            available_stock: 10,
            restock_threshold: 2,
            max_stock_threshold: 100,
            on_reorder: false,
        }
    }

    fn update_input(name: &str, cents: i64) -> UpdateCatalogItem {
        UpdateCatalogItem {
            name: name.to_string(),
            description: format!("{} description", name),
            price: Decimal::new(cents, 2),
            picture_file_name: None,
            catalog_type_id: 1,
            catalog_brand_id: 1,
            available_stock: 10,
            restock_threshold: 2,
            max_stock_threshold: 100,
            on_reorder: false,
        }
    }

    #[tokio::test]
    async fn test_get_item_rejects_non_positive_id_before_store() {
        let mut mock_repo = MockCatalogRepository::new();
        mock_repo.expect_find_item().times(0);

        let (events, _) = events_with_log(Arc::new(InMemoryEventLog::new()));
        let service = CatalogService::new(
            mock_repo,
            CatalogAi::disabled(),
            events,
            PictureStore::new("pics"),
        );

        for id in [0, -1, -42] {
            let result = service.get_item(id).await;
            assert!(matches!(result, Err(CatalogError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_get_item_missing_is_not_found() {
        let (service, _, _) = in_memory_service();
        let result = service.get_item(12345).await;
        assert!(matches!(result, Err(CatalogError::NotFound(12345))));
    }

    #[tokio::test]
    async fn test_get_items_rejects_zero_page_size() {
        let (service, _, _) = in_memory_service();
        let result = service
            .get_items(
                CatalogFilter::default(),
                PageRequest {
                    page_index: 0,
                    page_size: 0,
                },
            )
            .await;
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_semantic_search_disabled_equals_name_search() {
        let (service, _, _) = in_memory_service();
        service.create_item(create_input("Alpine Fork", 995)).await.unwrap();
        service.create_item(create_input("Alpine Saddle", 1250)).await.unwrap();
        service.create_item(create_input("Trail Helmet", 2000)).await.unwrap();

        let semantic = service
            .get_items_with_semantic_relevance("Alpine", PageRequest::default())
            .await
            .unwrap();
        let by_name = service
            .get_items_by_name("Alpine", PageRequest::default())
            .await
            .unwrap();

        assert_eq!(semantic.count, 2);
        assert_eq!(semantic.data, by_name.data);
    }

    #[tokio::test]
    async fn test_semantic_search_enabled_uses_embeddings() {
        let repo = InMemoryCatalogRepository::new();
        let (events, _) = events_with_log(repo.event_log());
        let ai = CatalogAi::new(
            Arc::new(StaticEmbeddingProvider::new()),
            EmbeddingModel::Custom(8),
        );
        let service = CatalogService::new(repo.clone(), ai, events, PictureStore::new("pics"));

        service.create_item(create_input("Alpine Fork", 995)).await.unwrap();
        service.create_item(create_input("Trail Helmet", 2000)).await.unwrap();

        let page = service
            .get_items_with_semantic_relevance("Alpine Fork Alpine Fork description", PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.count, 2);
    }

    #[tokio::test]
    async fn test_price_change_emits_exactly_one_event() {
        let (service, repo, bus) = in_memory_service();
        let item = service.create_item(create_input("Alpine Fork", 995)).await.unwrap();

        service
            .update_item(item.id, update_input("Alpine Fork", 1250))
            .await
            .unwrap();

        let published = bus.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0, "ProductPriceChangedIntegrationEvent");
        assert_eq!(published[0].1["product_id"], item.id);
        assert_eq!(published[0].1["old_price"], "9.95");
        assert_eq!(published[0].1["new_price"], "12.50");

        let pending = repo.event_log().not_published().await.unwrap();
        assert!(pending.is_empty());
    }

    #[tokio::test]
    async fn test_unchanged_price_emits_no_event() {
        let (service, _, bus) = in_memory_service();
        let item = service.create_item(create_input("Alpine Fork", 995)).await.unwrap();

        service
            .update_item(item.id, update_input("Alpine Fork Mk2", 995))
            .await
            .unwrap();

        assert!(bus.published().is_empty());
    }

    #[tokio::test]
    async fn test_publish_failure_keeps_update_and_outbox_entry() {
        let (service, repo, bus) = in_memory_service();
        let item = service.create_item(create_input("Alpine Fork", 995)).await.unwrap();

        bus.fail_next();
        let updated = service
            .update_item(item.id, update_input("Alpine Fork", 1250))
            .await
            .unwrap();
        assert_eq!(updated.price, Decimal::new(1250, 2));

        let pending = repo.event_log().not_published().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].state, EventState::PublishFailed);
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let (service, _, _) = in_memory_service();
        let result = service.update_item(777, update_input("Ghost", 100)).await;
        assert!(matches!(result, Err(CatalogError::NotFound(777))));
    }

    #[tokio::test]
    async fn test_delete_missing_item_is_not_found() {
        let (service, _, _) = in_memory_service();
        let result = service.delete_item(777).await;
        assert!(matches!(result, Err(CatalogError::NotFound(777))));
    }

    #[tokio::test]
    async fn test_create_item_validates_input() {
        let (service, _, _) = in_memory_service();
        let result = service.create_item(create_input("", 995)).await;
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }
}
