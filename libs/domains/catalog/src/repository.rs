use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use domain_ai::cosine_distance;
use domain_events::{EventLogEntry, EventLogRepository, InMemoryEventLog};

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    CatalogBrand, CatalogFilter, CatalogItem, CatalogType, CreateCatalogItem, PageRequest,
    PaginatedItems, ProductPriceChangedIntegrationEvent,
};

/// Repository trait for catalog persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// One page of items under the filter, plus the total count computed
    /// with the same predicate.
    async fn page_items(
        &self,
        filter: &CatalogFilter,
        page: PageRequest,
    ) -> CatalogResult<PaginatedItems>;

    /// Items matching any of the given ids, in id order.
    async fn items_by_ids(&self, ids: &[i64]) -> CatalogResult<Vec<CatalogItem>>;

    async fn find_item(&self, id: i64) -> CatalogResult<Option<CatalogItem>>;

    /// One page of items ordered by vector distance to the query embedding.
    async fn page_by_semantic_distance(
        &self,
        embedding: &[f32],
        page: PageRequest,
    ) -> CatalogResult<PaginatedItems>;

    async fn brands(&self) -> CatalogResult<Vec<CatalogBrand>>;

    async fn types(&self) -> CatalogResult<Vec<CatalogType>>;

    async fn create_item(
        &self,
        input: CreateCatalogItem,
        embedding: Option<Vec<f32>>,
    ) -> CatalogResult<CatalogItem>;

    /// Persists the full item state. When a price event is given it is
    /// appended to the integration event log atomically with the item.
    async fn update_item(
        &self,
        item: CatalogItem,
        embedding: Option<Vec<f32>>,
        price_event: Option<ProductPriceChangedIntegrationEvent>,
    ) -> CatalogResult<CatalogItem>;

    /// Returns false when no item with the id existed.
    async fn delete_item(&self, id: i64) -> CatalogResult<bool>;
}

fn matches_filter(item: &CatalogItem, filter: &CatalogFilter) -> bool {
    if let Some(ref prefix) = filter.name {
        if !item.name.to_lowercase().starts_with(&prefix.to_lowercase()) {
            return false;
        }
    }
    if let Some(type_id) = filter.type_id {
        if item.catalog_type_id != type_id {
            return false;
        }
    }
    if let Some(brand_id) = filter.brand_id {
        if item.catalog_brand_id != brand_id {
            return false;
        }
    }
    true
}

fn page_offset(page: PageRequest) -> CatalogResult<u64> {
    page.offset()
        .ok_or_else(|| CatalogError::Validation("Page index out of range".to_string()))
}

struct Inner {
    items: HashMap<i64, CatalogItem>,
    embeddings: HashMap<i64, Vec<f32>>,
    brands: Vec<CatalogBrand>,
    types: Vec<CatalogType>,
}

/// In-memory implementation of CatalogRepository (for development/testing)
#[derive(Clone)]
pub struct InMemoryCatalogRepository {
    inner: Arc<RwLock<Inner>>,
    next_id: Arc<AtomicI64>,
    event_log: Arc<InMemoryEventLog>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::with_event_log(Arc::new(InMemoryEventLog::new()))
    }

    pub fn with_event_log(event_log: Arc<InMemoryEventLog>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                items: HashMap::new(),
                embeddings: HashMap::new(),
                brands: Vec::new(),
                types: Vec::new(),
            })),
            next_id: Arc::new(AtomicI64::new(1)),
            event_log,
        }
    }

    pub async fn set_lookups(&self, brands: Vec<CatalogBrand>, types: Vec<CatalogType>) {
        let mut inner = self.inner.write().await;
        inner.brands = brands;
        inner.types = types;
    }

    pub fn event_log(&self) -> Arc<InMemoryEventLog> {
        self.event_log.clone()
    }
}

impl Default for InMemoryCatalogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn page_items(
        &self,
        filter: &CatalogFilter,
        page: PageRequest,
    ) -> CatalogResult<PaginatedItems> {
        let offset = page_offset(page)?;
        let inner = self.inner.read().await;

        let mut matching: Vec<CatalogItem> = inner
            .items
            .values()
            .filter(|item| matches_filter(item, filter))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let count = matching.len() as u64;
        let data: Vec<CatalogItem> = matching
            .into_iter()
            .skip(offset as usize)
            .take(page.page_size as usize)
            .collect();

        Ok(PaginatedItems {
            page_index: page.page_index,
            page_size: page.page_size,
            count,
            data,
        })
    }

    async fn items_by_ids(&self, ids: &[i64]) -> CatalogResult<Vec<CatalogItem>> {
        let inner = self.inner.read().await;
        let mut items: Vec<CatalogItem> = ids
            .iter()
            .filter_map(|id| inner.items.get(id).cloned())
            .collect();
        items.sort_by_key(|item| item.id);
        items.dedup_by_key(|item| item.id);
        Ok(items)
    }

    async fn find_item(&self, id: i64) -> CatalogResult<Option<CatalogItem>> {
        let inner = self.inner.read().await;
        Ok(inner.items.get(&id).cloned())
    }

    async fn page_by_semantic_distance(
        &self,
        embedding: &[f32],
        page: PageRequest,
    ) -> CatalogResult<PaginatedItems> {
        let offset = page_offset(page)?;
        let inner = self.inner.read().await;

        let mut scored: Vec<(f32, CatalogItem)> = inner
            .items
            .values()
            .filter_map(|item| {
                inner
                    .embeddings
                    .get(&item.id)
                    .map(|e| (cosine_distance(embedding, e), item.clone()))
            })
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.id.cmp(&b.1.id)));

        let count = scored.len() as u64;
        let data: Vec<CatalogItem> = scored
            .into_iter()
            .map(|(_, item)| item)
            .skip(offset as usize)
            .take(page.page_size as usize)
            .collect();

        Ok(PaginatedItems {
            page_index: page.page_index,
            page_size: page.page_size,
            count,
            data,
        })
    }

    async fn brands(&self) -> CatalogResult<Vec<CatalogBrand>> {
        let inner = self.inner.read().await;
        Ok(inner.brands.clone())
    }

    async fn types(&self) -> CatalogResult<Vec<CatalogType>> {
        let inner = self.inner.read().await;
        Ok(inner.types.clone())
    }

    async fn create_item(
        &self,
        input: CreateCatalogItem,
        embedding: Option<Vec<f32>>,
    ) -> CatalogResult<CatalogItem> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let item = CatalogItem {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            picture_file_name: input.picture_file_name,
            catalog_type_id: input.catalog_type_id,
            catalog_brand_id: input.catalog_brand_id,
            available_stock: input.available_stock,
            restock_threshold: input.restock_threshold,
            max_stock_threshold: input.max_stock_threshold,
            on_reorder: input.on_reorder,
        };

        let mut inner = self.inner.write().await;
        if let Some(embedding) = embedding {
            inner.embeddings.insert(id, embedding);
        }
        inner.items.insert(id, item.clone());

        tracing::info!(item_id = id, "Created catalog item");
        Ok(item)
    }

    async fn update_item(
        &self,
        item: CatalogItem,
        embedding: Option<Vec<f32>>,
        price_event: Option<ProductPriceChangedIntegrationEvent>,
    ) -> CatalogResult<CatalogItem> {
        let mut inner = self.inner.write().await;
        if !inner.items.contains_key(&item.id) {
            return Err(CatalogError::NotFound(item.id));
        }

        if let Some(embedding) = embedding {
            inner.embeddings.insert(item.id, embedding);
        }
        inner.items.insert(item.id, item.clone());

        if let Some(event) = price_event {
            let entry = EventLogEntry::from_event(&event)
                .map_err(|e| CatalogError::Internal(e.to_string()))?;
            self.event_log.append(entry).await?;
        }

        tracing::info!(item_id = item.id, "Updated catalog item");
        Ok(item)
    }

    async fn delete_item(&self, id: i64) -> CatalogResult<bool> {
        let mut inner = self.inner.write().await;
        inner.embeddings.remove(&id);
        if inner.items.remove(&id).is_some() {
            tracing::info!(item_id = id, "Deleted catalog item");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
