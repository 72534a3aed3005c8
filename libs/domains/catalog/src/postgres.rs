use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::sea_query::{Expr, extension::postgres::PgExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Statement, TransactionTrait,
};

use domain_events::append_in_txn;

use crate::{
    entity,
    error::{CatalogError, CatalogResult},
    models::{
        CatalogBrand, CatalogFilter, CatalogItem, CatalogType, CreateCatalogItem, PageRequest,
        PaginatedItems, ProductPriceChangedIntegrationEvent,
    },
    repository::CatalogRepository,
};

/// Mapped columns of `catalog_item`, for raw queries that must skip the
/// unmapped `embedding` column.
const ITEM_COLUMNS: &str = "id, name, description, price, picture_file_name, catalog_type_id, \
     catalog_brand_id, available_stock, restock_threshold, max_stock_threshold, on_reorder";

/// pgvector text literal, e.g. `[0.1,0.2,0.3]`
fn vector_literal(embedding: &[f32]) -> String {
    let values: Vec<String> = embedding.iter().map(|v| v.to_string()).collect();
    format!("[{}]", values.join(","))
}

/// Escapes LIKE/ILIKE wildcards so user input matches literally.
fn escape_like(prefix: &str) -> String {
    prefix.replace('%', "\\%").replace('_', "\\_")
}

fn page_offset(page: PageRequest) -> CatalogResult<u64> {
    page.offset()
        .ok_or_else(|| CatalogError::Validation("Page index out of range".to_string()))
}

pub struct PgCatalogRepository {
    base: BaseRepository<entity::item::Entity>,
}

impl PgCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Applies the list filters to a select; used for both the count and
    /// the page slice so they always agree.
    fn filtered_query(
        filter: &CatalogFilter,
    ) -> sea_orm::Select<entity::item::Entity> {
        let mut query = entity::item::Entity::find();

        if let Some(ref name) = filter.name {
            // ILIKE: the prefix match is case-insensitive
            query = query.filter(
                Expr::col(entity::item::Column::Name).ilike(format!("{}%", escape_like(name))),
            );
        }
        if let Some(type_id) = filter.type_id {
            query = query.filter(entity::item::Column::CatalogTypeId.eq(type_id));
        }
        if let Some(brand_id) = filter.brand_id {
            query = query.filter(entity::item::Column::CatalogBrandId.eq(brand_id));
        }

        query
    }

    async fn write_embedding<C: ConnectionTrait>(
        conn: &C,
        id: i64,
        embedding: &[f32],
    ) -> CatalogResult<()> {
        conn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "UPDATE catalog_item SET embedding = $1::vector WHERE id = $2",
            [vector_literal(embedding).into(), id.into()],
        ))
        .await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn page_items(
        &self,
        filter: &CatalogFilter,
        page: PageRequest,
    ) -> CatalogResult<PaginatedItems> {
        let offset = page_offset(page)?;

        let count = Self::filtered_query(filter).count(self.base.db()).await?;

        let models = Self::filtered_query(filter)
            .order_by_asc(entity::item::Column::Name)
            .order_by_asc(entity::item::Column::Id)
            .limit(page.page_size)
            .offset(offset)
            .all(self.base.db())
            .await?;

        Ok(PaginatedItems {
            page_index: page.page_index,
            page_size: page.page_size,
            count,
            data: models.into_iter().map(CatalogItem::from).collect(),
        })
    }

    async fn items_by_ids(&self, ids: &[i64]) -> CatalogResult<Vec<CatalogItem>> {
        let models = entity::item::Entity::find()
            .filter(entity::item::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(entity::item::Column::Id)
            .all(self.base.db())
            .await?;
        Ok(models.into_iter().map(CatalogItem::from).collect())
    }

    async fn find_item(&self, id: i64) -> CatalogResult<Option<CatalogItem>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(CatalogItem::from))
    }

    async fn page_by_semantic_distance(
        &self,
        embedding: &[f32],
        page: PageRequest,
    ) -> CatalogResult<PaginatedItems> {
        let offset = page_offset(page)?;

        let count_row = self
            .base
            .db()
            .query_one(Statement::from_string(
                DatabaseBackend::Postgres,
                "SELECT COUNT(*) AS count FROM catalog_item WHERE embedding IS NOT NULL",
            ))
            .await?;
        let count: i64 = match count_row {
            Some(row) => row.try_get("", "count")?,
            None => 0,
        };

        let models = entity::item::Entity::find()
            .from_raw_sql(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                format!(
                    "SELECT {} FROM catalog_item WHERE embedding IS NOT NULL \
                     ORDER BY embedding <=> $1::vector LIMIT $2 OFFSET $3",
                    ITEM_COLUMNS
                ),
                [
                    vector_literal(embedding).into(),
                    (page.page_size as i64).into(),
                    (offset as i64).into(),
                ],
            ))
            .all(self.base.db())
            .await?;

        Ok(PaginatedItems {
            page_index: page.page_index,
            page_size: page.page_size,
            count: count as u64,
            data: models.into_iter().map(CatalogItem::from).collect(),
        })
    }

    async fn brands(&self) -> CatalogResult<Vec<CatalogBrand>> {
        let models = entity::brand::Entity::find()
            .order_by_asc(entity::brand::Column::Id)
            .all(self.base.db())
            .await?;
        Ok(models.into_iter().map(CatalogBrand::from).collect())
    }

    async fn types(&self) -> CatalogResult<Vec<CatalogType>> {
        let models = entity::catalog_type::Entity::find()
            .order_by_asc(entity::catalog_type::Column::Id)
            .all(self.base.db())
            .await?;
        Ok(models.into_iter().map(CatalogType::from).collect())
    }

    async fn create_item(
        &self,
        input: CreateCatalogItem,
        embedding: Option<Vec<f32>>,
    ) -> CatalogResult<CatalogItem> {
        let txn = self.base.db().begin().await?;

        let active_model: entity::item::ActiveModel = input.into();
        let model = entity::item::Entity::insert(active_model)
            .exec_with_returning(&txn)
            .await?;

        if let Some(ref embedding) = embedding {
            Self::write_embedding(&txn, model.id, embedding).await?;
        }

        txn.commit().await?;

        tracing::info!(item_id = model.id, "Created catalog item");
        Ok(model.into())
    }

    async fn update_item(
        &self,
        item: CatalogItem,
        embedding: Option<Vec<f32>>,
        price_event: Option<ProductPriceChangedIntegrationEvent>,
    ) -> CatalogResult<CatalogItem> {
        let id = item.id;
        let txn = self.base.db().begin().await?;

        let active_model: entity::item::ActiveModel = item.into();
        let model = entity::item::Entity::update(active_model)
            .exec(&txn)
            .await
            .map_err(|err| match err {
                sea_orm::DbErr::RecordNotFound(_) => CatalogError::NotFound(id),
                err => CatalogError::Database(err),
            })?;

        if let Some(ref embedding) = embedding {
            Self::write_embedding(&txn, id, embedding).await?;
        }

        // The price event commits or rolls back with the item row.
        if let Some(ref event) = price_event {
            append_in_txn(&txn, event).await?;
        }

        txn.commit().await?;

        tracing::info!(item_id = id, price_changed = price_event.is_some(), "Updated catalog item");
        Ok(model.into())
    }

    async fn delete_item(&self, id: i64) -> CatalogResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::QueryTrait;

    #[test]
    fn test_vector_literal_format() {
        assert_eq!(vector_literal(&[0.5, -1.0, 2.0]), "[0.5,-1,2]");
        assert_eq!(vector_literal(&[]), "[]");
    }

    #[test]
    fn test_name_filter_is_case_insensitive() {
        let filter = CatalogFilter {
            name: Some("alpine".to_string()),
            ..Default::default()
        };

        let sql = PgCatalogRepository::filtered_query(&filter)
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(sql.contains("ILIKE"), "prefix match must ignore case: {}", sql);
        assert!(sql.contains("alpine%"), "{}", sql);
    }

    #[test]
    fn test_escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("100%_wool"), "100\\%\\_wool");
        assert_eq!(escape_like("alpine"), "alpine");
    }
}
