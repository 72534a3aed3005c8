use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Semantic search needs the pgvector extension
        manager
            .get_connection()
            .execute_unprepared("CREATE EXTENSION IF NOT EXISTS vector")
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CatalogBrand::Table)
                    .if_not_exists()
                    .col(pk_auto(CatalogBrand::Id))
                    .col(string_len(CatalogBrand::Brand, 100))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CatalogType::Table)
                    .if_not_exists()
                    .col(pk_auto(CatalogType::Id))
                    .col(string_len(CatalogType::Type, 100))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CatalogItem::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CatalogItem::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(CatalogItem::Name, 50))
                    .col(text(CatalogItem::Description).default(""))
                    .col(
                        ColumnDef::new(CatalogItem::Price)
                            .decimal_len(18, 2)
                            .not_null(),
                    )
                    .col(string_null(CatalogItem::PictureFileName))
                    .col(integer(CatalogItem::CatalogTypeId))
                    .col(integer(CatalogItem::CatalogBrandId))
                    .col(integer(CatalogItem::AvailableStock).default(0))
                    .col(integer(CatalogItem::RestockThreshold).default(0))
                    .col(integer(CatalogItem::MaxStockThreshold).default(0))
                    .col(boolean(CatalogItem::OnReorder).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_catalog_item_brand")
                            .from(CatalogItem::Table, CatalogItem::CatalogBrandId)
                            .to(CatalogBrand::Table, CatalogBrand::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_catalog_item_type")
                            .from(CatalogItem::Table, CatalogItem::CatalogTypeId)
                            .to(CatalogType::Table, CatalogType::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // The embedding column is managed through raw SQL only; the entity
        // does not map it.
        manager
            .get_connection()
            .execute_unprepared("ALTER TABLE catalog_item ADD COLUMN embedding vector(1536)")
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_catalog_item_name")
                    .table(CatalogItem::Table)
                    .col(CatalogItem::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_catalog_item_type_id")
                    .table(CatalogItem::Table)
                    .col(CatalogItem::CatalogTypeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_catalog_item_brand_id")
                    .table(CatalogItem::Table)
                    .col(CatalogItem::CatalogBrandId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CatalogItem::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CatalogType::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CatalogBrand::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CatalogBrand {
    Table,
    Id,
    Brand,
}

#[derive(DeriveIden)]
enum CatalogType {
    Table,
    Id,
    Type,
}

#[derive(DeriveIden)]
enum CatalogItem {
    Table,
    Id,
    Name,
    Description,
    Price,
    PictureFileName,
    CatalogTypeId,
    CatalogBrandId,
    AvailableStock,
    RestockThreshold,
    MaxStockThreshold,
    OnReorder,
}
