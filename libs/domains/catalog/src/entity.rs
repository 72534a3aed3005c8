//! Sea-ORM entities for the catalog tables.
//!
//! The `catalog_item` table also carries a pgvector `embedding` column that
//! is intentionally not mapped here; semantic search reads and writes it
//! through raw SQL in the Postgres repository.

pub mod item {
    use sea_orm::ActiveValue::{NotSet, Set};
    use sea_orm::entity::prelude::*;

    use crate::models::{CatalogItem, CreateCatalogItem};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "catalog_item")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub name: String,
        #[sea_orm(column_type = "Text")]
        pub description: String,
        #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
        pub price: Decimal,
        pub picture_file_name: Option<String>,
        pub catalog_type_id: i32,
        pub catalog_brand_id: i32,
        pub available_stock: i32,
        pub restock_threshold: i32,
        pub max_stock_threshold: i32,
        pub on_reorder: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::brand::Entity",
            from = "Column::CatalogBrandId",
            to = "super::brand::Column::Id"
        )]
        Brand,
        #[sea_orm(
            belongs_to = "super::catalog_type::Entity",
            from = "Column::CatalogTypeId",
            to = "super::catalog_type::Column::Id"
        )]
        Type,
    }

    impl Related<super::brand::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Brand.def()
        }
    }

    impl Related<super::catalog_type::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Type.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for CatalogItem {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
                description: model.description,
                price: model.price,
                picture_file_name: model.picture_file_name,
                catalog_type_id: model.catalog_type_id,
                catalog_brand_id: model.catalog_brand_id,
                available_stock: model.available_stock,
                restock_threshold: model.restock_threshold,
                max_stock_threshold: model.max_stock_threshold,
                on_reorder: model.on_reorder,
            }
        }
    }

    impl From<CreateCatalogItem> for ActiveModel {
        fn from(input: CreateCatalogItem) -> Self {
            ActiveModel {
                id: NotSet,
                name: Set(input.name),
                description: Set(input.description),
                price: Set(input.price),
                picture_file_name: Set(input.picture_file_name),
                catalog_type_id: Set(input.catalog_type_id),
                catalog_brand_id: Set(input.catalog_brand_id),
                available_stock: Set(input.available_stock),
                restock_threshold: Set(input.restock_threshold),
                max_stock_threshold: Set(input.max_stock_threshold),
                on_reorder: Set(input.on_reorder),
            }
        }
    }

    impl From<CatalogItem> for ActiveModel {
        fn from(item: CatalogItem) -> Self {
            ActiveModel {
                id: Set(item.id),
                name: Set(item.name),
                description: Set(item.description),
                price: Set(item.price),
                picture_file_name: Set(item.picture_file_name),
                catalog_type_id: Set(item.catalog_type_id),
                catalog_brand_id: Set(item.catalog_brand_id),
                available_stock: Set(item.available_stock),
                restock_threshold: Set(item.restock_threshold),
                max_stock_threshold: Set(item.max_stock_threshold),
                on_reorder: Set(item.on_reorder),
            }
        }
    }
}

pub mod brand {
    use sea_orm::entity::prelude::*;

    use crate::models::CatalogBrand;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "catalog_brand")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub brand: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::item::Entity")]
        Item,
    }

    impl Related<super::item::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Item.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for CatalogBrand {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                brand: model.brand,
            }
        }
    }
}

pub mod catalog_type {
    use sea_orm::entity::prelude::*;

    use crate::models::CatalogType;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "catalog_type")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        #[sea_orm(column_name = "type")]
        pub type_name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::item::Entity")]
        Item,
    }

    impl Related<super::item::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Item.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for CatalogType {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                type_name: model.type_name,
            }
        }
    }
}
