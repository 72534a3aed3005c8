//! Generic repository helper over a SeaORM entity.
//!
//! Wraps a [`DatabaseConnection`] with the common single-entity operations so
//! Postgres repositories only spell out their query composition.

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, PrimaryKeyTrait,
};
use std::marker::PhantomData;

/// Base repository for a single SeaORM entity.
///
/// # Example
/// ```ignore
/// use database::BaseRepository;
///
/// struct PgCatalogRepository {
///     base: BaseRepository<entity::item::Entity>,
/// }
/// ```
pub struct BaseRepository<E: EntityTrait> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> BaseRepository<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Access the underlying connection for custom queries.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Insert an active model, returning the stored model.
    pub async fn insert(&self, model: E::ActiveModel) -> Result<E::Model, DbErr>
    where
        E::Model: IntoActiveModel<E::ActiveModel>,
        E::ActiveModel: Send,
    {
        model.insert(&self.db).await
    }

    /// Update an active model, returning the stored model.
    pub async fn update(&self, model: E::ActiveModel) -> Result<E::Model, DbErr>
    where
        E::Model: IntoActiveModel<E::ActiveModel>,
        E::ActiveModel: Send,
    {
        model.update(&self.db).await
    }

    /// Find a row by primary key.
    pub async fn find_by_id(
        &self,
        id: impl Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    ) -> Result<Option<E::Model>, DbErr> {
        E::find_by_id(id.into()).one(&self.db).await
    }

    /// Delete a row by primary key, returning the number of affected rows.
    pub async fn delete_by_id(
        &self,
        id: impl Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    ) -> Result<u64, DbErr> {
        let result = E::delete_by_id(id.into()).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}

impl<E: EntityTrait> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}
