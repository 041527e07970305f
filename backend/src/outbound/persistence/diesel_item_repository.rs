//! PostgreSQL-backed item repository.
//!
//! Identifier and timestamp assignment happen here: inserts stamp both
//! timestamps, updates refresh `updated_at` as part of the same statement
//! that writes the new field values.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::item::{Item, ItemDraft, ItemId};
use crate::domain::ports::{ItemPersistenceError, ItemRepository};

use super::error_mapping::{diesel_error_message, pool_error_message};
use super::models::{ItemChangeset, ItemRow, NewItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::items;

/// Diesel implementation of the [`ItemRepository`] port.
#[derive(Clone)]
pub struct DieselItemRepository {
    pool: DbPool,
}

impl DieselItemRepository {
    /// Create a new repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ItemPersistenceError {
    ItemPersistenceError::connection(pool_error_message(error))
}

fn map_query_error(
    error: diesel::result::Error,
    context: &'static str,
) -> ItemPersistenceError {
    ItemPersistenceError::query(diesel_error_message(&error, context))
}

#[async_trait]
impl ItemRepository for DieselItemRepository {
    async fn list(&self) -> Result<Vec<Item>, ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ItemRow> = items::table
            .order(items::created_at.asc())
            .select(ItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_query_error(err, "item list"))?;
        rows.into_iter().map(ItemRow::into_domain).collect()
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ItemRow> = items::table
            .find(*id.as_uuid())
            .select(ItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_query_error(err, "item lookup"))?;
        row.map(ItemRow::into_domain).transpose()
    }

    async fn insert(&self, draft: ItemDraft) -> Result<Item, ItemPersistenceError> {
        let now = Utc::now();
        let row = NewItemRow {
            id: Uuid::new_v4(),
            name: draft.name.as_ref(),
            quantity: i64::from(draft.quantity.count()),
            price: draft.price.amount(),
            created_at: now,
            updated_at: now,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let stored: ItemRow = diesel::insert_into(items::table)
            .values(&row)
            .returning(ItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_query_error(err, "item insert"))?;
        stored.into_domain()
    }

    async fn update(
        &self,
        id: &ItemId,
        draft: ItemDraft,
    ) -> Result<Option<Item>, ItemPersistenceError> {
        let changes = ItemChangeset {
            name: draft.name.as_ref(),
            quantity: i64::from(draft.quantity.count()),
            price: draft.price.amount(),
            updated_at: Utc::now(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let stored: Option<ItemRow> = diesel::update(items::table.find(*id.as_uuid()))
            .set(&changes)
            .returning(ItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_query_error(err, "item update"))?;
        stored.map(ItemRow::into_domain).transpose()
    }

    async fn delete(&self, id: &ItemId) -> Result<bool, ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(items::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_query_error(err, "item delete"))?;
        Ok(removed > 0)
    }
}
