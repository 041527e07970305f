//! Port abstraction for inventory item persistence adapters.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::item::{Item, ItemDraft, ItemId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by item repository adapters.
    pub enum ItemPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "item repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "item repository query failed: {message}",
    }
}

/// Persistence port for inventory items.
///
/// The store owns identifier and timestamp assignment: `insert` stamps both
/// timestamps, `update` refreshes `updated_at`. Absent ids are reported as
/// `None`/`false` rather than errors so services decide the not-found
/// mapping.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// List every item, oldest first.
    async fn list(&self) -> Result<Vec<Item>, ItemPersistenceError>;

    /// Fetch a single item by identifier.
    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemPersistenceError>;

    /// Insert a new item, assigning id and timestamps.
    async fn insert(&self, draft: ItemDraft) -> Result<Item, ItemPersistenceError>;

    /// Replace the mutable fields of an item, refreshing `updated_at`.
    ///
    /// Returns `None` when the id is absent.
    async fn update(
        &self,
        id: &ItemId,
        draft: ItemDraft,
    ) -> Result<Option<Item>, ItemPersistenceError>;

    /// Remove an item. Returns `false` when the id was absent.
    async fn delete(&self, id: &ItemId) -> Result<bool, ItemPersistenceError>;
}

/// In-memory item repository used by tests and the dev-mode server.
#[derive(Debug, Default)]
pub struct FixtureItemRepository {
    items: Mutex<Vec<Item>>,
}

impl FixtureItemRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for FixtureItemRepository {
    async fn list(&self) -> Result<Vec<Item>, ItemPersistenceError> {
        let items = self.items.lock().expect("item store lock");
        Ok(items.clone())
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemPersistenceError> {
        let items = self.items.lock().expect("item store lock");
        Ok(items.iter().find(|item| item.id() == id).cloned())
    }

    async fn insert(&self, draft: ItemDraft) -> Result<Item, ItemPersistenceError> {
        let now = Utc::now();
        let item = Item::new(ItemId::random(), draft, now, now);
        let mut items = self.items.lock().expect("item store lock");
        items.push(item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        id: &ItemId,
        draft: ItemDraft,
    ) -> Result<Option<Item>, ItemPersistenceError> {
        let mut items = self.items.lock().expect("item store lock");
        let Some(stored) = items.iter_mut().find(|item| item.id() == id) else {
            return Ok(None);
        };
        let updated = Item::new(*stored.id(), draft, stored.created_at(), Utc::now());
        *stored = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: &ItemId) -> Result<bool, ItemPersistenceError> {
        let mut items = self.items.lock().expect("item store lock");
        let before = items.len();
        items.retain(|item| item.id() != id);
        Ok(items.len() < before)
    }
}
