//! Port abstraction for the items collection of the record store.

use async_trait::async_trait;

use crate::domain::{Item, ItemDraft, ItemId, ItemStatus};

/// Persistence errors raised by item store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemStoreError {
    /// Store connection could not be established.
    #[error("item store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("item store query failed: {message}")]
    Query { message: String },
    /// A mutation referenced an item that does not exist.
    #[error("no item with id {item_id}")]
    NotFound { item_id: ItemId },
}

impl ItemStoreError {
    /// Build an [`ItemStoreError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build an [`ItemStoreError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Build an [`ItemStoreError::NotFound`].
    pub fn not_found(item_id: ItemId) -> Self {
        Self::NotFound { item_id }
    }
}

/// Port over the items collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Insert a new item; the store assigns the identifier and every new
    /// item starts [`ItemStatus::Available`].
    async fn insert(&self, draft: ItemDraft) -> Result<Item, ItemStoreError>;

    /// Fetch an item by identifier.
    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemStoreError>;

    /// Unconditionally overwrite an item's status. Transition legality is
    /// the lending workflow's responsibility, not this port's.
    async fn update_status(&self, id: &ItemId, status: ItemStatus) -> Result<(), ItemStoreError>;

    /// All items, in listing order.
    async fn list(&self) -> Result<Vec<Item>, ItemStoreError>;
}

/// Fixture implementation for tests that do not exercise item persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureItemStore;

#[async_trait]
impl ItemStore for FixtureItemStore {
    async fn insert(&self, draft: ItemDraft) -> Result<Item, ItemStoreError> {
        Ok(Item::new(
            ItemId::random(),
            draft.name,
            draft.cost_per_day,
            ItemStatus::Available,
        ))
    }

    async fn find_by_id(&self, _id: &ItemId) -> Result<Option<Item>, ItemStoreError> {
        Ok(None)
    }

    async fn update_status(
        &self,
        _id: &ItemId,
        _status: ItemStatus,
    ) -> Result<(), ItemStoreError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Item>, ItemStoreError> {
        Ok(Vec::new())
    }
}
