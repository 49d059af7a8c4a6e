//! Catalogue access services for users and items.
//!
//! Thin, validating operations over the user and item collections. Input is
//! validated through the entity newtypes before any store call, so a failing
//! registration or catalogue insertion performs no store mutation.

use std::sync::Arc;

use crate::domain::Error;
use crate::domain::item::{Item, ItemDraft, ItemId, ItemStatus};
use crate::domain::ports::{ItemStore, ItemStoreError, UserStore, UserStoreError};
use crate::domain::user::{User, UserDraft, UserId};

fn map_user_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserStoreError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
    }
}

fn map_item_store_error(error: ItemStoreError) -> Error {
    match error {
        ItemStoreError::Connection { message } => {
            Error::service_unavailable(format!("item store unavailable: {message}"))
        }
        ItemStoreError::Query { message } => {
            Error::internal(format!("item store error: {message}"))
        }
        ItemStoreError::NotFound { item_id } => {
            Error::invalid_request(format!("no item with id {item_id}"))
        }
    }
}

/// Catalogue access over the user and item collections.
#[derive(Clone)]
pub struct CatalogueService<U, I> {
    user_store: Arc<U>,
    item_store: Arc<I>,
}

impl<U, I> CatalogueService<U, I> {
    /// Create a new catalogue service over the given stores.
    pub fn new(user_store: Arc<U>, item_store: Arc<I>) -> Self {
        Self {
            user_store,
            item_store,
        }
    }
}

impl<U, I> CatalogueService<U, I>
where
    U: UserStore,
    I: ItemStore,
{
    /// Register a user. Empty name or phone fails validation before the
    /// store is touched.
    pub async fn create_user(&self, name: &str, phone_number: &str) -> Result<User, Error> {
        let draft = UserDraft::new(name, phone_number)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.user_store
            .insert(draft)
            .await
            .map_err(map_user_store_error)
    }

    /// Look up a user by exact identifier match.
    pub async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.user_store
            .find_by_id(id)
            .await
            .map_err(map_user_store_error)
    }

    /// All registered users. Order carries no meaning to callers.
    pub async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.user_store.list().await.map_err(map_user_store_error)
    }

    /// Catalogue an item. Empty name or negative cost fails validation
    /// before the store is touched; the new item is available by
    /// construction.
    pub async fn add_item(&self, name: &str, cost_per_day: i64) -> Result<Item, Error> {
        let draft = ItemDraft::new(name, cost_per_day)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.item_store
            .insert(draft)
            .await
            .map_err(map_item_store_error)
    }

    /// Find an available item whose name matches `name` after trimming and
    /// Unicode-lowercasing both sides.
    ///
    /// Names are not unique; when several available items share the name,
    /// the first match in listing order wins. This is a deliberate
    /// tie-break, kept at this boundary so the invariant-bearing workflow
    /// below only ever deals in item ids.
    pub async fn find_available_item_by_name(&self, name: &str) -> Result<Option<Item>, Error> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return Ok(None);
        }

        let items = self.item_store.list().await.map_err(map_item_store_error)?;
        let mut matches = items
            .into_iter()
            .filter(|item| item.is_available() && item.name().normalized() == wanted);

        let first = matches.next();
        let remaining = matches.count();
        if remaining > 0 {
            tracing::debug!(
                name = %wanted,
                skipped = remaining,
                "duplicate available item names; taking the first in listing order"
            );
        }
        Ok(first)
    }

    /// Unconditionally overwrite an item's status. Transition legality is
    /// enforced by the lending workflow, not here.
    pub async fn update_item_status(
        &self,
        id: &ItemId,
        status: ItemStatus,
    ) -> Result<(), Error> {
        self.item_store
            .update_status(id, status)
            .await
            .map_err(map_item_store_error)
    }

    /// All catalogued items, in listing order.
    pub async fn list_items(&self) -> Result<Vec<Item>, Error> {
        self.item_store.list().await.map_err(map_item_store_error)
    }
}

#[cfg(test)]
#[path = "catalogue_service_tests.rs"]
mod tests;
