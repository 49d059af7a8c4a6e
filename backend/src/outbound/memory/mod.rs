//! In-memory record store adapter.
//!
//! Reference implementation of the three store ports over a single
//! mutex-guarded table set. Every composite operation runs inside one
//! critical section, which is what makes the conditional borrow and the
//! multi-item return behave as atomic batches: concurrent borrows of the
//! same item serialise on the lock and the loser observes the flipped
//! status. Collections keep insertion order, so listing order is stable and
//! the catalogue's name tie-break is observable.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    BorrowStore, BorrowStoreError, ItemStore, ItemStoreError, UserStore, UserStoreError,
};
use crate::domain::{
    BorrowId, BorrowRecord, Item, ItemDraft, ItemId, ItemStatus, OpenLoan, User, UserDraft, UserId,
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    items: Vec<Item>,
    borrows: Vec<BorrowRecord>,
}

impl Tables {
    fn item_by_id(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn item_by_id_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id() == id)
    }
}

/// Record store holding all three collections in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // A poisoned lock only means another thread panicked while holding
        // it; the tables themselves are still structurally valid.
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn join_loan(tables: &Tables, record: &BorrowRecord) -> Result<OpenLoan, BorrowStoreError> {
        match tables.item_by_id(record.item_id()) {
            Some(item) => Ok(OpenLoan {
                record: record.clone(),
                item: item.clone(),
            }),
            None => {
                tracing::warn!(
                    borrow_id = %record.id(),
                    item_id = %record.item_id(),
                    "open record references a missing item"
                );
                Err(BorrowStoreError::query(format!(
                    "open record {} references missing item {}",
                    record.id(),
                    record.item_id()
                )))
            }
        }
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn insert(&self, draft: UserDraft) -> Result<User, UserStoreError> {
        let user = User::from_draft(UserId::random(), draft);
        self.lock().users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|user| user.id() == id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserStoreError> {
        Ok(self.lock().users.clone())
    }
}

#[async_trait]
impl ItemStore for InMemoryStore {
    async fn insert(&self, draft: ItemDraft) -> Result<Item, ItemStoreError> {
        let item = Item::new(
            ItemId::random(),
            draft.name,
            draft.cost_per_day,
            ItemStatus::Available,
        );
        self.lock().items.push(item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemStoreError> {
        Ok(self.lock().item_by_id(id).cloned())
    }

    async fn update_status(&self, id: &ItemId, status: ItemStatus) -> Result<(), ItemStoreError> {
        let mut tables = self.lock();
        match tables.item_by_id_mut(id) {
            Some(item) => {
                item.set_status(status);
                Ok(())
            }
            None => Err(ItemStoreError::not_found(*id)),
        }
    }

    async fn list(&self) -> Result<Vec<Item>, ItemStoreError> {
        Ok(self.lock().items.clone())
    }
}

#[async_trait]
impl BorrowStore for InMemoryStore {
    async fn open_loan(
        &self,
        user_id: &UserId,
        item_id: &ItemId,
        borrowed_at: DateTime<Utc>,
    ) -> Result<BorrowRecord, BorrowStoreError> {
        let mut tables = self.lock();

        let item = tables
            .item_by_id_mut(item_id)
            .filter(|item| item.is_available())
            .ok_or_else(|| BorrowStoreError::item_not_available(*item_id))?;
        item.set_status(ItemStatus::Borrowed);

        let record = BorrowRecord::new(BorrowId::random(), *user_id, *item_id, borrowed_at);
        tables.borrows.push(record.clone());
        Ok(record)
    }

    async fn list_open_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<OpenLoan>, BorrowStoreError> {
        let tables = self.lock();
        tables
            .borrows
            .iter()
            .filter(|record| record.user_id() == user_id)
            .map(|record| Self::join_loan(&tables, record))
            .collect()
    }

    async fn close_all_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<OpenLoan>, BorrowStoreError> {
        let mut tables = self.lock();

        // Join everything first so a dangling record aborts the batch
        // before any mutation.
        let consumed = tables
            .borrows
            .iter()
            .filter(|record| record.user_id() == user_id)
            .map(|record| Self::join_loan(&tables, record))
            .collect::<Result<Vec<_>, _>>()?;

        for loan in &consumed {
            if let Some(item) = tables.item_by_id_mut(loan.record.item_id()) {
                item.set_status(ItemStatus::Available);
            }
        }
        tables.borrows.retain(|record| record.user_id() != user_id);

        Ok(consumed)
    }
}
