//! Port abstraction for the borrows collection of the record store.
//!
//! The composite operations here are the transactional envelope around the
//! lending workflow: adapters must run each of them as a single atomic
//! batch. A sequential insert-then-update rendition would reintroduce the
//! partial-completion hazard this contract exists to close.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{BorrowId, BorrowRecord, ItemId, OpenLoan, UserId};

/// Persistence errors raised by borrow store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BorrowStoreError {
    /// Store connection could not be established.
    #[error("borrow store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("borrow store query failed: {message}")]
    Query { message: String },
    /// The item is missing or not currently available. Raced borrows land
    /// here; callers treat it as an expected, recoverable outcome.
    #[error("item {item_id} is not available")]
    ItemNotAvailable { item_id: ItemId },
}

impl BorrowStoreError {
    /// Build a [`BorrowStoreError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`BorrowStoreError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Build a [`BorrowStoreError::ItemNotAvailable`].
    pub fn item_not_available(item_id: ItemId) -> Self {
        Self::ItemNotAvailable { item_id }
    }
}

/// Port over the borrows collection and its transactional batches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BorrowStore: Send + Sync {
    /// Atomically: verify the item is available, flip it to borrowed, and
    /// insert the open record, returning it. Fails
    /// [`BorrowStoreError::ItemNotAvailable`] without mutating anything when
    /// the item is missing or already out.
    async fn open_loan(
        &self,
        user_id: &UserId,
        item_id: &ItemId,
        borrowed_at: DateTime<Utc>,
    ) -> Result<BorrowRecord, BorrowStoreError>;

    /// Open records for the user joined with their items, in listing order.
    async fn list_open_for_user(&self, user_id: &UserId)
    -> Result<Vec<OpenLoan>, BorrowStoreError>;

    /// Atomically: delete every open record for the user and flip each
    /// referenced item back to available. All or nothing; returns the
    /// consumed loans in listing order. An empty result means the user had
    /// nothing out on loan.
    async fn close_all_for_user(&self, user_id: &UserId)
    -> Result<Vec<OpenLoan>, BorrowStoreError>;
}

/// Fixture implementation for tests that do not exercise loan persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBorrowStore;

#[async_trait]
impl BorrowStore for FixtureBorrowStore {
    async fn open_loan(
        &self,
        user_id: &UserId,
        item_id: &ItemId,
        borrowed_at: DateTime<Utc>,
    ) -> Result<BorrowRecord, BorrowStoreError> {
        Ok(BorrowRecord::new(
            BorrowId::random(),
            *user_id,
            *item_id,
            borrowed_at,
        ))
    }

    async fn list_open_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<OpenLoan>, BorrowStoreError> {
        Ok(Vec::new())
    }

    async fn close_all_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<OpenLoan>, BorrowStoreError> {
        Ok(Vec::new())
    }
}
