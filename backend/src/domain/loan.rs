//! Open loan records.
//!
//! A [`BorrowRecord`] is the sole evidence that an item is out on loan: it
//! is created when a borrow succeeds and deleted when the return settles.
//! No history is retained after return.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::item::{Item, ItemId};
use crate::domain::user::UserId;

/// Stable borrow-record identifier, assigned by the record store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BorrowId(Uuid);

impl BorrowId {
    /// Generate a new random [`BorrowId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for BorrowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Open loan linking a user to a borrowed item.
///
/// ## Invariants
/// - The referenced item has status `borrowed` for as long as this record
///   exists, and exactly one record references any borrowed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct BorrowRecord {
    id: BorrowId,
    user_id: UserId,
    item_id: ItemId,
    borrowed_at: DateTime<Utc>,
}

impl BorrowRecord {
    /// Build a [`BorrowRecord`] from its components.
    pub fn new(id: BorrowId, user_id: UserId, item_id: ItemId, borrowed_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            item_id,
            borrowed_at,
        }
    }

    /// Stable record identifier.
    pub fn id(&self) -> &BorrowId {
        &self.id
    }

    /// Borrowing user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Borrowed item.
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    /// When the loan was opened; billing counts whole days from here.
    pub fn borrowed_at(&self) -> DateTime<Utc> {
        self.borrowed_at
    }
}

/// Open record joined with the item it references, as returned by the
/// borrows collection for listing and settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenLoan {
    pub record: BorrowRecord,
    pub item: Item,
}
