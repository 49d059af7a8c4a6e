//! Item data model.
//!
//! Items are catalogued with a name, a daily rental cost, and an
//! availability status. The status is the only field that ever changes:
//! `Available -> Borrowed` on a successful borrow and back again on return.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the item value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    EmptyName,
    NegativeCost { cost: i64 },
}

impl fmt::Display for ItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "item name must not be empty"),
            Self::NegativeCost { cost } => {
                write!(f, "cost per day must not be negative (got {cost})")
            }
        }
    }
}

impl std::error::Error for ItemValidationError {}

/// Stable item identifier, assigned by the record store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a new random [`ItemId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID as an [`ItemId`].
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Catalogue name of an item. Not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    /// Validate and construct an [`ItemName`] from owned input.
    pub fn new(name: impl Into<String>) -> Result<Self, ItemValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, ItemValidationError> {
        if name.trim().is_empty() {
            return Err(ItemValidationError::EmptyName);
        }
        Ok(Self(name))
    }

    /// Canonical form used for case-insensitive lookup: trimmed and
    /// Unicode-lowercased.
    pub fn normalized(&self) -> String {
        self.0.trim().to_lowercase()
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ItemName> for String {
    fn from(value: ItemName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ItemName {
    type Error = ItemValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Daily rental cost in minor currency units.
///
/// Non-negative by construction; signed boundary input goes through
/// [`CostPerDay::try_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostPerDay(u64);

impl CostPerDay {
    /// Construct a cost from already-unsigned minor units.
    pub fn new(minor_units: u64) -> Self {
        Self(minor_units)
    }

    /// Cost in minor currency units per day.
    pub fn minor_units(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CostPerDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<i64> for CostPerDay {
    type Error = ItemValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| ItemValidationError::NegativeCost { cost: value })
    }
}

/// Availability state of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// On the shelf; a borrow may claim it.
    Available,
    /// Out on loan; exactly one open borrow record references the item.
    Borrowed,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => f.write_str("available"),
            Self::Borrowed => f.write_str("borrowed"),
        }
    }
}

/// Validated payload for cataloguing an item; the store assigns the id and
/// every new item starts [`ItemStatus::Available`]. The draft deliberately
/// carries no status field, so callers cannot supply one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: ItemName,
    pub cost_per_day: CostPerDay,
}

impl ItemDraft {
    /// Validate catalogue input before any store call is made.
    pub fn new(name: impl Into<String>, cost_per_day: i64) -> Result<Self, ItemValidationError> {
        Ok(Self {
            name: ItemName::new(name)?,
            cost_per_day: CostPerDay::try_from(cost_per_day)?,
        })
    }
}

/// Catalogued item.
///
/// ## Invariants
/// - `name` is non-empty once trimmed of whitespace.
/// - `status` is [`ItemStatus::Borrowed`] iff exactly one open borrow record
///   references this item; the lending workflow enforces this, the entity
///   only carries the state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Item {
    id: ItemId,
    name: ItemName,
    cost_per_day: CostPerDay,
    status: ItemStatus,
}

impl Item {
    /// Build an [`Item`] from validated components.
    pub fn new(id: ItemId, name: ItemName, cost_per_day: CostPerDay, status: ItemStatus) -> Self {
        Self {
            id,
            name,
            cost_per_day,
            status,
        }
    }

    /// Stable item identifier.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Catalogue name.
    pub fn name(&self) -> &ItemName {
        &self.name
    }

    /// Daily rental cost.
    pub fn cost_per_day(&self) -> CostPerDay {
        self.cost_per_day
    }

    /// Current availability state.
    pub fn status(&self) -> ItemStatus {
        self.status
    }

    /// Whether a borrow may currently claim this item.
    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available
    }

    /// Overwrite the availability state. Status is the only mutable field of
    /// an item; legality of the transition is the workflow's concern.
    pub fn set_status(&mut self, status: ItemStatus) {
        self.status = status;
    }
}
