//! Domain primitives, services, and ports.
//!
//! Purpose: define the strongly typed entities of the lending tracker, the
//! catalogue and borrowing services over them, and the record-store ports
//! the services drive. Keep entities immutable apart from item status and
//! document invariants and serialisation contracts (serde) in each type's
//! Rustdoc.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`] — transport-agnostic error payload.
//! - [`User`], [`Item`], [`BorrowRecord`] — the three entity collections.
//! - [`CatalogueService`] — typed user/item operations over the store.
//! - [`LendingService`] — the borrow/return workflow and billing.
//! - [`ports`] — the record-store contracts adapters implement.

pub mod billing;
pub mod catalogue_service;
pub mod error;
pub mod item;
pub mod lending_service;
pub mod loan;
pub mod ports;
pub mod user;

pub use self::billing::{Bill, BillLine, MIN_CHARGEABLE_DAYS, chargeable_days};
pub use self::catalogue_service::CatalogueService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::item::{
    CostPerDay, Item, ItemDraft, ItemId, ItemName, ItemStatus, ItemValidationError,
};
pub use self::lending_service::{BorrowOutcome, BorrowerDetails, LendingService, ReturnOutcome};
pub use self::loan::{BorrowId, BorrowRecord, OpenLoan};
pub use self::user::{PersonName, PhoneNumber, User, UserDraft, UserId, UserValidationError};

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use backend::domain::{DomainResult, Error};
///
/// fn refuse() -> DomainResult<()> {
///     Err(Error::invalid_request("nope"))
/// }
/// ```
pub type DomainResult<T> = Result<T, Error>;
