//! Borrowing workflow service.
//!
//! Orchestrates borrow and return over the catalogue and the borrows
//! collection. Per item the legal transitions are `available --borrow-->
//! borrowed` and `borrowed --return--> available`, both guarded by the
//! atomic batches of the borrow store; no other transition exists. Billing
//! happens at return time against the injected clock.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::Error;
use crate::domain::billing::{Bill, BillLine};
use crate::domain::catalogue_service::CatalogueService;
use crate::domain::loan::{BorrowRecord, OpenLoan};
use crate::domain::ports::{BorrowStore, BorrowStoreError, ItemStore, UserStore};
use crate::domain::user::{User, UserId};

fn map_borrow_store_error(error: BorrowStoreError) -> Error {
    match error {
        BorrowStoreError::Connection { message } => {
            Error::service_unavailable(format!("borrow store unavailable: {message}"))
        }
        BorrowStoreError::Query { message } => {
            Error::internal(format!("borrow store error: {message}"))
        }
        BorrowStoreError::ItemNotAvailable { item_id } => {
            Error::item_unavailable(format!("item {item_id} was claimed by another borrower"))
        }
    }
}

/// Registration details for the self-service path: an unknown borrower who
/// supplies both fields is registered as part of the borrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowerDetails {
    pub name: String,
    pub phone_number: String,
}

/// Result of a successful borrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowOutcome {
    /// The borrowing user; on the self-service path this carries the newly
    /// assigned identifier.
    pub user: User,
    /// The open record created for the loan.
    pub record: BorrowRecord,
    /// Human-readable confirmation for display.
    pub message: String,
}

/// Result of a return request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// The user had no open loans. Absence of work, not a failure.
    NothingToReturn,
    /// All open loans were consumed and billed.
    Settled(Bill),
}

/// Borrowing workflow over the catalogue and the borrows collection.
#[derive(Clone)]
pub struct LendingService<U, I, B> {
    catalogue: Arc<CatalogueService<U, I>>,
    borrow_store: Arc<B>,
    clock: Arc<dyn Clock>,
}

impl<U, I, B> LendingService<U, I, B> {
    /// Create a new lending service.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use backend::domain::ports::{FixtureBorrowStore, FixtureItemStore, FixtureUserStore};
    /// # use backend::domain::{CatalogueService, LendingService};
    /// # use mockable::DefaultClock;
    /// let catalogue = Arc::new(CatalogueService::new(
    ///     Arc::new(FixtureUserStore),
    ///     Arc::new(FixtureItemStore),
    /// ));
    /// let service = LendingService::new(
    ///     catalogue,
    ///     Arc::new(FixtureBorrowStore),
    ///     Arc::new(DefaultClock),
    /// );
    /// ```
    pub fn new(
        catalogue: Arc<CatalogueService<U, I>>,
        borrow_store: Arc<B>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalogue,
            borrow_store,
            clock,
        }
    }
}

impl<U, I, B> LendingService<U, I, B>
where
    U: UserStore,
    I: ItemStore,
    B: BorrowStore,
{
    /// Borrow an available item by name for the given user.
    ///
    /// An unknown `user_id` with [`BorrowerDetails`] supplied registers the
    /// borrower first; the store assigns a fresh identifier and the outcome
    /// carries the actual user. An unknown `user_id` without details fails
    /// with [`crate::domain::ErrorCode::UserNotFound`]. No matching
    /// available item fails with
    /// [`crate::domain::ErrorCode::ItemUnavailable`]; so does losing the
    /// race for the item, since the claim itself is a single conditional
    /// batch in the borrow store.
    pub async fn borrow_item(
        &self,
        user_id: &UserId,
        item_name: &str,
        new_borrower: Option<BorrowerDetails>,
    ) -> Result<BorrowOutcome, Error> {
        let user = self.resolve_borrower(user_id, new_borrower).await?;

        let item = self
            .catalogue
            .find_available_item_by_name(item_name)
            .await?
            .ok_or_else(|| {
                Error::item_unavailable(format!(
                    "no available item named '{}'",
                    item_name.trim()
                ))
            })?;

        let record = self
            .borrow_store
            .open_loan(user.id(), item.id(), self.clock.utc())
            .await
            .map_err(map_borrow_store_error)?;

        tracing::debug!(
            user_id = %user.id(),
            item_id = %item.id(),
            borrow_id = %record.id(),
            "loan opened"
        );

        let message = format!("Item '{}' borrowed successfully.", item.name());
        Ok(BorrowOutcome {
            user,
            record,
            message,
        })
    }

    /// Return everything the user has out on loan and bill for it.
    ///
    /// The borrows collection consumes all of the user's open records and
    /// flips their items back to available as one batch; the bill is then
    /// computed from the consumed loans at the current clock reading, one
    /// line per loan in listing order.
    pub async fn return_items(&self, user_id: &UserId) -> Result<ReturnOutcome, Error> {
        let loans = self
            .borrow_store
            .close_all_for_user(user_id)
            .await
            .map_err(map_borrow_store_error)?;

        if loans.is_empty() {
            return Ok(ReturnOutcome::NothingToReturn);
        }

        let now = self.clock.utc();
        let lines = loans
            .iter()
            .map(|loan| BillLine::compute(&loan.item, loan.record.borrowed_at(), now))
            .collect();
        let bill = Bill::from_lines(lines);

        tracing::debug!(
            %user_id,
            items = bill.lines().len(),
            total = bill.total(),
            "loans settled"
        );
        Ok(ReturnOutcome::Settled(bill))
    }

    /// What the user currently has out on loan, joined with the items, in
    /// listing order. Purely a read; nothing is billed or consumed.
    pub async fn open_loans(&self, user_id: &UserId) -> Result<Vec<OpenLoan>, Error> {
        self.borrow_store
            .list_open_for_user(user_id)
            .await
            .map_err(map_borrow_store_error)
    }

    async fn resolve_borrower(
        &self,
        user_id: &UserId,
        new_borrower: Option<BorrowerDetails>,
    ) -> Result<User, Error> {
        if let Some(user) = self.catalogue.get_user_by_id(user_id).await? {
            return Ok(user);
        }

        match new_borrower {
            Some(details) => {
                tracing::debug!(%user_id, "unknown borrower; registering from supplied details");
                self.catalogue
                    .create_user(&details.name, &details.phone_number)
                    .await
            }
            None => Err(Error::user_not_found(format!("no user with id {user_id}"))),
        }
    }
}

#[cfg(test)]
#[path = "lending_service_tests.rs"]
mod tests;
