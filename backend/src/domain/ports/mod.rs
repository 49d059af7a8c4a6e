//! Record-store contracts for the hexagonal boundary.
//!
//! Each collection of the record store is a driven port: a trait the domain
//! services call, an error enum adapters raise, a `Fixture*` no-op for tests
//! that do not exercise that collection, and a `mockall` mock under
//! `cfg(test)`.

mod borrow_store;
mod item_store;
mod user_store;

#[cfg(test)]
pub use borrow_store::MockBorrowStore;
pub use borrow_store::{BorrowStore, BorrowStoreError, FixtureBorrowStore};
#[cfg(test)]
pub use item_store::MockItemStore;
pub use item_store::{FixtureItemStore, ItemStore, ItemStoreError};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{FixtureUserStore, UserStore, UserStoreError};
