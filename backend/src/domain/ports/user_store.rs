//! Port abstraction for the users collection of the record store.

use async_trait::async_trait;

use crate::domain::{User, UserDraft, UserId};

/// Persistence errors raised by user store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserStoreError {
    /// Store connection could not be established.
    #[error("user store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },
}

impl UserStoreError {
    /// Build a [`UserStoreError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`UserStoreError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port over the users collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user; the store assigns the identifier.
    async fn insert(&self, draft: UserDraft) -> Result<User, UserStoreError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError>;

    /// All users, in listing order.
    async fn list(&self) -> Result<Vec<User>, UserStoreError>;
}

/// Fixture implementation for tests that do not exercise user persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserStore;

#[async_trait]
impl UserStore for FixtureUserStore {
    async fn insert(&self, draft: UserDraft) -> Result<User, UserStoreError> {
        Ok(User::from_draft(UserId::random(), draft))
    }

    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserStoreError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<User>, UserStoreError> {
        Ok(Vec::new())
    }
}
