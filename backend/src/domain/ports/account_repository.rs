//! Port abstraction for account persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::account::{Account, AccountId, EmailAddress};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Another account already holds this email address.
        ///
        /// Uniqueness is keyed on the normalised form, so this also covers
        /// inserts that raced a concurrent signup.
        DuplicateEmail { email: String } => "email already registered: {email}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
    }
}

/// Driven port for account storage.
///
/// Lookups by email expect the normalised form; adapters do not re-normalise.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account, failing on an email collision.
    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError>;

    /// Persist changes to an existing account.
    async fn update(&self, account: &Account) -> Result<(), AccountRepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountRepositoryError>;

    /// Fetch an account by normalised email address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountRepositoryError>;

    /// List every account ordered by joining time, then id.
    async fn list(&self) -> Result<Vec<Account>, AccountRepositoryError>;
}
