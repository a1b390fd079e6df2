//! Driving port for account lookups used by the admin surface.

use async_trait::async_trait;

use crate::domain::{Account, AccountId, Error};

/// Domain use-case port for reading accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsQuery: Send + Sync {
    /// Fetch a single account by id.
    async fn get_account(&self, account_id: AccountId) -> Result<Account, Error>;

    /// List every account ordered by join time, then id.
    async fn list_accounts(&self) -> Result<Vec<Account>, Error>;
}
