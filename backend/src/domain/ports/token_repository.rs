//! Port abstraction for bearer-token persistence adapters.

use async_trait::async_trait;

use crate::domain::account::AccountId;
use crate::domain::auth::{AuthToken, TokenDigest};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by token repository adapters.
    pub enum TokenRepositoryError {
        /// Query or mutation failed during execution.
        Query { message: String } => "token repository query failed: {message}",
    }
}

/// Driven port for token storage.
///
/// The store keeps at most one record per account and only ever sees token
/// digests; raw values never reach an adapter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Store a token record, replacing any prior record for the same account.
    async fn put(&self, token: &AuthToken) -> Result<(), TokenRepositoryError>;

    /// Resolve the account owning a token digest, if any.
    async fn find_account_by_digest(
        &self,
        digest: &TokenDigest,
    ) -> Result<Option<AccountId>, TokenRepositoryError>;
}
