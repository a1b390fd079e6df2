//! Driving port for bearer-token authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! exchange credentials for tokens and to resolve presented tokens without
//! knowing (or importing) the backing infrastructure.

use async_trait::async_trait;

use crate::domain::{Account, Credentials, Error, TokenValue};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify credentials and mint a bearer token for the account.
    ///
    /// Replaces any token previously issued to the same account.
    async fn issue_token(&self, credentials: &Credentials) -> Result<TokenValue, Error>;

    /// Resolve a presented bearer token to its active account.
    async fn resolve_caller(&self, token: &TokenValue) -> Result<Account, Error>;
}
