//! Bearer-token authentication service.
//!
//! Exchanges verified credentials for opaque tokens and resolves presented
//! tokens back to accounts. Credential checks are delegated to the account
//! service; this service only handles token material and the digest store.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::account_service::AccountService;
use crate::domain::ports::{AccountRepository, AuthService, TokenRepository, TokenRepositoryError};
use crate::domain::{Account, AuthToken, Credentials, Error, TokenValue};

fn map_repository_error(error: TokenRepositoryError) -> Error {
    match error {
        TokenRepositoryError::Query { message } => {
            Error::internal(format!("token repository error: {message}"))
        }
    }
}

/// Authentication service minting and resolving bearer tokens.
#[derive(Clone)]
pub struct TokenAuthService<A, T> {
    accounts: Arc<AccountService<A>>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<A, T> TokenAuthService<A, T> {
    /// Create a new service over the account service and token repository.
    pub fn new(accounts: Arc<AccountService<A>>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts,
            tokens,
            clock,
        }
    }
}

#[async_trait]
impl<A, T> AuthService for TokenAuthService<A, T>
where
    A: AccountRepository,
    T: TokenRepository,
{
    async fn issue_token(&self, credentials: &Credentials) -> Result<TokenValue, Error> {
        let Some(account) = self.accounts.verify_credentials(credentials).await? else {
            return Err(Error::invalid_request(
                "unable to authenticate with provided credentials",
            ));
        };
        let token = TokenValue::generate();
        let record = AuthToken::new(account.id(), token.digest(), self.clock.utc());
        self.tokens
            .put(&record)
            .await
            .map_err(map_repository_error)?;
        Ok(token)
    }

    async fn resolve_caller(&self, token: &TokenValue) -> Result<Account, Error> {
        let Some(account_id) = self
            .tokens
            .find_account_by_digest(&token.digest())
            .await
            .map_err(map_repository_error)?
        else {
            return Err(Error::unauthorized("invalid authentication token"));
        };
        let Some(account) = self.accounts.find(account_id).await? else {
            return Err(Error::unauthorized("invalid authentication token"));
        };
        if !account.is_active() {
            return Err(Error::unauthorized("account is inactive"));
        }
        Ok(account)
    }
}
