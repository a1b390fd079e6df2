//! Account domain service.
//!
//! Implements the account driving ports over the account repository. The
//! service also owns credential verification so password checks stay in one
//! place; the authentication service delegates here.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, AccountsCommand, AccountsQuery, AdminAccountUpdate,
    AdminCreateAccountRequest, ProfileUpdate, RegisterAccountRequest,
};
use crate::domain::{
    Account, AccountId, Credentials, EmailAddress, Error, PasswordError, PasswordHash,
};

fn map_repository_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::DuplicateEmail { .. } => email_taken_error(),
        AccountRepositoryError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
    }
}

fn email_taken_error() -> Error {
    Error::invalid_request("an account with this email address already exists").with_details(
        json!({
            "field": "email",
            "code": "email_taken",
        }),
    )
}

fn map_password_error(error: PasswordError) -> Error {
    match error {
        PasswordError::TooShort { min } => {
            Error::invalid_request(format!("password must be at least {min} characters"))
                .with_details(json!({
                    "field": "password",
                    "code": "password_too_short",
                }))
        }
        PasswordError::Hash { message } => {
            Error::internal(format!("password hashing failed: {message}"))
        }
    }
}

/// Account service implementing the account driving ports.
#[derive(Clone)]
pub struct AccountService<R> {
    accounts: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> AccountService<R> {
    /// Create a new service over the account repository.
    pub fn new(accounts: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { accounts, clock }
    }
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    pub(crate) async fn find(&self, account_id: AccountId) -> Result<Option<Account>, Error> {
        self.accounts
            .find_by_id(account_id)
            .await
            .map_err(map_repository_error)
    }

    async fn require_account(&self, account_id: AccountId) -> Result<Account, Error> {
        self.find(account_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("account {account_id} not found")))
    }

    /// Check credentials against the stored account.
    ///
    /// Returns the account only when it exists, is active, and the password
    /// verifies. Callers translate `None` into their surface's error shape so
    /// the response never reveals which check failed.
    pub async fn verify_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<Account>, Error> {
        let Some(account) = self
            .accounts
            .find_by_email(credentials.email())
            .await
            .map_err(map_repository_error)?
        else {
            return Ok(None);
        };
        if !account.is_active() || !account.password_hash().verify(credentials.password()) {
            return Ok(None);
        }
        Ok(Some(account))
    }

    /// Create the bootstrap superuser unless the email is already registered.
    ///
    /// Start-up runs this on every boot, so an existing account is returned
    /// untouched rather than treated as a conflict.
    pub async fn ensure_superuser(
        &self,
        email: EmailAddress,
        password: &str,
    ) -> Result<Account, Error> {
        if let Some(existing) = self
            .accounts
            .find_by_email(&email)
            .await
            .map_err(map_repository_error)?
        {
            return Ok(existing);
        }
        let password_hash = PasswordHash::from_plaintext(password).map_err(map_password_error)?;
        let account =
            Account::new_superuser(AccountId::random(), email, password_hash, self.clock.utc());
        self.accounts
            .insert(&account)
            .await
            .map_err(map_repository_error)?;
        Ok(account)
    }
}

#[async_trait]
impl<R> AccountsCommand for AccountService<R>
where
    R: AccountRepository,
{
    async fn register(&self, request: RegisterAccountRequest) -> Result<Account, Error> {
        let RegisterAccountRequest {
            email,
            display_name,
            password,
        } = request;
        let password_hash = PasswordHash::from_plaintext(&password).map_err(map_password_error)?;
        let account = Account::new(
            AccountId::random(),
            email,
            display_name,
            password_hash,
            self.clock.utc(),
        );
        self.accounts
            .insert(&account)
            .await
            .map_err(map_repository_error)?;
        Ok(account)
    }

    async fn update_profile(
        &self,
        account_id: AccountId,
        update: ProfileUpdate,
    ) -> Result<Account, Error> {
        let mut account = self.require_account(account_id).await?;
        let ProfileUpdate {
            display_name,
            password,
        } = update;
        if let Some(display_name) = display_name {
            account.set_display_name(Some(display_name));
        }
        if let Some(password) = password {
            let hash = PasswordHash::from_plaintext(&password).map_err(map_password_error)?;
            account.set_password_hash(hash);
        }
        self.accounts
            .update(&account)
            .await
            .map_err(map_repository_error)?;
        Ok(account)
    }

    async fn admin_create(&self, request: AdminCreateAccountRequest) -> Result<Account, Error> {
        let AdminCreateAccountRequest {
            email,
            display_name,
            password,
            is_active,
            is_staff,
            is_superuser,
        } = request;
        let password_hash = PasswordHash::from_plaintext(&password).map_err(map_password_error)?;
        let mut account = Account::new(
            AccountId::random(),
            email,
            display_name,
            password_hash,
            self.clock.utc(),
        );
        account.set_is_active(is_active);
        account.set_is_staff(is_staff);
        account.set_is_superuser(is_superuser);
        self.accounts
            .insert(&account)
            .await
            .map_err(map_repository_error)?;
        Ok(account)
    }

    async fn admin_update(
        &self,
        account_id: AccountId,
        update: AdminAccountUpdate,
    ) -> Result<Account, Error> {
        let mut account = self.require_account(account_id).await?;
        let AdminAccountUpdate {
            display_name,
            password,
            is_active,
            is_staff,
            is_superuser,
        } = update;
        if let Some(display_name) = display_name {
            account.set_display_name(Some(display_name));
        }
        if let Some(password) = password {
            let hash = PasswordHash::from_plaintext(&password).map_err(map_password_error)?;
            account.set_password_hash(hash);
        }
        if let Some(is_active) = is_active {
            account.set_is_active(is_active);
        }
        if let Some(is_staff) = is_staff {
            account.set_is_staff(is_staff);
        }
        if let Some(is_superuser) = is_superuser {
            account.set_is_superuser(is_superuser);
        }
        self.accounts
            .update(&account)
            .await
            .map_err(map_repository_error)?;
        Ok(account)
    }
}

#[async_trait]
impl<R> AccountsQuery for AccountService<R>
where
    R: AccountRepository,
{
    async fn get_account(&self, account_id: AccountId) -> Result<Account, Error> {
        self.require_account(account_id).await
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, Error> {
        self.accounts.list().await.map_err(map_repository_error)
    }
}
