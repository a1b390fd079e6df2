//! Driving port for account registration and maintenance use-cases.
//!
//! Inbound adapters call this port to mutate accounts without knowing the
//! backing infrastructure, keeping handler tests deterministic.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::{Account, AccountId, DisplayName, EmailAddress, Error};

/// Payload for registering a new account through the public surface.
pub struct RegisterAccountRequest {
    pub email: EmailAddress,
    pub display_name: Option<DisplayName>,
    pub password: Zeroizing<String>,
}

/// Partial profile update for the authenticated account.
///
/// `None` fields are left unchanged.
#[derive(Default)]
pub struct ProfileUpdate {
    pub display_name: Option<DisplayName>,
    pub password: Option<Zeroizing<String>>,
}

impl ProfileUpdate {
    /// Report whether the update would change anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.password.is_none()
    }
}

/// Payload for creating an account with explicit flags through the admin
/// surface.
pub struct AdminCreateAccountRequest {
    pub email: EmailAddress,
    pub display_name: Option<DisplayName>,
    pub password: Zeroizing<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

/// Partial account update for the admin surface.
///
/// `None` fields are left unchanged.
#[derive(Default)]
pub struct AdminAccountUpdate {
    pub display_name: Option<DisplayName>,
    pub password: Option<Zeroizing<String>>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

/// Domain use-case port for account mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsCommand: Send + Sync {
    /// Register a new active account with no staff privileges.
    async fn register(&self, request: RegisterAccountRequest) -> Result<Account, Error>;

    /// Apply a partial profile update to the given account.
    async fn update_profile(
        &self,
        account_id: AccountId,
        update: ProfileUpdate,
    ) -> Result<Account, Error>;

    /// Create an account with caller-chosen flags.
    async fn admin_create(&self, request: AdminCreateAccountRequest) -> Result<Account, Error>;

    /// Apply a partial update, including flag changes, to any account.
    async fn admin_update(
        &self,
        account_id: AccountId,
        update: AdminAccountUpdate,
    ) -> Result<Account, Error>;
}
