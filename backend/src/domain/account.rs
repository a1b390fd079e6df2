//! Account data model.
//!
//! Accounts are keyed by email address rather than username. The address is
//! normalised on entry: the local part is preserved as typed while the domain
//! part (everything after the final `@`) is lower-cased. Uniqueness checks and
//! lookups always operate on the normalised form.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::password::PasswordHash;

/// Validation errors raised while constructing account value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email does not contain an `@` separator.
    MissingAtSymbol,
    /// Email has no characters before the final `@`.
    EmptyLocalPart,
    /// Email has no characters after the final `@`.
    EmptyDomain,
    /// Display name was blank once trimmed.
    EmptyDisplayName,
    /// Display name exceeds the storage limit.
    DisplayNameTooLong { max: usize },
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::MissingAtSymbol => write!(f, "email must contain an @ separator"),
            Self::EmptyLocalPart => write!(f, "email local part must not be empty"),
            Self::EmptyDomain => write!(f, "email domain must not be empty"),
            Self::EmptyDisplayName => write!(f, "name must not be empty"),
            Self::DisplayNameTooLong { max } => {
                write!(f, "name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Stable account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalised email address identifying an account.
///
/// ## Invariants
/// - Contains exactly one split point: the final `@` in the raw input.
/// - The local part is stored as typed; the domain part is lower-cased.
/// - Neither side of the separator is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise a raw email address.
    ///
    /// # Examples
    /// ```
    /// use larder::domain::EmailAddress;
    ///
    /// let email = EmailAddress::parse("Cook@Example.COM").expect("valid email");
    /// assert_eq!(email.as_str(), "Cook@example.com");
    /// ```
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        Self::from_owned(raw.as_ref().trim().to_owned())
    }

    fn from_owned(raw: String) -> Result<Self, AccountValidationError> {
        if raw.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        let Some((local, domain)) = raw.rsplit_once('@') else {
            return Err(AccountValidationError::MissingAtSymbol);
        };
        if local.is_empty() {
            return Err(AccountValidationError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(AccountValidationError::EmptyDomain);
        }
        Ok(Self(format!("{local}@{}", domain.to_lowercase())))
    }

    /// Normalised address suitable for storage and lookups.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value.trim().to_owned())
    }
}

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 255;

/// Human readable name attached to an account profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(name: impl Into<String>) -> Result<Self, AccountValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AccountValidationError::EmptyDisplayName);
        }
        if name.chars().count() > DISPLAY_NAME_MAX {
            return Err(AccountValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered user identity.
///
/// ## Invariants
/// - `email` is unique across the store in its normalised form.
/// - `password_hash` is opaque PHC material and is never serialised; the
///   entity deliberately does not implement `Serialize`.
/// - Accounts are soft-disabled through `is_active`, never deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: AccountId,
    email: EmailAddress,
    display_name: Option<DisplayName>,
    password_hash: PasswordHash,
    is_active: bool,
    is_staff: bool,
    is_superuser: bool,
    joined_at: DateTime<Utc>,
}

impl Account {
    /// Build a regular active account.
    pub fn new(
        id: AccountId,
        email: EmailAddress,
        display_name: Option<DisplayName>,
        password_hash: PasswordHash,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            display_name,
            password_hash,
            is_active: true,
            is_staff: false,
            is_superuser: false,
            joined_at,
        }
    }

    /// Build an active account with staff and superuser privileges.
    pub fn new_superuser(
        id: AccountId,
        email: EmailAddress,
        password_hash: PasswordHash,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            is_staff: true,
            is_superuser: true,
            ..Self::new(id, email, None, password_hash, joined_at)
        }
    }

    /// Stable account identifier.
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Normalised email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Profile display name, if one has been set.
    pub fn display_name(&self) -> Option<&DisplayName> {
        self.display_name.as_ref()
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Whether the account may authenticate.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Whether the account may use the operator surface.
    pub fn is_staff(&self) -> bool {
        self.is_staff
    }

    /// Whether the account holds every privilege.
    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }

    /// Creation timestamp.
    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// Replace the profile display name.
    pub fn set_display_name(&mut self, display_name: Option<DisplayName>) {
        self.display_name = display_name;
    }

    /// Replace the stored password hash.
    pub fn set_password_hash(&mut self, password_hash: PasswordHash) {
        self.password_hash = password_hash;
    }

    /// Enable or soft-disable the account.
    pub fn set_is_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    /// Grant or revoke operator access.
    pub fn set_is_staff(&mut self, is_staff: bool) {
        self.is_staff = is_staff;
    }

    /// Grant or revoke the superuser flag.
    pub fn set_is_superuser(&mut self, is_superuser: bool) {
        self.is_superuser = is_superuser;
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for email normalisation and account construction.

    use super::*;
    use crate::domain::password::PasswordHash;
    use rstest::rstest;

    fn hash() -> PasswordHash {
        PasswordHash::from_plaintext("correct horse").expect("valid password")
    }

    #[rstest]
    #[case("em1@TESTDOM.cOm", "em1@testdom.com")]
    #[case("Cook@Example.COM", "Cook@example.com")]
    #[case("first.last@Sub.Example.Org", "first.last@sub.example.org")]
    #[case("odd@name@Example.COM", "odd@name@example.com")]
    #[case("plain@example.com", "plain@example.com")]
    fn parse_lowercases_only_the_domain(#[case] raw: &str, #[case] expected: &str) {
        let email = EmailAddress::parse(raw).expect("valid email");
        assert_eq!(email.as_str(), expected);
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let email = EmailAddress::parse("  cook@example.com  ").expect("valid email");
        assert_eq!(email.as_str(), "cook@example.com");
    }

    #[rstest]
    #[case("", AccountValidationError::EmptyEmail)]
    #[case("   ", AccountValidationError::EmptyEmail)]
    #[case("no-separator", AccountValidationError::MissingAtSymbol)]
    #[case("@example.com", AccountValidationError::EmptyLocalPart)]
    #[case("cook@", AccountValidationError::EmptyDomain)]
    fn parse_rejects_malformed_addresses(
        #[case] raw: &str,
        #[case] expected: AccountValidationError,
    ) {
        let err = EmailAddress::parse(raw).expect_err("malformed email must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn local_part_case_distinguishes_addresses() {
        let upper = EmailAddress::parse("Cook@example.com").expect("valid email");
        let lower = EmailAddress::parse("cook@example.com").expect("valid email");
        assert_ne!(upper, lower);
    }

    #[test]
    fn domain_case_does_not_distinguish_addresses() {
        let a = EmailAddress::parse("cook@EXAMPLE.com").expect("valid email");
        let b = EmailAddress::parse("cook@example.COM").expect("valid email");
        assert_eq!(a, b);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn display_name_rejects_blank_input(#[case] raw: &str) {
        let err = DisplayName::new(raw).expect_err("blank name must fail");
        assert_eq!(err, AccountValidationError::EmptyDisplayName);
    }

    #[test]
    fn display_name_rejects_overlong_input() {
        let err = DisplayName::new("a".repeat(DISPLAY_NAME_MAX + 1)).expect_err("too long");
        assert_eq!(
            err,
            AccountValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX
            }
        );
    }

    #[test]
    fn display_name_accepts_maximum_length() {
        let name = "a".repeat(DISPLAY_NAME_MAX);
        let parsed = DisplayName::new(name.clone()).expect("boundary length");
        assert_eq!(parsed.as_ref(), name);
    }

    #[test]
    fn new_account_starts_active_without_privileges() {
        let email = EmailAddress::parse("cook@example.com").expect("valid email");
        let account = Account::new(AccountId::random(), email, None, hash(), Utc::now());
        assert!(account.is_active());
        assert!(!account.is_staff());
        assert!(!account.is_superuser());
    }

    #[test]
    fn superuser_account_carries_both_flags() {
        let email = EmailAddress::parse("admin@example.com").expect("valid email");
        let account = Account::new_superuser(AccountId::random(), email, hash(), Utc::now());
        assert!(account.is_staff());
        assert!(account.is_superuser());
        assert!(account.display_name().is_none());
    }
}
