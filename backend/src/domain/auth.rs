//! Authentication primitives: login credentials and bearer tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.
//!
//! Tokens are opaque 32-byte random values handed to the client exactly once.
//! At rest only a SHA-256 digest is kept, so lookups hash the presented value
//! and compare digests.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::domain::account::{AccountId, AccountValidationError, EmailAddress};

/// Domain error returned when token request values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email failed address validation.
    MalformedEmail(AccountValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::MalformedEmail(err) => write!(f, "{err}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated login credentials used by the authentication services.
///
/// ## Invariants
/// - `email` is a parsed, normalised address so lookups hit the stored form.
/// - `password` must be non-empty but retains caller-provided whitespace to
///   avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw email/password inputs.
    ///
    /// # Examples
    /// ```
    /// use larder::domain::Credentials;
    ///
    /// let creds = Credentials::try_from_parts("cook@Example.com", "testPassword").unwrap();
    /// assert_eq!(creds.email().as_str(), "cook@example.com");
    /// ```
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        let email =
            EmailAddress::parse(trimmed).map_err(CredentialsValidationError::MalformedEmail)?;

        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email address for account lookups.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Number of random bytes backing a freshly issued token.
const TOKEN_BYTES: usize = 32;

/// Opaque bearer token value, shown to the client exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenValue(String);

impl TokenValue {
    /// Mint a fresh token from OS randomness.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Wrap a client-presented token value so it can be resolved.
    #[must_use]
    pub fn from_presented(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Digest used for storage and lookups.
    #[must_use]
    pub fn digest(&self) -> TokenDigest {
        TokenDigest::of(&self.0)
    }

    /// The raw value to hand back to the client.
    #[must_use]
    pub fn reveal(&self) -> &str {
        self.0.as_str()
    }
}

/// SHA-256 digest of a token value, the only form kept at rest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenDigest(String);

impl TokenDigest {
    /// Digest an arbitrary presented token value.
    #[must_use]
    pub fn of(raw: &str) -> Self {
        Self(hex::encode(Sha256::digest(raw.as_bytes())))
    }

    /// Hex-encoded digest for persistence adapters.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Stored token record binding a digest to its account.
///
/// One record exists per account; issuing a new token replaces the old one.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthToken {
    account_id: AccountId,
    digest: TokenDigest,
    issued_at: DateTime<Utc>,
}

impl AuthToken {
    /// Build a token record for storage.
    pub fn new(account_id: AccountId, digest: TokenDigest, issued_at: DateTime<Utc>) -> Self {
        Self {
            account_id,
            digest,
            issued_at,
        }
    }

    /// Owning account.
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Stored digest.
    pub fn digest(&self) -> &TokenDigest {
        &self.digest
    }

    /// Issuance timestamp.
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw123456", CredentialsValidationError::EmptyEmail)]
    #[case("   ", "pw123456", CredentialsValidationError::EmptyEmail)]
    #[case(
        "not-an-email",
        "pw123456",
        CredentialsValidationError::MalformedEmail(AccountValidationError::MissingAtSymbol)
    )]
    #[case("cook@example.com", "", CredentialsValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err =
            Credentials::try_from_parts(email, password).expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  cook@Example.COM  ", "secret-password", "cook@example.com")]
    #[case("alice@kitchen.org", "correct horse battery staple", "alice@kitchen.org")]
    fn valid_credentials_normalise_email(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected_email: &str,
    ) {
        let creds =
            Credentials::try_from_parts(email, password).expect("valid inputs should succeed");
        assert_eq!(creds.email().as_str(), expected_email);
        assert_eq!(creds.password(), password);
    }

    #[test]
    fn generated_tokens_are_unique_hex() {
        let first = TokenValue::generate();
        let second = TokenValue::generate();
        assert_ne!(first.reveal(), second.reveal());
        assert_eq!(first.reveal().len(), TOKEN_BYTES * 2);
        assert!(first.reveal().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn digest_is_stable_for_equal_input() {
        let token = TokenValue::generate();
        assert_eq!(token.digest(), TokenDigest::of(token.reveal()));
    }

    #[test]
    fn digest_differs_from_raw_value() {
        let token = TokenValue::generate();
        assert_ne!(token.digest().as_str(), token.reveal());
    }
}
