//! Password policy, hashing, and verification.
//!
//! Plaintext passwords exist only in flight; at rest the account stores an
//! Argon2id hash in PHC string format. Verification re-derives the hash from
//! the candidate using the parameters embedded in the stored string.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as PhcString, PasswordHasher, PasswordVerifier, SaltString,
};

/// Minimum accepted password length, counted in characters.
pub const PASSWORD_MIN_CHARS: usize = 8;

/// Errors raised while hashing a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// Plaintext is shorter than [`PASSWORD_MIN_CHARS`].
    TooShort { min: usize },
    /// The hashing primitive failed.
    Hash { message: String },
}

impl fmt::Display for PasswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::Hash { message } => write!(f, "password hashing failed: {message}"),
        }
    }
}

impl std::error::Error for PasswordError {}

/// Argon2id digest of an account password in PHC string format.
///
/// The raw string is deliberately not exposed through `Display` or serde;
/// persistence adapters read it via [`PasswordHash::as_str`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Enforce the length policy and hash the plaintext with a fresh salt.
    pub fn from_plaintext(plaintext: &str) -> Result<Self, PasswordError> {
        if plaintext.chars().count() < PASSWORD_MIN_CHARS {
            return Err(PasswordError::TooShort {
                min: PASSWORD_MIN_CHARS,
            });
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| PasswordError::Hash {
                message: err.to_string(),
            })?;
        Ok(Self(hash.to_string()))
    }

    /// Rehydrate a hash previously produced by [`PasswordHash::from_plaintext`].
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Check a candidate password against the stored digest.
    ///
    /// An unparseable stored hash verifies as `false` rather than erroring;
    /// a corrupt record must never authenticate.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        let Ok(parsed) = PhcString::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }

    /// PHC string for persistence adapters.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the hashing policy and verification behaviour.

    use super::*;
    use rstest::rstest;

    #[test]
    fn hash_verifies_original_plaintext() {
        let hash = PasswordHash::from_plaintext("testPassword").expect("valid password");
        assert!(hash.verify("testPassword"));
        assert!(!hash.verify("testpassword"));
        assert!(!hash.verify(""));
    }

    #[test]
    fn hash_output_is_phc_formatted_and_salted() {
        let first = PasswordHash::from_plaintext("testPassword").expect("valid password");
        let second = PasswordHash::from_plaintext("testPassword").expect("valid password");
        assert!(first.as_str().starts_with("$argon2id$"));
        // Fresh salts keep equal passwords from producing equal digests.
        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    #[case("")]
    #[case("pw")]
    #[case("1234567")]
    fn short_passwords_are_rejected(#[case] plaintext: &str) {
        let err = PasswordHash::from_plaintext(plaintext).expect_err("short password must fail");
        assert_eq!(
            err,
            PasswordError::TooShort {
                min: PASSWORD_MIN_CHARS
            }
        );
    }

    #[test]
    fn eight_characters_is_accepted() {
        assert!(PasswordHash::from_plaintext("12345678").is_ok());
    }

    #[test]
    fn corrupt_stored_hash_never_verifies() {
        let hash = PasswordHash::from_phc("not-a-phc-string");
        assert!(!hash.verify("anything"));
    }
}
