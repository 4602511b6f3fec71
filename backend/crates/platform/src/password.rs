//! Password Hashing and Verification
//!
//! - Argon2id hashing with a fresh random salt per call
//! - Zeroization of clear text material
//! - Registration policy matching the public signup contract
//!
//! Verification is deliberately infallible: any parse or comparison
//! failure reads as "no match".

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Minimum password length for registration
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violations (registration only)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is empty or whitespace only
    #[error("Password cannot be empty")]
    EmptyOrWhitespace,

    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains characters outside A-Z, a-z, 0-9
    #[error("Password may only contain letters and digits")]
    InvalidCharacter,

    /// Password lacks an uppercase letter
    #[error("Password must contain an uppercase letter")]
    MissingUppercase,

    /// Password lacks a digit
    #[error("Password must contain a digit")]
    MissingDigit,
}

/// Hashing failures
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization.
///
/// Construction enforces the registration policy; the value does not
/// implement `Clone` and its Debug output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Validate a raw registration password.
    ///
    /// Unicode is NFKC-normalized first, then the policy applies:
    /// 8-128 characters, ASCII letters and digits only, at least one
    /// uppercase letter and one digit.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(PasswordPolicyError::InvalidCharacter);
        }
        if !normalized.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PasswordPolicyError::MissingUppercase);
        }
        if !normalized.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }

        Ok(Self(normalized))
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash with Argon2id and a freshly generated random salt.
    ///
    /// Two calls with the same input produce distinct digests.
    pub fn hash(&self) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(self.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword(<redacted>)")
    }
}

// ============================================================================
// Hashed Password
// ============================================================================

/// PHC-formatted Argon2id digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Wrap a stored PHC string.
    pub fn from_phc(hash: String) -> Self {
        Self { hash }
    }

    /// The PHC string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Verify a candidate password against this digest.
    ///
    /// Never errors. A digest that fails to parse, or a candidate that
    /// does not match, both read as `false`. Login candidates are not
    /// policy-checked; any byte sequence may be verified.
    pub fn verify(&self, candidate: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }
}
