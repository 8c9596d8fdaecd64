//! Password value object - one-way credential hashing.
//!
//! The stored form is an Argon2 PHC string (`$argon2id$v=19$m=...$salt$hash`),
//! so verification needs nothing besides the stored value itself.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{DomainError, DomainResult};

/// Password value object that handles hashing and verification.
///
/// Holds only the hash. Policy checks (length, character classes) belong to
/// the validator, so any non-empty plaintext can be hashed here.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Errors
    /// Returns an internal error if Argon2 rejects the input.
    pub fn hash(plain_text: &str) -> DomainResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wrap a previously stored hash.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        verify(plain_text, &self.hash)
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

/// Verify a plaintext candidate against a stored hash string.
///
/// A stored value that is not a parseable PHC string verifies as `false`.
pub fn verify(plain_text: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Password::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
