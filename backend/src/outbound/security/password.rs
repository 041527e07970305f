//! Argon2id implementation of the password hashing port.
//!
//! Hashes use Argon2id with the library's default parameters and a random
//! per-password salt, stored in PHC string format. A wrong password is
//! `Ok(false)`; only a malformed stored hash is an error.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::Argon2;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::user::PasswordHashString;

/// Argon2id adapter for the [`PasswordHasher`] port.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create a hasher with default Argon2id parameters.
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHashString, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordHashString::new(hash.to_string()))
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    fn verify(
        &self,
        password: &str,
        hash: &PasswordHashString,
    ) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(hash.as_str())
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::hashing(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn hash_produces_argon2id_phc_string() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("secret").expect("hashing succeeds");
        assert!(hash.as_str().starts_with("$argon2id$"));
    }

    #[test]
    fn verify_accepts_the_original_password_only() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("secret").expect("hashing succeeds");

        assert!(hasher.verify("secret", &hash).expect("verify succeeds"));
        assert!(!hasher.verify("not-secret", &hash).expect("verify succeeds"));
    }

    #[test]
    fn hashes_are_salted_per_password() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash("secret").expect("hashing succeeds");
        let second = hasher.hash("secret").expect("hashing succeeds");
        assert_ne!(first, second, "salts must differ between hashes");
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        let hasher = Argon2PasswordHasher::new();
        let err = hasher
            .verify("secret", &PasswordHashString::new("not-a-phc-string"))
            .expect_err("malformed hash must error");
        assert!(matches!(err, PasswordHashError::Hashing { .. }));
    }
}
